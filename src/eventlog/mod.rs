//! Line-delimited event log reader and writer.
//!
//! A log holds one JSON-encoded [`Event`] per line, in recording order.
//! Blank lines are ignored when reading. Writing replaces the target file
//! atomically: events go to a temporary file in the same directory which is
//! then renamed over the destination.

mod error;

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::event::Event;

pub use error::LogError;

/// An ordered sequence of recorded events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Parse an event log from a path.
    ///
    /// Fails with [`LogError::NotFound`] before opening anything when the
    /// path does not exist.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        Self::parse_reader(BufReader::new(file))
    }

    /// Parse an event log from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, LogError> {
        let mut events = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let event = serde_json::from_str(line).map_err(|source| LogError::Parse {
                line: idx + 1,
                source,
            })?;
            events.push(event);
        }

        Ok(Self { events })
    }

    /// Parse from a string
    pub fn parse_str(content: &str) -> Result<Self, LogError> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    /// Write the log to a path, creating parent directories as needed.
    ///
    /// Returns the number of bytes written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<u64, LogError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        let bytes = self.write_to(tmp.as_file_mut())?;
        tmp.as_file_mut().flush()?;
        tmp.persist(path).map_err(|e| LogError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(bytes)
    }

    /// Write every event as one JSON line. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64, LogError> {
        let mut bytes = 0u64;
        for event in &self.events {
            let line = serde_json::to_string(event).map_err(LogError::Serialize)?;
            writeln!(writer, "{}", line)?;
            bytes += line.len() as u64 + 1;
        }
        Ok(bytes)
    }

    /// Convert to string
    pub fn to_string(&self) -> Result<String, LogError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Span between the first and last event, in seconds.
    pub fn duration(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => (last.t() - first.t()).max(0.0),
            _ => 0.0,
        }
    }

    /// Number of events matching a predicate.
    pub fn count_where(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }

    /// Whether timestamps never decrease along the log.
    pub fn is_monotonic(&self) -> bool {
        self.events.windows(2).all(|w| w[0].t() <= w[1].t())
    }
}
