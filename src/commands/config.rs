//! Config subcommands handler

use std::path::Path;

use anyhow::Result;

use macrorec::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print where the configuration is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
