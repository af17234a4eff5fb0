//! Configuration display command

use anyhow::Result;
use cli_lib::config::Config;
use owo_colors::OwoColorize;
use std::path::Path;

/// Print the resolved configuration as TOML
pub fn run(config: &Config, source: Option<&Path>) -> Result<()> {
    println!("{}", "Filewatch Configuration".bold());
    match source {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display().dimmed()),
        None => println!("{}\n", "(no config file found, using defaults)".dimmed()),
    }

    print!("{}", config.to_toml_string()?);
    Ok(())
}
