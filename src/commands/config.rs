use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("reset", _)) => reset(),
        Some(("path", _)) => path(),
        _ => {
            println!("Use 'pc-emo config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::get_config_path()?;

    println!("{} {}", "Config file:".white().bold(), path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("Failed to serialize config")?
    );
    Ok(())
}

fn reset() -> Result<()> {
    let mut config = Config::load()?;
    config.reset_to_defaults();
    config.save()?;

    println!("{}", "Settings reset to defaults (position kept).".green());
    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::get_config_path()?.display());
    Ok(())
}
