pub mod gettext;
pub mod init;
pub mod tzdata;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{CONFIG_FILE_NAME, Config, load_config};

/// Load the configuration file visible from the current directory.
pub(super) fn current_config(verbose: bool) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&cwd)?;
    if verbose && !loaded.from_file {
        eprintln!(
            "{} No {} found, using defaults",
            "info:".bold().cyan(),
            CONFIG_FILE_NAME
        );
    }
    Ok(loaded.config)
}
