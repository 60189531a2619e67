use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, write_default_config};

pub fn init() -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if !write_default_config(&cwd)? {
        eprintln!(
            "{} {} already exists, not overwriting",
            "warning:".bold().yellow(),
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Refused);
    }

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {} with default settings", CONFIG_FILE_NAME).green()
    );
    Ok(ExitStatus::Done)
}
