use std::path::PathBuf;

use anyhow::{Context, Result};

use super::super::args::TzdataCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_snapshot_success;
use super::current_config;
use crate::config::Config;
use crate::tzdata::{SnapshotOptions, SystemToolchain, build_snapshot};

pub fn tzdata(cmd: TzdataCommand) -> Result<ExitStatus> {
    let config = current_config(cmd.common.verbose)?;
    let options = snapshot_options(&cmd, &config);

    let toolchain = SystemToolchain {
        fetch_program: config.fetch_command.clone(),
        extract_program: config.extract_command.clone(),
        build_program: config.build_command.clone(),
    };

    let outcome = build_snapshot(&options, &toolchain)
        .with_context(|| format!("Failed to build {}", options.output.display()))?;
    print_snapshot_success(&outcome);

    Ok(ExitStatus::Done)
}

/// Merge command-line flags over the configuration file.
fn snapshot_options(cmd: &TzdataCommand, config: &Config) -> SnapshotOptions {
    SnapshotOptions {
        url: cmd.url.clone().unwrap_or_else(|| config.tzdb_url.clone()),
        work_dir: cmd
            .work_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.work_dir)),
        output: cmd
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.tzdata_output)),
        normalize_offsets: cmd.normalize_offsets || config.normalize_offsets,
        verbose: cmd.common.verbose,
    }
}
