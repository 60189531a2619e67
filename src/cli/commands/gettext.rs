use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::GettextCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{SUCCESS_MARK, print_extract_summary};
use super::current_config;
use crate::config::Config;
use crate::gettext::{ExtractOptions, extract, write_template};

pub fn gettext(cmd: GettextCommand) -> Result<ExitStatus> {
    let config = current_config(cmd.common.verbose)?;
    let options = extract_options(&cmd, &config);
    let verbose = options.verbose;

    let report = extract(&options)?;

    match &cmd.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_template(&mut writer, &report.catalog, &config.project_name)
                .and_then(|_| writer.flush())
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Wrote {}", path.display()).green()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_template(&mut stdout, &report.catalog, &config.project_name)
                .and_then(|_| stdout.flush())
                .context("Failed to write template to stdout")?;
        }
    }

    print_extract_summary(&report, verbose);

    Ok(ExitStatus::Done)
}

/// Merge command-line flags over the configuration file.
fn extract_options(cmd: &GettextCommand, config: &Config) -> ExtractOptions {
    ExtractOptions {
        source_root: cmd
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.source_root)),
        extension: cmd
            .extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or_else(|| config.source_extension.clone()),
        singular_function: config.singular_function.clone(),
        plural_function: config.plural_function.clone(),
        verbose: cmd.common.verbose,
    }
}
