//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `tzdata`: Build `tzdata.json` from the latest IANA tz database
//! - `gettext`: Extract translatable strings into a PO template
//! - `init`: Initialize the assetkit configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Return the command, or print help and return None if there is none.
    pub fn with_command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TzdataCommand {
    /// Output JSON file (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the downloaded archive and build tree (overrides config file)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Archive URL (overrides config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Replace the first two bracketed UTC offsets of each rule with AAA and BBB
    #[arg(long)]
    pub normalize_offsets: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GettextCommand {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Extension of the files to scan, without the dot (overrides config file)
    #[arg(long)]
    pub extension: Option<String>,

    /// Write the template to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the IANA tz database and package its zone rules as JSON
    Tzdata(TzdataCommand),
    /// Extract gettext/ngettext strings into a PO template
    Gettext(GettextCommand),
    /// Initialize a new .assetkitrc.json configuration file
    Init,
}
