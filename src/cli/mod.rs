//! Command-line interface layer.
//!
//! Parses arguments, merges them with the configuration file, and dispatches
//! to the library modules. Terminal output lives here and in `report`.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, GettextCommand, TzdataCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(command) = args.with_command_or_help() else {
        return Ok(ExitStatus::Done);
    };

    match command {
        Command::Tzdata(cmd) => commands::tzdata::tzdata(cmd),
        Command::Gettext(cmd) => commands::gettext::gettext(cmd),
        Command::Init => commands::init::init(),
    }
}
