//! Status line formatting.
//!
//! Separate from the command logic so `tzdata` and `gettext` can be used as
//! a library without any terminal output beyond warnings.

use std::io::{self, Write};

use colored::Colorize;

use crate::gettext::ExtractReport;
use crate::tzdata::SnapshotOutcome;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

pub fn print_snapshot_success(outcome: &SnapshotOutcome) {
    print_snapshot_success_to(outcome, &mut io::stdout().lock());
}

pub fn print_snapshot_success_to<W: Write>(outcome: &SnapshotOutcome, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} from tzdb {} to {}",
            outcome.zone_count,
            plural(outcome.zone_count, "zone", "zones"),
            outcome.version,
            outcome.output.display()
        )
        .green()
    );
}

/// Print the extraction summary.
///
/// Goes to stderr, because stdout may be carrying the template itself.
pub fn print_extract_summary(report: &ExtractReport, verbose: bool) {
    print_extract_summary_to(report, verbose, &mut io::stderr().lock());
}

pub fn print_extract_summary_to<W: Write>(report: &ExtractReport, verbose: bool, writer: &mut W) {
    let messages = report.catalog.len();
    if verbose {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Extracted {} {} from {} source {}",
                messages,
                plural(messages, "message", "messages"),
                report.files_scanned,
                plural(report.files_scanned, "file", "files")
            )
            .green()
        );
    }

    let unreadable = report.read_errors.len() + report.skipped_count;
    if unreadable > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            unreadable,
            "-v".cyan()
        );
    }
}
