//! Translatable string extraction.
//!
//! Walks a source tree, finds `gettext('...')` and `ngettext('...', ...)`
//! calls line by line, and renders a gettext PO template.
//!
//! Files that cannot be read (missing permissions, invalid UTF-8) are
//! skipped: each one becomes a [`FileReadError`] in the report and the scan
//! carries on with the next file. Each skip is printed only in verbose mode;
//! otherwise the caller reports a count.

use std::{fs, io, path::PathBuf};

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;

pub mod catalog;
pub mod patterns;
pub mod po;
pub mod scanner;

pub use catalog::{ExtractedMessage, MessageCatalog, MessageKind};
pub use patterns::CallPatterns;
pub use po::write_template;
pub use scanner::{ScanResult, scan_files};

#[derive(Debug, Error)]
#[error("failed to read {path}: {source}")]
pub struct FileReadError {
    pub path: String,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub source_root: PathBuf,
    pub extension: String,
    pub singular_function: String,
    pub plural_function: String,
    pub verbose: bool,
}

#[derive(Debug)]
pub struct ExtractReport {
    pub catalog: MessageCatalog,
    pub files_scanned: usize,
    /// Directory entries walkdir could not access.
    pub skipped_count: usize,
    pub read_errors: Vec<FileReadError>,
}

/// Scan every matching file under the source root into a fresh catalog.
pub fn extract(options: &ExtractOptions) -> Result<ExtractReport> {
    let patterns = CallPatterns::new(&options.singular_function, &options.plural_function)?;
    let ScanResult {
        files,
        skipped_count,
    } = scan_files(&options.source_root, &options.extension, options.verbose);

    let mut catalog = MessageCatalog::new();
    let mut read_errors = Vec::new();
    let mut files_scanned = 0;

    for file_path in files {
        match fs::read_to_string(&file_path) {
            Ok(content) => {
                files_scanned += 1;
                scan_source(&content, &file_path, &patterns, &mut catalog);
            }
            Err(source) => {
                let err = FileReadError {
                    path: file_path,
                    source,
                };
                if options.verbose {
                    eprintln!("{} {}, skipping", "warning:".bold().yellow(), err);
                }
                read_errors.push(err);
            }
        }
    }

    Ok(ExtractReport {
        catalog,
        files_scanned,
        skipped_count,
        read_errors,
    })
}

/// Add the messages of one file to `catalog`.
pub fn scan_source(
    content: &str,
    file_path: &str,
    patterns: &CallPatterns,
    catalog: &mut MessageCatalog,
) {
    for (index, line) in content.lines().enumerate() {
        if let Some((kind, msgid)) = patterns.match_line(line) {
            catalog.add(kind, msgid, file_path, index + 1);
        }
    }
}
