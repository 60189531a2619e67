use std::path::{Component, Path};

use colored::Colorize;
use walkdir::WalkDir;

/// Result of scanning files.
pub struct ScanResult {
    /// Display paths (`<root>/<relative>`, `/`-separated), in traversal order.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Recursively list files under `root` with the given extension.
///
/// Traversal is sorted by file name at every level so the output order does
/// not depend on the platform's directory iteration order.
pub fn scan_files(root: &Path, extension: &str, verbose: bool) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();

        if path.is_file() && has_extension(path, extension) {
            files.push(display_path(path));
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// `/`-joined path, dropping `./` components.
fn display_path(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();
    parts.join("/")
}
