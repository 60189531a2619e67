use std::{
    fs,
    path::{Component, Path},
};

use walkdir::WalkDir;

use super::SnapshotError;

/// Leading bytes of a version 2 compiled zone file.
pub const TZIF2_SIGNATURE: &[u8] = b"TZif2";

/// Returns the last line of a compiled zone file.
///
/// A single trailing newline is ignored, so for a well-formed `TZif2` file
/// this is the POSIX TZ footer.
pub fn trailing_rule(bytes: &[u8]) -> &[u8] {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    match body.iter().rposition(|&b| b == b'\n') {
        Some(pos) => &body[pos + 1..],
        None => body,
    }
}

/// Collect `(zone id, rule)` pairs from a compiled zoneinfo tree.
///
/// Entries are visited in file-name order. Directories and files without the
/// `TZif2` signature are skipped; symlinks are followed only when they point
/// at a regular file.
pub fn scan_zoneinfo(root: &Path) -> Result<Vec<(String, String)>, SnapshotError> {
    let mut rules = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SnapshotError::FileRead {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let read_err = |reason: String| SnapshotError::FileRead {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| read_err(e.to_string()))?;
        if !bytes.starts_with(TZIF2_SIGNATURE) {
            continue;
        }

        let rule = std::str::from_utf8(trailing_rule(&bytes))
            .map_err(|e| read_err(format!("trailing rule is not UTF-8: {}", e)))?
            .trim()
            .to_string();

        let zone = zone_id(root, path).ok_or_else(|| read_err("outside zoneinfo root".into()))?;
        rules.push((zone, rule));
    }

    Ok(rules)
}

/// Zone identifier of `path`: its components below `root`, joined by `/`.
fn zone_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
