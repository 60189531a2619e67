use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use super::SnapshotError;

/// Reserved key holding the tzdb release label.
pub const VERSION_KEY: &str = "_tzdb";

// Bracketed numeric abbreviations of POSIX TZ strings: <-03>, <+0530>
static OFFSET_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[+-]?\d+>").unwrap());

/// Replace the first two bracketed offset tokens with `AAA` and `BBB`.
///
/// Any further tokens are left as they are.
///
/// ```
/// use assetkit::tzdata::normalize_offsets;
///
/// assert_eq!(normalize_offsets("<+0530>-5:30"), "AAA-5:30");
/// assert_eq!(normalize_offsets("<-03>3<-02>,M3.5.0/-2,M10.5.0/-1"), "AAA3BBB,M3.5.0/-2,M10.5.0/-1");
/// assert_eq!(normalize_offsets("CET-1CEST,M3.5.0,M10.5.0/3"), "CET-1CEST,M3.5.0,M10.5.0/3");
/// ```
pub fn normalize_offsets(rule: &str) -> String {
    let first = OFFSET_TOKEN_REGEX.replacen(rule, 1, "AAA");
    OFFSET_TOKEN_REGEX.replacen(&first, 1, "BBB").into_owned()
}

/// The `tzdata.json` document: zone id to trailing rule, plus [`VERSION_KEY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDocument {
    entries: BTreeMap<String, String>,
}

impl SnapshotDocument {
    pub fn new(version: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(VERSION_KEY.to_string(), version.to_string());
        Self { entries }
    }

    pub fn insert(&mut self, zone: String, rule: String) {
        self.entries.insert(zone, rule);
    }

    /// Number of zones, not counting the version entry.
    pub fn zone_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|key| key.as_str() != VERSION_KEY)
            .count()
    }

    /// Serialize with tab indentation, sorted keys and a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        self.entries.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Write the document to `path`.
    ///
    /// The content goes to a temporary file next to the target first, so the
    /// target is either fully replaced or left untouched.
    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let write_err = |source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };

        let content = self.to_json().map_err(|e| write_err(io::Error::other(e)))?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(&parent).map_err(write_err)?;
        file.write_all(&content).map_err(write_err)?;
        // the temporary file starts out owner-only
        set_output_permissions(file.as_file(), path).map_err(write_err)?;
        file.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// Keep the permissions of an existing target, or use `rw-r--r--` for a new
/// one.
fn set_output_permissions(file: &fs::File, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => file.set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_permissions(file),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
