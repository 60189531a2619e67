use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use colored::Colorize;
use regex::Regex;

use super::SnapshotError;

// tzdb-2024a, tzdb-2024b, ...
static VERSION_DIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tzdb-(\d{4}[0-9A-Za-z]*)$").unwrap());

/// The extracted source directory and the release label taken from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDir {
    pub path: PathBuf,
    pub version: String,
}

/// Find the single `tzdb-<version>` directory directly inside `work_dir`.
pub fn find_version_dir(work_dir: &Path) -> Result<VersionDir, SnapshotError> {
    let entries = fs::read_dir(work_dir).map_err(|e| SnapshotError::FileRead {
        path: work_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut found: Vec<(String, String, PathBuf)> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let version = VERSION_DIR_REGEX.captures(&name)?[1].to_string();
            Some((name, version, entry.path()))
        })
        .collect();
    found.sort();

    match found.as_slice() {
        [(_, version, path)] => Ok(VersionDir {
            path: path.clone(),
            version: version.clone(),
        }),
        _ => Err(SnapshotError::AmbiguousVersion {
            dir: work_dir.to_path_buf(),
            found: found.into_iter().map(|(name, _, _)| name).collect(),
        }),
    }
}

/// Scope guard over the transient files of a run.
///
/// On drop, every file or directory directly inside `dir` whose name starts
/// with `prefix` is removed. A `dir` created by [`WorkArtifacts::claim`] is
/// removed too once it is empty. Failures are reported as warnings only.
#[derive(Debug)]
pub struct WorkArtifacts {
    dir: PathBuf,
    prefix: String,
    verbose: bool,
    created_dir: bool,
}

impl WorkArtifacts {
    pub fn new(dir: &Path, prefix: &str, verbose: bool) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            verbose,
            created_dir: false,
        }
    }

    /// Guard `dir`, creating it first if needed.
    pub fn claim(dir: &Path, prefix: &str, verbose: bool) -> io::Result<Self> {
        let created_dir = !dir.exists();
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            verbose,
            created_dir,
        })
    }

    /// Paths currently matching `<dir>/<prefix>*`.
    pub fn matching(&self) -> Vec<PathBuf> {
        let pattern = format!(
            "{}{}{}*",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            std::path::MAIN_SEPARATOR,
            glob::Pattern::escape(&self.prefix)
        );
        match glob::glob(&pattern) {
            Ok(paths) => paths.flatten().collect(),
            Err(e) => {
                eprintln!(
                    "{} Invalid cleanup pattern '{}': {}",
                    "warning:".bold().yellow(),
                    pattern,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Remove all matching artifacts, returning how many were removed.
    pub fn remove_all(&self) -> usize {
        let mut removed = 0;
        for path in self.matching() {
            // symlink_metadata so a symlinked directory is unlinked, not emptied
            let result = match fs::symlink_metadata(&path) {
                Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
                Ok(_) => fs::remove_file(&path),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    removed += 1;
                    if self.verbose {
                        eprintln!("{} Removed {}", "info:".bold().cyan(), path.display());
                    }
                }
                Err(e) => eprintln!(
                    "{} Cannot remove {}: {}",
                    "warning:".bold().yellow(),
                    path.display(),
                    e
                ),
            }
        }
        removed
    }
}

impl Drop for WorkArtifacts {
    fn drop(&mut self) {
        self.remove_all();
        if !self.created_dir {
            return;
        }
        // the output file may live here
        match fs::remove_dir(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {}
            Err(e) => eprintln!(
                "{} Cannot remove {}: {}",
                "warning:".bold().yellow(),
                self.dir.display(),
                e
            ),
        }
    }
}
