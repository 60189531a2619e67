//! IANA tz database snapshot builder.
//!
//! Downloads the latest tzdb release, compiles it with the database's own
//! makefile, and packages the trailing POSIX TZ rule of every compiled zone
//! into a single JSON document.
//!
//! ## Pipeline
//!
//! 1. `fetch`: download `tzdb-latest.tar.lz` into the work directory
//! 2. `extract`: unpack it and locate the single `tzdb-<version>` directory
//! 3. `build`: `make install` into `tzdb-root`
//! 4. `scan`: read every `TZif2` file under the installed zoneinfo tree
//! 5. `write`: serialize the sorted document (tab indented) atomically
//!
//! Every `tzdb-*` artifact in the work directory is removed when the run
//! ends, whether it succeeded or not. See [`workspace::WorkArtifacts`].

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use thiserror::Error;

pub mod document;
pub mod toolchain;
pub mod workspace;
pub mod zoneinfo;

pub use document::{SnapshotDocument, VERSION_KEY, normalize_offsets};
pub use toolchain::{SystemToolchain, TzdbToolchain};
pub use workspace::{VersionDir, WorkArtifacts, find_version_dir};
pub use zoneinfo::{TZIF2_SIGNATURE, scan_zoneinfo, trailing_rule};

/// Name prefix shared by every transient artifact of a run.
pub const WORK_PREFIX: &str = "tzdb-";

/// File name of the downloaded archive inside the work directory.
pub const ARCHIVE_NAME: &str = "tzdb-latest.tar.lz";

/// `DESTDIR` used for `make install`, relative to the work directory.
pub const INSTALL_ROOT_NAME: &str = "tzdb-root";

/// Location of the compiled zone files below the install root.
pub const ZONEINFO_SUBDIR: &str = "usr/share/zoneinfo";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to download {url}: {reason}")]
    Acquisition { url: String, reason: String },

    #[error(
        "expected exactly one tzdb-<version> directory in {}, found {}",
        dir.display(),
        describe_found(found)
    )]
    AmbiguousVersion { dir: PathBuf, found: Vec<String> },

    #[error("`{command}` failed: {reason}")]
    BuildTool { command: String, reason: String },

    #[error("failed to read {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error(
        "output {} is inside the tzdb work area and would be removed with it",
        path.display()
    )]
    OutputInWorkArea { path: PathBuf },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_found(found: &[String]) -> String {
    if found.is_empty() {
        "none".to_string()
    } else {
        found.join(", ")
    }
}

/// Inputs of a snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub url: String,
    pub work_dir: PathBuf,
    pub output: PathBuf,
    pub normalize_offsets: bool,
    pub verbose: bool,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub version: String,
    pub zone_count: usize,
    pub output: PathBuf,
}

/// Run the whole pipeline with the given toolchain.
///
/// Cleanup of the work directory happens when the internal guard drops, so
/// it also runs when any step returns early with an error.
pub fn build_snapshot(
    options: &SnapshotOptions,
    toolchain: &dyn TzdbToolchain,
) -> Result<SnapshotOutcome, SnapshotError> {
    let work_dir = options.work_dir.as_path();
    if output_collides_with_artifacts(&options.output, work_dir) {
        return Err(SnapshotError::OutputInWorkArea {
            path: options.output.clone(),
        });
    }

    let _artifacts = WorkArtifacts::claim(work_dir, WORK_PREFIX, options.verbose).map_err(
        |source| SnapshotError::Write {
            path: work_dir.to_path_buf(),
            source,
        },
    )?;

    let archive = work_dir.join(ARCHIVE_NAME);
    progress(options.verbose, &format!("Downloading {}", options.url));
    toolchain.fetch(&options.url, &archive)?;

    progress(options.verbose, &format!("Extracting {}", archive.display()));
    toolchain.extract(&archive, work_dir)?;
    let VersionDir { path, version } = find_version_dir(work_dir)?;

    let install_root = work_dir.join(INSTALL_ROOT_NAME);
    progress(options.verbose, &format!("Building tzdb {}", version));
    toolchain.build(&path, &install_root)?;

    let zoneinfo_root = install_root.join(ZONEINFO_SUBDIR);
    progress(
        options.verbose,
        &format!("Scanning {}", zoneinfo_root.display()),
    );
    let rules = scan_zoneinfo(&zoneinfo_root)?;

    let mut document = SnapshotDocument::new(&version);
    for (zone, rule) in rules {
        let rule = if options.normalize_offsets {
            normalize_offsets(&rule)
        } else {
            rule
        };
        document.insert(zone, rule);
    }

    document.write_to(&options.output)?;

    Ok(SnapshotOutcome {
        version,
        zone_count: document.zone_count(),
        output: options.output.clone(),
    })
}

fn progress(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{} {}", "info:".bold().cyan(), message);
    }
}

/// Returns true if `output` would be swept up by the work directory cleanup,
/// i.e. its first component below `work_dir` starts with [`WORK_PREFIX`].
pub fn output_collides_with_artifacts(output: &Path, work_dir: &Path) -> bool {
    let output = lexical_absolute(output);
    let work_dir = lexical_absolute(work_dir);
    match output.strip_prefix(&work_dir) {
        Ok(rest) => rest
            .components()
            .next()
            .is_some_and(|first| first.as_os_str().to_string_lossy().starts_with(WORK_PREFIX)),
        Err(_) => false,
    }
}

/// Absolute form of `path` with `.` and `..` folded without touching the
/// filesystem.
fn lexical_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
