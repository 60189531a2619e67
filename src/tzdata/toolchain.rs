use std::{
    path::Path,
    process::{Command, Output},
};

use super::SnapshotError;

/// External collaborators of a snapshot run.
///
/// The default implementation shells out to `wget`, `bsdtar` and `make`;
/// tests provide fakes that fabricate the artifacts instead.
pub trait TzdbToolchain {
    /// Download `url` into `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), SnapshotError>;

    /// Unpack `archive` into the directory `into`.
    fn extract(&self, archive: &Path, into: &Path) -> Result<(), SnapshotError>;

    /// Build the sources in `source_dir` and install them below `dest_dir`.
    fn build(&self, source_dir: &Path, dest_dir: &Path) -> Result<(), SnapshotError>;
}

/// Toolchain backed by external programs.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    pub fetch_program: String,
    pub extract_program: String,
    pub build_program: String,
}

impl Default for SystemToolchain {
    fn default() -> Self {
        Self {
            fetch_program: "wget".to_string(),
            extract_program: "bsdtar".to_string(),
            build_program: "make".to_string(),
        }
    }
}

impl SystemToolchain {
    fn fetch_command(&self, url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.fetch_program);
        if program_name(&self.fetch_program) == "curl" {
            cmd.args(["-fsSL", "-o"]).arg(dest).arg(url);
        } else {
            cmd.args(["-q", "-O"]).arg(dest).arg(url);
        }
        cmd
    }

    fn extract_command(&self, archive: &Path, into: &Path) -> Command {
        let mut cmd = Command::new(&self.extract_program);
        cmd.arg("xf").arg(archive).arg("-C").arg(into);
        cmd
    }

    fn build_command(&self, source_dir: &Path, dest_dir: &Path) -> Result<Command, SnapshotError> {
        // make -C changes directory, so DESTDIR has to be absolute
        let dest_dir = std::path::absolute(dest_dir).map_err(|e| SnapshotError::BuildTool {
            command: self.build_program.clone(),
            reason: format!("cannot resolve {}: {}", dest_dir.display(), e),
        })?;
        let mut destdir_arg = std::ffi::OsString::from("DESTDIR=");
        destdir_arg.push(dest_dir.as_os_str());

        let mut cmd = Command::new(&self.build_program);
        cmd.arg("-C").arg(source_dir).arg("install").arg(destdir_arg);
        Ok(cmd)
    }
}

impl TzdbToolchain for SystemToolchain {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), SnapshotError> {
        run(self.fetch_command(url, dest)).map_err(|reason| SnapshotError::Acquisition {
            url: url.to_string(),
            reason,
        })
    }

    fn extract(&self, archive: &Path, into: &Path) -> Result<(), SnapshotError> {
        let cmd = self.extract_command(archive, into);
        let command = describe(&cmd);
        run(cmd).map_err(|reason| SnapshotError::BuildTool { command, reason })
    }

    fn build(&self, source_dir: &Path, dest_dir: &Path) -> Result<(), SnapshotError> {
        let cmd = self.build_command(source_dir, dest_dir)?;
        let command = describe(&cmd);
        run(cmd).map_err(|reason| SnapshotError::BuildTool { command, reason })
    }
}

fn program_name(program: &str) -> String {
    Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run `cmd` to completion and check its exit status.
fn run(mut cmd: Command) -> Result<(), String> {
    let output = cmd
        .output()
        .map_err(|e| format!("cannot start {}: {}", cmd.get_program().to_string_lossy(), e))?;
    check_status(&output)
}

fn check_status(output: &Output) -> Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    match stderr.trim().lines().last() {
        Some(line) if !line.is_empty() => Err(format!("{}: {}", output.status, line)),
        _ => Err(output.status.to_string()),
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
