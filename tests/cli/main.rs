use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod init;
mod tzdata;

const BIN_NAME: &str = "assetkit";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config lookup from escaping the temp project
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write an executable shell script and return its absolute path.
    #[cfg(unix)]
    pub fn write_script(&self, path: &str, body: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, &format!("#!/bin/sh\nset -e\n{}\n", body))?;
        let file_path = self.project_dir.join(path);
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o755))?;
        Ok(file_path)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path); // Fake toolchain scripts need mkdir/printf
        }
        cmd
    }

    pub fn gettext_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("gettext");
        cmd
    }

    pub fn tzdata_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("tzdata");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Names of entries directly in the project root, sorted.
    pub fn root_entries(&self) -> Result<Vec<String>> {
        let mut names = fs::read_dir(&self.project_dir)?
            .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("tzdata"));
    assert!(out.contains("gettext"));
    assert!(out.contains("init"));

    Ok(())
}
