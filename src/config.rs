use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".assetkitrc.json";

pub const DEFAULT_TZDB_URL: &str = "https://data.iana.org/time-zones/tzdb-latest.tar.lz";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_tzdb_url")]
    pub tzdb_url: String,
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_tzdata_output")]
    pub tzdata_output: String,
    #[serde(default)]
    pub normalize_offsets: bool,
    #[serde(default = "default_fetch_command")]
    pub fetch_command: String,
    #[serde(default = "default_extract_command")]
    pub extract_command: String,
    #[serde(default = "default_build_command")]
    pub build_command: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    #[serde(default = "default_singular_function")]
    pub singular_function: String,
    #[serde(default = "default_plural_function")]
    pub plural_function: String,
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

fn default_tzdb_url() -> String {
    DEFAULT_TZDB_URL.to_string()
}

fn default_work_dir() -> String {
    ".".to_string()
}

fn default_tzdata_output() -> String {
    "tzdata.json".to_string()
}

fn default_fetch_command() -> String {
    "wget".to_string()
}

fn default_extract_command() -> String {
    "bsdtar".to_string()
}

fn default_build_command() -> String {
    "make".to_string()
}

fn default_source_root() -> String {
    "lib".to_string()
}

fn default_source_extension() -> String {
    "dart".to_string()
}

fn default_singular_function() -> String {
    "gettext".to_string()
}

fn default_plural_function() -> String {
    "ngettext".to_string()
}

fn default_project_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tzdb_url: default_tzdb_url(),
            work_dir: default_work_dir(),
            tzdata_output: default_tzdata_output(),
            normalize_offsets: false,
            fetch_command: default_fetch_command(),
            extract_command: default_extract_command(),
            build_command: default_build_command(),
            source_root: default_source_root(),
            source_extension: default_source_extension(),
            singular_function: default_singular_function(),
            plural_function: default_plural_function(),
            project_name: default_project_name(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for values that would make a command meaningless,
    /// such as an empty download URL or an empty translation function name.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("tzdbUrl", &self.tzdb_url),
            ("tzdataOutput", &self.tzdata_output),
            ("fetchCommand", &self.fetch_command),
            ("extractCommand", &self.extract_command),
            ("buildCommand", &self.build_command),
            ("sourceExtension", &self.source_extension),
            ("singularFunction", &self.singular_function),
            ("pluralFunction", &self.plural_function),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                bail!("Invalid config: '{}' must not be empty", field);
            }
        }

        if self.source_extension.starts_with('.') {
            bail!(
                "Invalid config: 'sourceExtension' should not start with a dot: \"{}\"",
                self.source_extension
            );
        }

        if self.singular_function == self.plural_function {
            bail!(
                "Invalid config: 'singularFunction' and 'pluralFunction' are both \"{}\"",
                self.singular_function
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Write the default configuration into `dir`.
///
/// Returns `false` without touching anything if a config file is already
/// there.
pub fn write_default_config(dir: &Path) -> Result<bool> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Ok(false);
    }
    let mut content = default_config_json()?;
    content.push('\n');
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
