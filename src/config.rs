//! Layered configuration
//!
//! Precedence, lowest first: built-in defaults, the user file
//! (`<config_dir>/autopush/config.toml`), the repository file
//! (`<cwd>/.autopush.toml`), then command-line flags. An explicit
//! `--config` path replaces both files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::message::{TimestampFormat, DEFAULT_SUFFIX};

pub const DEFAULT_REMOTE: &str = "origin";
pub const REPO_CONFIG_FILE: &str = ".autopush.toml";

/// One configuration layer; unset keys fall through to the layer below
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub remote: Option<String>,
    pub suffix: Option<String>,
    pub timestamp_format: Option<String>,
    pub pause: Option<bool>,
    pub strict: Option<bool>,
    pub confirm_push: Option<bool>,
    pub skip_if_clean: Option<bool>,
}

impl FileConfig {
    /// Read a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Read a config file, treating a missing file as an empty layer
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Layer `over` on top of `self`
    pub fn merge(self, over: FileConfig) -> FileConfig {
        FileConfig {
            remote: over.remote.or(self.remote),
            suffix: over.suffix.or(self.suffix),
            timestamp_format: over.timestamp_format.or(self.timestamp_format),
            pause: over.pause.or(self.pause),
            strict: over.strict.or(self.strict),
            confirm_push: over.confirm_push.or(self.confirm_push),
            skip_if_clean: over.skip_if_clean.or(self.skip_if_clean),
        }
    }
}

/// `~/.config/autopush/config.toml` or the platform equivalent
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autopush").join("config.toml"))
}

/// Collect the file layers for a run in `cwd`
pub fn load_layers(user: Option<&Path>, cwd: &Path, explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return FileConfig::load(path);
    }

    let user_layer = match user {
        Some(path) => FileConfig::load_optional(path)?,
        None => FileConfig::default(),
    };
    let repo_layer = FileConfig::load_optional(&cwd.join(REPO_CONFIG_FILE))?;

    Ok(user_layer.merge(repo_layer))
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub remote: String,
    pub suffix: String,
    pub timestamp_format: TimestampFormat,
    pub pause: bool,
    pub strict: bool,
    pub confirm_push: bool,
    pub skip_if_clean: bool,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            timestamp_format: TimestampFormat::default(),
            pause: false,
            strict: false,
            confirm_push: false,
            skip_if_clean: false,
            dry_run: false,
        }
    }
}

impl Settings {
    pub fn resolve(config: FileConfig, dry_run: bool) -> Result<Self> {
        let defaults = Settings::default();

        let remote = config.remote.unwrap_or(defaults.remote);
        if remote.trim().is_empty() {
            bail!("Remote name must not be empty");
        }

        let suffix = config.suffix.unwrap_or(defaults.suffix);
        if suffix.is_empty() {
            bail!("Commit message suffix must not be empty");
        }

        let timestamp_format = match config.timestamp_format {
            Some(pattern) => TimestampFormat::parse(&pattern)?,
            None => defaults.timestamp_format,
        };

        Ok(Self {
            remote,
            suffix,
            timestamp_format,
            pause: config.pause.unwrap_or(defaults.pause),
            strict: config.strict.unwrap_or(defaults.strict),
            confirm_push: config.confirm_push.unwrap_or(defaults.confirm_push),
            skip_if_clean: config.skip_if_clean.unwrap_or(defaults.skip_if_clean),
            dry_run,
        })
    }
}
