//! TOML-based configuration storage.

use crate::paths::CoachPaths;
use coach_core::{CoachConfig, CoachError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Loads and saves `CoachConfig` as a TOML file.
///
/// Responsibilities:
/// - Fall back to defaults when the file is missing or empty
/// - Validate the parsed configuration
/// - Write atomically (tmp file + rename)
pub struct TomlConfigRepository {
    path: PathBuf,
}

impl TomlConfigRepository {
    /// Creates a repository with the default config path
    /// (`~/.config/interview-coach/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: CoachPaths::config_file()?,
        })
    }

    /// Creates a repository with a custom config path (for testing or `--config`)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(CoachConfig::default())`: the file does not exist or is empty
    /// - `Ok(config)`: the file parsed and validated
    /// - `Err(_)`: the file could not be read, parsed, or failed validation
    pub fn load(&self) -> Result<CoachConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", self.path);
            return Ok(CoachConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CoachConfig::default());
        }

        let config: CoachConfig = toml::from_str(&content)?;
        config.validate()?;

        tracing::info!("[Config] Loaded configuration from {:?}", self.path);
        Ok(config)
    }

    /// Saves the configuration atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the file cannot be
    /// written.
    pub fn save(&self, config: &CoachConfig) -> Result<()> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(config)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        tracing::info!("[Config] Saved configuration to {:?}", self.path);
        Ok(())
    }

    /// Gets a temporary file path next to the target for atomic writes.
    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CoachError::io(format!("Path has no file name: {:?}", self.path)))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}
