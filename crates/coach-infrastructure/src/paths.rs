//! Path management for interview coach configuration files.
//!
//! ```text
//! ~/.config/interview-coach/    # Config directory (platform equivalent elsewhere)
//! └── config.toml               # Application configuration
//! ```

use coach_core::{CoachError, Result};
use std::path::PathBuf;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "interview-coach";

/// Unified path resolution for the interview coach.
pub struct CoachPaths;

impl CoachPaths {
    /// Returns the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Io` if the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| CoachError::io("Cannot find config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
