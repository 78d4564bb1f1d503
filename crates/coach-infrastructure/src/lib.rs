//! Infrastructure layer for the interview coach: configuration files and
//! path resolution.

pub mod paths;
pub mod toml_config_repository;

pub use crate::paths::CoachPaths;
pub use crate::toml_config_repository::TomlConfigRepository;
