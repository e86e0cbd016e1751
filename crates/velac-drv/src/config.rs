//! Optional `velac.toml` configuration (SPEC_FULL §6).
//!
//! Mirrors `faxt::config::Config`: a `serde`-derived struct loaded from
//! TOML, found via a fixed search order, falling back to defaults when no
//! file exists anywhere in that order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DrvError;

pub const CONFIG_FILE_NAME: &str = "velac.toml";

/// On-disk configuration. Every field mirrors a CLI override in
/// [`crate::cli::RunArgs`]; CLI flags take precedence when both are set
/// (see [`crate::cli::RunArgs::resolve_layout`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Emit `debug`-level tracing even without `-v`.
    #[serde(default)]
    pub verbose: bool,

    /// Memory layout overrides.
    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MemoryConfig {
    pub glob_size: Option<usize>,
    pub stack_size: Option<usize>,
    pub mem_size: Option<usize>,
}

impl Config {
    /// Loads config from the first of: current directory, then
    /// `~/.config/velac/velac.toml`, then the OS config directory,
    /// falling back to `Config::default()` if none exist (SPEC_FULL §6,
    /// modeled on `faxt::config::Config::load`/`find_config_file`).
    pub fn load() -> Result<Self, DrvError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, DrvError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| DrvError::ReadConfig { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| DrvError::ParseConfig { path: path.to_path_buf(), source })
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }

    fn check_current_dir() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        dirs::home_dir()
            .map(|dir| dir.join(".config").join("velac").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("velac").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_layout_overrides() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.memory.glob_size, None);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("velac.toml");
        std::fs::write(
            &path,
            "verbose = true\n[memory]\nglob_size = 512\nstack_size = 2048\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.memory.glob_size, Some(512));
        assert_eq!(config.memory.stack_size, Some(2048));
        assert_eq!(config.memory.mem_size, None);
    }

    #[test]
    fn missing_path_is_a_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/velac.toml")).unwrap_err();
        assert!(matches!(err, DrvError::ReadConfig { .. }));
    }
}
