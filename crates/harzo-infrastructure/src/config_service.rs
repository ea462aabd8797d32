//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use harzo_core::config::RootConfig;
use harzo_core::{HarzoError, Result};

use crate::paths::HarzoPaths;

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields defaults; a malformed file is logged and also falls
/// back to defaults so a bad edit never blocks startup.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &HarzoPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| HarzoError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Using default configuration: {}", e);
                RootConfig::default()
            }
        };

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            return Ok(RootConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let config: RootConfig = toml::from_str(&content)?;
        config.generation.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harzo_core::Quality;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_reads_and_caches_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nquality = \"Standard\"\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().generation.quality, Quality::Standard);

        std::fs::write(&path, "[generation]\nquality = \"Ultra HD\"\n").unwrap();
        assert_eq!(service.get_config().generation.quality, Quality::Standard);

        service.invalidate_cache();
        assert_eq!(service.get_config().generation.quality, Quality::UltraHd);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[generation\nquality = ").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_invalid_custom_ratio_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\naspectRatio = \"Custom\"\n").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.get_config(), RootConfig::default());
    }
}
