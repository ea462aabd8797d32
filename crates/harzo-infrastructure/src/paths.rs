//! Unified path management for Harzo configuration and data files.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "harzo";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Harzo.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/harzo/             # Config directory
/// ├── config.toml              # Preferences and model selection
/// ├── secret.json              # API keys
/// ├── store.json               # Key-value store (generation history)
/// └── logs/                    # Application logs
///     └── harzo.log.YYYY-MM-DD
/// ```
///
/// A base directory override replaces `~/.config/harzo/` entirely, which is
/// how tests and the CLI `--home` flag isolate their files.
#[derive(Debug, Clone)]
pub struct HarzoPaths {
    base: Option<PathBuf>,
}

impl HarzoPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the Harzo configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the path to the key-value store file.
    pub fn store_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("store.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// On Unix the new file is restricted to user read/write (600).
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        use harzo_core::config::{GeminiConfig, SecretConfig};

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
            }),
        };

        let template_json =
            serde_json::to_string_pretty(&template_config).map_err(std::io::Error::other)?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

impl Default for HarzoPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        if let Ok(dir) = HarzoPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn test_base_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HarzoPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path());
        assert!(paths.config_file().unwrap().ends_with("config.toml"));
        assert!(paths.secret_file().unwrap().ends_with("secret.json"));
        assert!(paths.store_file().unwrap().ends_with("store.json"));
        assert!(paths.logs_dir().unwrap().starts_with(temp_dir.path()));
    }

    #[test]
    fn test_ensure_secret_file_creates_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HarzoPaths::new(Some(&temp_dir.path().join("nested")));

        let path = paths.ensure_secret_file().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("api_key"));

        std::fs::write(&path, r#"{"gemini":{"api_key":"kept"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));
    }
}
