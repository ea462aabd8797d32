//! Secret service implementation.
//!
//! Reads API credentials from `secret.json`, optionally overridden by the
//! `GEMINI_API_KEY` environment variable.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use harzo_core::config::{GeminiConfig, SecretConfig};
use harzo_core::secret::SecretService;

use crate::paths::HarzoPaths;

/// Environment variable that overrides the Gemini key from `secret.json`.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for managing secret configuration.
///
/// The parsed file is cached after the first successful load.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service reading `secret.json` under the given paths.
    pub fn new(paths: &HarzoPaths) -> anyhow::Result<Self> {
        let path = paths
            .secret_file()
            .map_err(|e| anyhow::anyhow!("Failed to get secret path: {}", e))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            env_api_key: None,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Lets a non-empty `GEMINI_API_KEY` take precedence over the file.
    pub fn with_env_override(mut self) -> Self {
        self.env_api_key = std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        self
    }

    /// Resolves the Gemini API key, if any source provides a non-empty one.
    pub async fn gemini_api_key(&self) -> Option<String> {
        let secrets = self.load_secrets().await.ok()?;
        secrets
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty())
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|_| "secret cache lock poisoned".to_string())?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)
                .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
            serde_json::from_str::<SecretConfig>(&content)
                .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))?
        } else {
            SecretConfig::default()
        };

        if let Some(key) = &self.env_api_key {
            tracing::debug!("[SecretService] Using Gemini key from {}", GEMINI_API_KEY_ENV);
            loaded.gemini = Some(GeminiConfig {
                api_key: key.clone(),
            });
        }

        {
            let mut write_lock = self
                .secrets
                .write()
                .map_err(|_| "secret cache lock poisoned".to_string())?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}
