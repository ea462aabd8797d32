use std::sync::Arc;

use anyhow::{Context, Result};
use harzo_application::GenerationUseCase;
use harzo_core::GenerationSettings;
use harzo_core::config::RootConfig;
use harzo_infrastructure::{
    ConfigService, DataUriCodec, FileKeyValueStore, HarzoPaths, KeyValueHistoryStore,
    SecretServiceImpl,
};
use harzo_interaction::GeminiImageClient;

/// Services shared by every subcommand.
pub struct AppContext {
    pub paths: HarzoPaths,
    pub config: RootConfig,
    pub history: Arc<KeyValueHistoryStore>,
    pub codec: DataUriCodec,
}

impl AppContext {
    pub fn load(paths: HarzoPaths) -> Result<Self> {
        let config = ConfigService::new(&paths)?.get_config();

        let store_file = paths
            .store_file()
            .map_err(|e| anyhow::anyhow!("Failed to resolve store path: {}", e))?;
        let history = Arc::new(KeyValueHistoryStore::new(Arc::new(FileKeyValueStore::new(
            store_file,
        ))));

        Ok(Self {
            paths,
            config,
            history,
            codec: DataUriCodec::new(),
        })
    }

    /// Builds the Gemini client, creating a `secret.json` template on first use.
    pub async fn generator(&self) -> Result<GeminiImageClient> {
        let secret_path = self
            .paths
            .ensure_secret_file()
            .context("Failed to prepare secret.json")?;
        let secrets = SecretServiceImpl::new(&self.paths)?.with_env_override();

        GeminiImageClient::try_from_secret_service(&secrets, self.config.gemini.clone())
            .await
            .with_context(|| {
                format!(
                    "Set gemini.api_key in {} or export GEMINI_API_KEY",
                    secret_path.display()
                )
            })
    }

    /// Creates a studio session that starts from `settings`.
    pub async fn usecase(&self, settings: GenerationSettings) -> Result<GenerationUseCase> {
        let generator = Arc::new(self.generator().await?);
        let usecase = GenerationUseCase::new(generator, self.history.clone())
            .with_codec(Arc::new(self.codec))
            .with_settings(settings);
        usecase.load_history().await;
        Ok(usecase)
    }
}
