//! Configuration models.
//!
//! `config.toml` holds non-secret preferences; `secret.json` holds API keys.

use serde::{Deserialize, Serialize};

use crate::settings::GenerationSettings;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PRO_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Settings used when a session starts
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub gemini: GeminiModelConfig,
}

/// Endpoint and model selection for the Gemini API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiModelConfig {
    pub base_url: String,
    /// Model used for prompt enhancement
    pub text_model: String,
    /// Image model for Standard and HD quality
    pub image_model: String,
    /// Image model for Ultra HD quality
    pub pro_image_model: String,
}

impl Default for GeminiModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            pro_image_model: DEFAULT_PRO_IMAGE_MODEL.to_string(),
        }
    }
}

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
}
