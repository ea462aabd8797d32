//! GeminiImageClient - Gemini REST implementation of [`ImageGenerator`].
//!
//! Every operation is a single `generateContent` round trip. Image
//! operations decode the first inline image of the first candidate.
//! Only text-to-image picks its model by quality tier and sends an
//! `imageConfig`; edits of an uploaded image always use the standard image
//! model and keep the source's framing.

use async_trait::async_trait;
use harzo_core::config::GeminiModelConfig;
use harzo_core::image::GENERATED_IMAGE_MIME;
use harzo_core::secret::SecretService;
use harzo_core::{GenerationError, GenerationSettings, ImageGenerator, ImageHandle};
use reqwest::{Client, StatusCode};

use crate::gemini_api::{
    Content, ErrorWrapper, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineDataPayload, Part, extract_image, extract_text,
};
use crate::prompts;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Image generation client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    config: GeminiModelConfig,
}

impl GeminiImageClient {
    /// Creates a client with the default endpoint and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, GeminiModelConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: GeminiModelConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    /// Overrides the API base URL (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Builds a client from the configured secrets.
    ///
    /// Fails with [`GenerationError::MissingApiKey`] when no non-empty key is
    /// available.
    pub async fn try_from_secret_service(
        service: &dyn SecretService,
        config: GeminiModelConfig,
    ) -> Result<Self, GenerationError> {
        let secrets = service.load_secrets().await.map_err(|e| {
            tracing::warn!("[Gemini] Failed to load secrets: {}", e);
            GenerationError::MissingApiKey
        })?;

        let api_key = secrets
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        Ok(Self::with_config(api_key, config))
    }

    pub fn config(&self) -> &GeminiModelConfig {
        &self.config
    }

    fn image_model(&self, settings: &GenerationSettings) -> &str {
        if settings.quality.is_ultra() {
            &self.config.pro_image_model
        } else {
            &self.config.image_model
        }
    }

    fn image_config(settings: &GenerationSettings) -> GenerationConfig {
        GenerationConfig {
            image_config: ImageConfig {
                aspect_ratio: settings.aspect_ratio.api_value().to_string(),
                image_size: settings.quality.image_size().to_string(),
            },
        }
    }

    fn source_part(source: &ImageHandle) -> Result<Part, GenerationError> {
        let data = source.payload().ok_or_else(|| {
            GenerationError::InvalidImage("image handle carries no base64 payload".to_string())
        })?;

        Ok(Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: source
                    .mime_type()
                    .unwrap_or(GENERATED_IMAGE_MIME)
                    .to_string(),
                data: data.to_string(),
            },
        })
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        );
        tracing::debug!("[Gemini] POST {}", url);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                GenerationError::Transport(format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| GenerationError::Decode(format!("Failed to parse Gemini response: {err}")))
    }

    async fn request_image(
        &self,
        operation: &'static str,
        model: &str,
        parts: Vec<Part>,
        generation_config: Option<GenerationConfig>,
    ) -> Result<ImageHandle, GenerationError> {
        match &generation_config {
            Some(config) => tracing::info!(
                "[Gemini] {} with {} ({}, {})",
                operation,
                model,
                config.image_config.image_size,
                config.image_config.aspect_ratio
            ),
            None => tracing::info!("[Gemini] {} with {}", operation, model),
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config,
        };

        let response = self.send_request(model, &request).await?;
        let image = extract_image(response.first_candidate_parts()).ok_or_else(|| {
            tracing::warn!("[Gemini] {} returned no inline image", operation);
            GenerationError::NoImage { operation }
        })?;

        let mime_type = image.mime_type.as_deref().unwrap_or(GENERATED_IMAGE_MIME);
        Ok(ImageHandle::from_base64(mime_type, &image.data))
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    async fn enhance_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::Text {
                text: prompts::enhance_prompt_text(prompt),
            }])],
            generation_config: None,
        };

        let model = self.config.text_model.clone();
        let response = self.send_request(&model, &request).await?;

        match extract_text(response.first_candidate_parts()) {
            Some(enhanced) => Ok(enhanced),
            None => {
                tracing::debug!("[Gemini] Enhancement returned no text; keeping prompt");
                Ok(prompt.to_string())
            }
        }
    }

    async fn generate_image(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError> {
        let parts = vec![Part::Text {
            text: prompts::generation_prompt(prompt, settings),
        }];
        let model = self.image_model(settings).to_string();
        self.request_image("generate", &model, parts, Some(Self::image_config(settings)))
            .await
    }

    async fn transform_image(
        &self,
        source: &ImageHandle,
        instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError> {
        let parts = vec![
            Self::source_part(source)?,
            Part::Text {
                text: prompts::transform_instruction(instruction, settings),
            },
        ];
        let model = self.config.image_model.clone();
        self.request_image("transform", &model, parts, None).await
    }

    async fn persona_transform(
        &self,
        source: &ImageHandle,
        persona_instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError> {
        let parts = vec![
            Self::source_part(source)?,
            Part::Text {
                text: prompts::persona_instruction(persona_instruction, settings),
            },
        ];
        let model = self.config.image_model.clone();
        self.request_image("persona", &model, parts, None).await
    }
}

fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Unauthorized(message),
        _ => GenerationError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
