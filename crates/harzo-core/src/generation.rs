//! Generation client port.
//!
//! The application layer talks to the hosted image model only through
//! [`ImageGenerator`], so orchestration logic can be exercised with fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::image::ImageHandle;
use crate::settings::GenerationSettings;

/// Failures surfaced by a generation client.
///
/// `NoImage` is the domain failure: the upstream call succeeded but the
/// response carried no inline image. Every other variant is a transport,
/// authentication or decoding failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API key could be resolved from secrets or environment
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// The upstream rejected the credentials (401/403)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status returned by the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The source image handle is not a base64 data URI
    #[error("Invalid source image: {0}")]
    InvalidImage(String),

    /// The response was well-formed but held no inline image part
    #[error("No image was generated by {operation}")]
    NoImage { operation: &'static str },

    /// The response body could not be parsed
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GenerationError {
    /// Check if this is the "no image produced" domain failure
    pub fn is_no_image(&self) -> bool {
        matches!(self, Self::NoImage { .. })
    }

    /// Check if this failure happened before or during the HTTP exchange
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::Unauthorized(_) | Self::Transport(_) | Self::Api { .. }
        )
    }
}

/// A stateless façade over a hosted generative image model.
///
/// Each call is a single round trip. Implementations decode exactly one image
/// from the response or fail with [`GenerationError::NoImage`].
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Rewrites a short prompt into a detailed, cinematic description.
    ///
    /// Returns the original prompt unchanged when the model produces no
    /// usable text. Only transport-level failures are returned as errors.
    async fn enhance_prompt(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generates a new image from text.
    async fn generate_image(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError>;

    /// Edits an uploaded image according to an instruction.
    async fn transform_image(
        &self,
        source: &ImageHandle,
        instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError>;

    /// Reimagines the person in an uploaded image as a persona.
    async fn persona_transform(
        &self,
        source: &ImageHandle,
        persona_instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<ImageHandle, GenerationError>;
}
