//! Interaction layer for Harzo.
//!
//! Talks to the hosted Gemini models and turns their responses into
//! [`harzo_core::ImageHandle`]s.

pub mod gemini_api;
pub mod gemini_image_client;
pub mod prompts;

pub use gemini_api::{extract_image, extract_text};
pub use gemini_image_client::GeminiImageClient;
