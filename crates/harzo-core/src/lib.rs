//! Domain layer for Harzo Gen.
//!
//! Holds the value objects shared by every crate (settings, modes, history
//! entries, persona presets), the shared error type, and the port traits the
//! infrastructure and interaction layers implement.

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod image;
pub mod mode;
pub mod persona;
pub mod secret;
pub mod settings;
pub mod storage;

// Re-export common types
pub use error::{HarzoError, Result};
pub use generation::{GenerationError, ImageGenerator};
pub use history::{HistoryEntry, HistoryRepository};
pub use image::ImageHandle;
pub use mode::Mode;
pub use settings::{AspectRatio, GenerationSettings, Quality};
pub use storage::{BlobCodec, KeyValueStore};
