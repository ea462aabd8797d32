//! Observable studio state.

use harzo_core::{GenerationSettings, HistoryEntry, ImageHandle, Mode};

/// Message shown when a generation round trip fails for any reason.
pub const GENERATION_FAILED_NOTICE: &str = "Generation failed. Please try again.";
pub const MISSING_PROMPT_NOTICE: &str = "Please enter a prompt first.";
pub const MISSING_IMAGE_NOTICE: &str = "Please upload an image first.";

/// Lifecycle of the current generation request.
///
/// Validation happens synchronously inside the reducer, so it never shows
/// up as a resting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Everything the presentation layer needs to render the studio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub mode: Mode,
    pub prompt: String,
    pub uploaded_image: Option<ImageHandle>,
    /// Id of the selected persona preset, if any
    pub persona_preset_id: Option<String>,
    pub settings: GenerationSettings,
    pub phase: Phase,
    pub enhancing: bool,
    /// Entry produced by the most recent successful generation
    pub last_result: Option<HistoryEntry>,
    /// Detail of the most recent failure, for logs and the CLI
    pub last_error: Option<String>,
    /// Newest-first copy of the persisted history
    pub history: Vec<HistoryEntry>,
    /// User-facing message (validation or failure)
    pub notice: Option<String>,
}

impl AppState {
    pub fn with_settings(settings: GenerationSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::InFlight
    }

    /// Image currently on display.
    pub fn displayed_image(&self) -> Option<&ImageHandle> {
        self.last_result.as_ref().map(|entry| &entry.image)
    }
}
