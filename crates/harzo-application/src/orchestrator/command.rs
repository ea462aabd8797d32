//! Side effects requested by the studio reducer.

use harzo_core::mode::EXPAND_INSTRUCTION;
use harzo_core::{GenerationSettings, HistoryEntry, ImageHandle, Mode};

/// A validated generation request, captured at trigger time.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub prompt: String,
    pub source: Option<ImageHandle>,
    pub settings: GenerationSettings,
    pub persona_preset_id: Option<String>,
}

impl GenerationRequest {
    /// Text sent to the model alongside the source image.
    ///
    /// Expand ignores the prompt and uses its canned instruction.
    pub fn instruction(&self) -> &str {
        match self.mode {
            Mode::Expand => EXPAND_INSTRUCTION,
            _ => &self.prompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate(GenerationRequest),
    EnhancePrompt(String),
    PersistEntry(HistoryEntry),
    RemoveEntry(String),
    ClearHistory,
    RefreshHistory,
}
