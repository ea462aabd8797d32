//! Inputs to the studio reducer.

use harzo_core::{GenerationSettings, HistoryEntry, ImageHandle, Mode};

/// A user action or the outcome of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SwitchMode(Mode),
    EditPrompt(String),
    UploadImage(ImageHandle),
    /// Selects a persona preset by id and copies its instruction into the prompt
    SelectPersona(String),
    UpdateSettings(GenerationSettings),
    /// The generate button
    Generate,
    GenerationSucceeded(HistoryEntry),
    GenerationFailed(String),
    EnhancePrompt,
    PromptEnhanced(String),
    EnhanceFailed(String),
    DismissResult,
    DeleteEntry(String),
    ClearHistory,
    HistoryRefreshed(Vec<HistoryEntry>),
}
