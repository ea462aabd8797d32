//! The studio reducer.
//!
//! [`transition`] is pure: it never touches the network or storage. Work that
//! has side effects is returned as [`Command`]s for the caller to execute, and
//! their outcomes come back as further [`Event`]s.

use harzo_core::persona::find_persona_preset;
use harzo_core::settings::MAX_STRENGTH;
use harzo_core::{HarzoError, HistoryEntry, ImageHandle, Mode};

use super::command::{Command, GenerationRequest};
use super::event::Event;
use super::state::{
    AppState, GENERATION_FAILED_NOTICE, MISSING_IMAGE_NOTICE, MISSING_PROMPT_NOTICE, Phase,
};

/// Applies one event, returning the next state and the commands it requests.
pub fn transition(state: AppState, event: Event) -> (AppState, Vec<Command>) {
    let mut next = state;

    let commands = match event {
        Event::SwitchMode(mode) => {
            if mode != Mode::Persona {
                next.persona_preset_id = None;
            }
            next.mode = mode;
            next.notice = None;
            next.last_result = None;
            if !next.is_in_flight() {
                next.phase = Phase::Idle;
            }
            Vec::new()
        }
        Event::EditPrompt(prompt) => {
            // A hand-edited persona no longer belongs to the selected preset.
            let still_preset = next
                .persona_preset_id
                .as_deref()
                .and_then(find_persona_preset)
                .is_some_and(|preset| preset.prompt == prompt);
            if !still_preset {
                next.persona_preset_id = None;
            }
            next.prompt = prompt;
            Vec::new()
        }
        Event::UploadImage(image) => {
            next.uploaded_image = Some(image);
            next.notice = None;
            Vec::new()
        }
        Event::SelectPersona(id) => match find_persona_preset(&id) {
            Some(preset) => {
                next.persona_preset_id = Some(preset.id.to_string());
                next.prompt = preset.prompt.to_string();
                Vec::new()
            }
            None => {
                tracing::warn!("[Orchestrator] Unknown persona preset: {}", id);
                Vec::new()
            }
        },
        Event::UpdateSettings(mut settings) => {
            settings.strength = settings.strength.min(MAX_STRENGTH);
            next.settings = settings;
            Vec::new()
        }
        Event::Generate => return begin_generation(next),
        Event::GenerationSucceeded(entry) => {
            next.phase = Phase::Succeeded;
            next.notice = None;
            next.last_error = None;
            next.last_result = Some(entry.clone());
            vec![Command::PersistEntry(entry), Command::RefreshHistory]
        }
        Event::GenerationFailed(detail) => {
            next.phase = Phase::Failed;
            next.notice = Some(GENERATION_FAILED_NOTICE.to_string());
            next.last_error = Some(detail);
            Vec::new()
        }
        Event::EnhancePrompt => {
            if next.enhancing || next.prompt.trim().is_empty() {
                Vec::new()
            } else {
                next.enhancing = true;
                vec![Command::EnhancePrompt(next.prompt.clone())]
            }
        }
        Event::PromptEnhanced(prompt) => {
            next.enhancing = false;
            next.prompt = prompt;
            Vec::new()
        }
        Event::EnhanceFailed(_) => {
            next.enhancing = false;
            Vec::new()
        }
        Event::DismissResult => {
            next.last_result = None;
            next.notice = None;
            if !next.is_in_flight() {
                next.phase = Phase::Idle;
            }
            Vec::new()
        }
        Event::DeleteEntry(id) => {
            next.history.retain(|entry| entry.id != id);
            vec![Command::RemoveEntry(id), Command::RefreshHistory]
        }
        Event::ClearHistory => {
            next.history.clear();
            vec![Command::ClearHistory, Command::RefreshHistory]
        }
        Event::HistoryRefreshed(entries) => {
            next.history = entries;
            Vec::new()
        }
    };

    (next, commands)
}

fn begin_generation(mut state: AppState) -> (AppState, Vec<Command>) {
    if state.is_in_flight() || state.mode == Mode::History {
        return (state, Vec::new());
    }

    if let Err(notice) = validate(&state) {
        state.notice = Some(notice);
        return (state, Vec::new());
    }

    let request = GenerationRequest {
        mode: state.mode,
        prompt: state.prompt.clone(),
        source: state.uploaded_image.clone(),
        settings: state.settings.clone(),
        persona_preset_id: match state.mode {
            Mode::Persona => state.persona_preset_id.clone(),
            _ => None,
        },
    };

    state.phase = Phase::InFlight;
    state.notice = None;
    state.last_error = None;
    (state, vec![Command::Generate(request)])
}

fn validate(state: &AppState) -> Result<(), String> {
    if state.mode.requires_image() && state.uploaded_image.is_none() {
        return Err(MISSING_IMAGE_NOTICE.to_string());
    }
    if state.mode.requires_prompt() && state.prompt.trim().is_empty() {
        return Err(MISSING_PROMPT_NOTICE.to_string());
    }
    state.settings.validate().map_err(|e| match e {
        HarzoError::Validation(message) => message,
        other => other.to_string(),
    })
}

/// Builds the history record for a finished request.
pub fn history_entry(
    id: String,
    request: &GenerationRequest,
    image: ImageHandle,
    timestamp: i64,
) -> HistoryEntry {
    let entry = HistoryEntry::new(
        id,
        image,
        request.prompt.clone(),
        request.settings.clone(),
        timestamp,
        request.mode,
    );
    match &request.persona_preset_id {
        Some(persona) => entry.with_persona_style(persona.clone()),
        None => entry,
    }
}
