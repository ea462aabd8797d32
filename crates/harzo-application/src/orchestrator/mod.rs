//! Request orchestration as an explicit state machine.

mod command;
mod event;
mod state;
mod transition;

pub use command::{Command, GenerationRequest};
pub use event::Event;
pub use state::{
    AppState, GENERATION_FAILED_NOTICE, MISSING_IMAGE_NOTICE, MISSING_PROMPT_NOTICE, Phase,
};
pub use transition::{history_entry, transition};
