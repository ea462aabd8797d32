//! Application layer for Harzo Gen.
//!
//! Coordinates the generation client and the history store behind a
//! reducer-driven state machine.

pub mod generation_usecase;
pub mod orchestrator;

pub use generation_usecase::GenerationUseCase;
pub use orchestrator::{AppState, Command, Event, Phase, transition};
