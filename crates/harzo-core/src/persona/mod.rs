//! Persona preset catalog.
//!
//! Read-only reference data: persona presets used by persona mode, and the
//! style, lighting and camera label lists offered by the settings panel.

mod model;
mod preset;

// Re-export public API
pub use model::PersonaPreset;
pub use preset::{
    CAMERA_PRESETS, LIGHTING_PRESETS, PERSONA_PRESETS, STYLE_PRESETS, find_persona_preset,
};
