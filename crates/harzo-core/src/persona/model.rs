//! Persona preset model.

use serde::Serialize;

/// A static persona catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonaPreset {
    /// Stable identifier (kebab-case)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Canonical instruction text sent to the model
    pub prompt: &'static str,
    /// Icon token for the front end
    pub icon: &'static str,
}
