//! Generation and view modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canned instruction used by [`Mode::Expand`].
pub const EXPAND_INSTRUCTION: &str = "expand the canvas and fill the edges seamlessly";

/// The five intents the studio can be in.
///
/// The mode decides which generation operation runs and which inputs must be
/// present before a request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Text-to-image
    #[default]
    Create,
    /// Instruction-driven edit of an uploaded image
    Transform,
    /// Restyle the person in an uploaded image as a persona
    Persona,
    /// Outpaint an uploaded image with a fixed instruction
    Expand,
    /// View-only browsing of past results
    History,
}

impl Mode {
    /// Whether a prompt (instruction text) must be supplied.
    pub fn requires_prompt(self) -> bool {
        matches!(self, Mode::Create | Mode::Transform | Mode::Persona)
    }

    /// Whether an uploaded source image must be supplied.
    pub fn requires_image(self) -> bool {
        matches!(self, Mode::Transform | Mode::Persona | Mode::Expand)
    }

    /// Whether this mode can trigger a generation at all.
    pub fn is_generative(self) -> bool {
        !matches!(self, Mode::History)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Transform => "transform",
            Mode::Persona => "persona",
            Mode::Expand => "expand",
            Mode::History => "history",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_requirements() {
        assert!(Mode::Create.requires_prompt());
        assert!(!Mode::Create.requires_image());

        for mode in [Mode::Transform, Mode::Persona] {
            assert!(mode.requires_prompt());
            assert!(mode.requires_image());
        }

        assert!(!Mode::Expand.requires_prompt());
        assert!(Mode::Expand.requires_image());

        assert!(!Mode::History.is_generative());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Persona).unwrap(), "\"persona\"");
        let mode: Mode = serde_json::from_str("\"expand\"").unwrap();
        assert_eq!(mode, Mode::Expand);
    }
}
