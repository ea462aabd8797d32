//! Built-in persona and settings presets.

use super::model::PersonaPreset;

/// Persona presets offered in persona mode.
pub const PERSONA_PRESETS: &[PersonaPreset] = &[
    PersonaPreset {
        id: "superhero",
        name: "Superhero",
        prompt: "a powerful cinematic superhero with an intricate glowing costume",
        icon: "fa-mask",
    },
    PersonaPreset {
        id: "anime",
        name: "Anime",
        prompt: "high-quality modern anime style character portrait, vibrant colors",
        icon: "fa-palette",
    },
    PersonaPreset {
        id: "cyberpunk",
        name: "Cyberpunk",
        prompt: "cyberpunk futuristic nomad with neon augmentations and street wear",
        icon: "fa-robot",
    },
    PersonaPreset {
        id: "knight",
        name: "Medieval Knight",
        prompt: "a royal medieval knight in ornate shining silver armor",
        icon: "fa-shield-halved",
    },
    PersonaPreset {
        id: "fantasy-elf",
        name: "Fantasy Elf",
        prompt: "ethereal fantasy elf with mystical aura and woodland garments",
        icon: "fa-leaf",
    },
    PersonaPreset {
        id: "villain",
        name: "Dark Villain",
        prompt: "intimidating dark villain with shadowy energy and dramatic lighting",
        icon: "fa-ghost",
    },
];

pub const STYLE_PRESETS: &[&str] = &[
    "Realistic",
    "Anime",
    "Pixar 3D",
    "Cyberpunk",
    "Watercolor",
    "Oil Painting",
    "Sketch",
    "Cinematic",
    "Hyper Realistic",
    "Fantasy",
    "Dark Gothic",
    "Minimalist",
    "Vintage Film",
];

pub const LIGHTING_PRESETS: &[&str] = &["Soft", "Studio", "Sunset", "Neon", "Dramatic", "Golden hour"];

pub const CAMERA_PRESETS: &[&str] = &[
    "DSLR",
    "Cinematic lens",
    "Drone shot",
    "Macro",
    "Wide angle",
    "Portrait lens",
];

/// Looks up a persona preset by id.
pub fn find_persona_preset(id: &str) -> Option<&'static PersonaPreset> {
    PERSONA_PRESETS.iter().find(|preset| preset.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_preset_ids_are_unique() {
        let ids: HashSet<_> = PERSONA_PRESETS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PERSONA_PRESETS.len());
    }

    #[test]
    fn test_find_persona_preset() {
        let knight = find_persona_preset("knight").unwrap();
        assert_eq!(knight.name, "Medieval Knight");
        assert!(find_persona_preset("pirate").is_none());
    }
}
