//! Generation settings value object.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{HarzoError, Result};

/// Upper bound of the transformation strength percentage.
pub const MAX_STRENGTH: u8 = 100;

/// Output quality tier.
///
/// Higher tiers select a larger-output model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    Standard,
    #[default]
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "Ultra HD")]
    UltraHd,
}

impl Quality {
    /// Requested output resolution for this tier.
    pub fn image_size(self) -> &'static str {
        match self {
            Quality::UltraHd => "2K",
            Quality::Standard | Quality::Hd => "1K",
        }
    }

    /// Whether this tier needs the pro image model.
    pub fn is_ultra(self) -> bool {
        matches!(self, Quality::UltraHd)
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Standard => "Standard",
            Quality::Hd => "HD",
            Quality::UltraHd => "Ultra HD",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait,
    #[serde(rename = "9:16")]
    Story,
    #[serde(rename = "16:9")]
    Widescreen,
    Custom,
}

impl AspectRatio {
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
            AspectRatio::Story => "9:16",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Custom => "Custom",
        }
    }

    /// Ratio sent to the model. The API has no free-form ratio, so `Custom`
    /// is sent as 1:1.
    pub fn api_value(self) -> &'static str {
        match self {
            AspectRatio::Custom => AspectRatio::Square.label(),
            other => other.label(),
        }
    }

    /// Parses a label such as `"16:9"` or `"custom"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1:1" => Some(AspectRatio::Square),
            "4:5" => Some(AspectRatio::Portrait),
            "9:16" => Some(AspectRatio::Story),
            "16:9" => Some(AspectRatio::Widescreen),
            v if v.eq_ignore_ascii_case("custom") => Some(AspectRatio::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters that shape a single generation request.
///
/// A snapshot of this struct is stored with every history entry, so it is
/// cheap to clone and serializes with the same camelCase keys the history
/// payload uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub quality: Quality,
    pub aspect_ratio: AspectRatio,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<u32>,
    pub negative_prompt: String,
    /// Transformation strength in percent, always within 0..=100
    #[serde(deserialize_with = "deserialize_strength")]
    pub strength: u8,
    pub lighting: Option<String>,
    pub camera: Option<String>,
    pub face_enhancement: Option<bool>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            quality: Quality::Hd,
            aspect_ratio: AspectRatio::Square,
            custom_width: None,
            custom_height: None,
            negative_prompt: String::new(),
            strength: 50,
            lighting: Some("Cinematic".to_string()),
            camera: Some("Portrait lens".to_string()),
            face_enhancement: Some(true),
        }
    }
}

impl GenerationSettings {
    /// Clamps an arbitrary integer into the valid strength range.
    pub fn clamp_strength(value: i64) -> u8 {
        value.clamp(0, i64::from(MAX_STRENGTH)) as u8
    }

    /// Sets the strength, clamping it to 0..=100.
    pub fn set_strength(&mut self, value: i64) {
        self.strength = Self::clamp_strength(value);
    }

    /// Builder-style variant of [`set_strength`](Self::set_strength).
    pub fn with_strength(mut self, value: i64) -> Self {
        self.set_strength(value);
        self
    }

    /// Selects a custom aspect ratio with explicit dimensions.
    pub fn with_custom_size(mut self, width: u32, height: u32) -> Self {
        self.aspect_ratio = AspectRatio::Custom;
        self.custom_width = Some(width);
        self.custom_height = Some(height);
        self
    }

    /// Lighting label, falling back to the cinematic default.
    pub fn lighting_or_default(&self) -> &str {
        self.lighting.as_deref().unwrap_or("Cinematic")
    }

    /// Camera label, falling back to a generic high-resolution description.
    pub fn camera_or_default(&self) -> &str {
        self.camera.as_deref().unwrap_or("High-res")
    }

    /// Checks the cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.strength > MAX_STRENGTH {
            return Err(HarzoError::validation(format!(
                "strength must be within 0..={MAX_STRENGTH}, got {}",
                self.strength
            )));
        }

        if self.aspect_ratio == AspectRatio::Custom {
            match (self.custom_width, self.custom_height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => {}
                _ => {
                    return Err(HarzoError::validation(
                        "custom aspect ratio requires a positive width and height",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn deserialize_strength<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(GenerationSettings::clamp_strength(raw.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_studio_presets() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.quality, Quality::Hd);
        assert_eq!(settings.aspect_ratio, AspectRatio::Square);
        assert_eq!(settings.strength, 50);
        assert_eq!(settings.lighting.as_deref(), Some("Cinematic"));
        assert_eq!(settings.camera.as_deref(), Some("Portrait lens"));
        assert_eq!(settings.face_enhancement, Some(true));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_strength_is_clamped() {
        assert_eq!(GenerationSettings::default().with_strength(150).strength, 100);
        assert_eq!(GenerationSettings::default().with_strength(-3).strength, 0);
        assert_eq!(GenerationSettings::default().with_strength(42).strength, 42);
    }

    #[test]
    fn test_deserialize_clamps_out_of_range_strength() {
        let json = r#"{"quality":"HD","aspectRatio":"1:1","negativePrompt":"","strength":250}"#;
        let settings: GenerationSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.strength, 100);
    }

    #[test]
    fn test_custom_requires_positive_dimensions() {
        let mut settings = GenerationSettings {
            aspect_ratio: AspectRatio::Custom,
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());

        settings.custom_width = Some(1024);
        settings.custom_height = Some(0);
        assert!(settings.validate().is_err());

        let settings = GenerationSettings::default().with_custom_size(1024, 768);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_custom_is_sent_as_square() {
        assert_eq!(AspectRatio::Custom.api_value(), "1:1");
        assert_eq!(AspectRatio::Widescreen.api_value(), "16:9");
    }

    #[test]
    fn test_wire_names() {
        let settings = GenerationSettings {
            quality: Quality::UltraHd,
            aspect_ratio: AspectRatio::Story,
            ..Default::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["quality"], "Ultra HD");
        assert_eq!(value["aspectRatio"], "9:16");
        assert_eq!(value["negativePrompt"], "");
        assert_eq!(value["faceEnhancement"], true);
    }

    #[test]
    fn test_quality_image_size() {
        assert_eq!(Quality::Standard.image_size(), "1K");
        assert_eq!(Quality::Hd.image_size(), "1K");
        assert_eq!(Quality::UltraHd.image_size(), "2K");
    }

    #[test]
    fn test_parse_aspect_ratio() {
        assert_eq!(AspectRatio::parse("4:5"), Some(AspectRatio::Portrait));
        assert_eq!(AspectRatio::parse("CUSTOM"), Some(AspectRatio::Custom));
        assert_eq!(AspectRatio::parse("3:2"), None);
    }
}
