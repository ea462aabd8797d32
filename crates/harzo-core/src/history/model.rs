//! History entry domain model.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::image::ImageHandle;
use crate::mode::Mode;
use crate::settings::GenerationSettings;

/// Immutable record of one successful generation and its inputs.
///
/// Field names on the wire (`url`, `type`, `personaStyle`) match the
/// persisted history payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Creation-time monotonic token (epoch milliseconds as decimal string)
    pub id: String,
    /// Result image as a self-describing handle
    #[serde(rename = "url")]
    pub image: ImageHandle,
    /// Prompt text at the time of generation
    pub prompt: String,
    /// Settings snapshot at the time of generation
    pub settings: GenerationSettings,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
    /// Mode that produced this result
    #[serde(rename = "type")]
    pub mode: Mode,
    /// Persona preset id, for persona results created from a preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_style: Option<String>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the given id and timestamp.
    pub fn new(
        id: impl Into<String>,
        image: ImageHandle,
        prompt: impl Into<String>,
        settings: GenerationSettings,
        timestamp: i64,
        mode: Mode,
    ) -> Self {
        Self {
            id: id.into(),
            image,
            prompt: prompt.into(),
            settings,
            timestamp,
            mode,
            persona_style: None,
        }
    }

    pub fn with_persona_style(mut self, persona_id: impl Into<String>) -> Self {
        self.persona_style = Some(persona_id.into());
        self
    }

    /// Suggested file name for saving the image.
    pub fn file_name(&self) -> String {
        format!("harzo-gen-{}.png", self.timestamp)
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Issues timestamp-derived ids that are strictly increasing.
///
/// Two generations finishing within the same millisecond (or a clock that
/// steps backwards) still receive distinct, ordered ids.
#[derive(Debug, Default)]
pub struct HistoryIdGenerator {
    last: AtomicU64,
}

impl HistoryIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for an entry created at `timestamp_millis`.
    pub fn next_id(&self, timestamp_millis: i64) -> String {
        let candidate = u64::try_from(timestamp_millis).unwrap_or(0);
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next.to_string(),
                Err(observed) => current = observed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> HistoryEntry {
        HistoryEntry::new(
            "1700000000000",
            ImageHandle::new("data:image/png;base64,QUJD"),
            "a red fox in snow",
            GenerationSettings::default(),
            1_700_000_000_000,
            Mode::Create,
        )
    }

    #[test]
    fn test_wire_format_uses_history_payload_names() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["url"], "data:image/png;base64,QUJD");
        assert_eq!(value["type"], "create");
        assert_eq!(value["timestamp"], 1_700_000_000_000_i64);
        assert!(value.get("personaStyle").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_entry() {
        let entry = sample_entry().with_persona_style("anime");
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_ids_are_strictly_increasing_within_same_millisecond() {
        let generator = HistoryIdGenerator::new();
        let a = generator.next_id(1_000);
        let b = generator.next_id(1_000);
        let c = generator.next_id(999);
        assert_eq!(a, "1000");
        assert_eq!(b, "1001");
        assert_eq!(c, "1002");
        assert_eq!(generator.next_id(5_000), "5000");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(sample_entry().file_name(), "harzo-gen-1700000000000.png");
    }
}
