//! Self-describing image handles.
//!
//! Images travel through the application as data URIs
//! (`data:image/png;base64,...`), which can be displayed directly and saved
//! without knowing where they came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type attached to every generated image.
pub const GENERATED_IMAGE_MIME: &str = "image/png";

/// An opaque, self-describing reference to an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    /// Wraps an existing handle string without inspecting it.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Builds a data URI from an already base64-encoded payload.
    pub fn from_base64(mime_type: &str, data: &str) -> Self {
        Self(format!("data:{mime_type};base64,{data}"))
    }

    /// Returns the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the encoded payload: everything after the first comma.
    ///
    /// `None` when the handle has no comma or the payload is empty.
    pub fn payload(&self) -> Option<&str> {
        self.0
            .split_once(',')
            .map(|(_, data)| data)
            .filter(|data| !data.is_empty())
    }

    /// Returns the MIME type declared in a `data:` prefix, if any.
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split_once(',')?.0;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }

    /// Consumes the handle, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ImageHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ImageHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_builds_data_uri() {
        let handle = ImageHandle::from_base64(GENERATED_IMAGE_MIME, "QUJD");
        assert_eq!(handle.as_str(), "data:image/png;base64,QUJD");
        assert_eq!(handle.payload(), Some("QUJD"));
        assert_eq!(handle.mime_type(), Some("image/png"));
    }

    #[test]
    fn test_payload_splits_on_first_comma_only() {
        let handle = ImageHandle::new("data:image/jpeg;base64,AAA,BBB");
        assert_eq!(handle.payload(), Some("AAA,BBB"));
        assert_eq!(handle.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_opaque_handle_has_no_payload() {
        let handle = ImageHandle::new("img123");
        assert_eq!(handle.payload(), None);
        assert_eq!(handle.mime_type(), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let handle = ImageHandle::new("img123");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"img123\"");
    }
}
