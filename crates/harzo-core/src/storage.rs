//! Storage and encoding ports.
//!
//! Two narrow interfaces stand between the core and the host runtime:
//! a flat text key-value store for persistence, and a codec that turns raw
//! file bytes into self-describing image handles and back.

use crate::error::Result;
use crate::image::ImageHandle;

/// A flat key-value text store.
///
/// Writes replace the whole value for a key; a reader never observes a
/// partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Raw bytes recovered from an image handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Converts between raw image bytes and [`ImageHandle`]s.
pub trait BlobCodec: Send + Sync {
    /// Encodes bytes into a mime-prefixed handle.
    fn encode(&self, bytes: &[u8], mime_type: &str) -> ImageHandle;

    /// Decodes a handle back into its bytes and declared mime type.
    fn decode(&self, handle: &ImageHandle) -> Result<DecodedBlob>;
}
