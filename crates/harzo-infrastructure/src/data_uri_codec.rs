//! Data URI codec for uploaded and generated images.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use harzo_core::storage::DecodedBlob;
use harzo_core::{BlobCodec, HarzoError, ImageHandle, Result};

/// Encodes image bytes as `data:{mime};base64,{payload}` handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriCodec;

impl DataUriCodec {
    pub fn new() -> Self {
        Self
    }

    /// Reads a local image file and encodes it, guessing the mime type from
    /// the file extension.
    pub async fn encode_file(&self, path: &Path) -> Result<ImageHandle> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            HarzoError::io(format!("Failed to read image {}: {}", path.display(), e))
        })?;

        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");

        if !mime_type.starts_with("image/") {
            tracing::warn!(
                "[DataUriCodec] {} does not look like an image ({})",
                path.display(),
                mime_type
            );
        }

        Ok(self.encode(&bytes, mime_type))
    }

    /// Decodes a handle and writes its bytes to `path`.
    pub async fn save_to_file(&self, handle: &ImageHandle, path: &Path) -> Result<()> {
        let blob = self.decode(handle)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, &blob.bytes).await?;
        tracing::info!(
            "[DataUriCodec] Saved {} bytes ({}) to {}",
            blob.bytes.len(),
            blob.mime_type,
            path.display()
        );
        Ok(())
    }
}

impl BlobCodec for DataUriCodec {
    fn encode(&self, bytes: &[u8], mime_type: &str) -> ImageHandle {
        ImageHandle::from_base64(mime_type, &BASE64_STANDARD.encode(bytes))
    }

    fn decode(&self, handle: &ImageHandle) -> Result<DecodedBlob> {
        let mime_type = handle
            .mime_type()
            .ok_or_else(|| HarzoError::validation("image handle is not a data URI"))?;
        let payload = handle
            .payload()
            .ok_or_else(|| HarzoError::validation("image handle has no payload"))?;

        let bytes = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| HarzoError::validation(format!("invalid base64 payload: {e}")))?;

        Ok(DecodedBlob {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}
