//! Inline-data encoding for listing images.
//!
//! Uploaded images are not stored in a bucket; they are embedded directly
//! in the row as `data:` URIs. Callers cap the per-listing count before
//! encoding.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::CoreError;

/// Read a file and encode it as a `data:{mime};base64,{payload}` URI.
///
/// The MIME type is inferred from the extension; unknown extensions fall
/// back to `application/octet-stream`.
pub async fn encode_file_as_inline_data(path: &Path) -> Result<String, CoreError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CoreError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mime = mime_for(path);
    debug!(path = %path.display(), mime, size = bytes.len(), "encoding image");
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
