//! Local image file to data URL encoding.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Guess the MIME type of an image from its file extension.
///
/// Unknown extensions fall back to `application/octet-stream`; the service
/// will still attempt to decode the payload.
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Read a local image and encode it as a `data:` URL.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn image_to_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read image file: {}", path.display()))?;
    let encoded = STANDARD.encode(&bytes);

    Ok(format!("data:{};base64,{}", mime_from_extension(path), encoded))
}
