// Image payloads attached to SCREENSHOT and PAYMENT_PROOF requests.
//
// Images travel inline in the oracle request as base64 with a declared
// MIME type. They can come from a file on disk (the console and CLI) or
// from a data URL (what a browser file reader produces).

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Uploads larger than this are refused before any request is made.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME type assumed for bare base64 payloads.
const DEFAULT_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Load an image from disk, inferring the MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime = mime_type(path).with_context(|| {
            format!(
                "{} is not a supported image (expected png, jpg, jpeg, webp, heic or heif)",
                path.display()
            )
        })?;

        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;

        if data.len() > MAX_IMAGE_BYTES {
            anyhow::bail!(
                "{} is {} bytes; screenshots must be 5 MB or smaller",
                path.display(),
                data.len()
            );
        }

        Ok(Self::new(mime, data))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL. A bare base64 payload
    /// without the `data:` prefix is accepted as JPEG.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let url = url.trim();
        let (mime, payload) = match url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .context("Data URL is missing the ',' separator")?;
                let mime = header
                    .strip_suffix(";base64")
                    .context("Only base64 data URLs are supported")?;
                let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
                (mime, payload)
            }
            None => (DEFAULT_MIME, url),
        };

        let data = BASE64
            .decode(payload)
            .context("Image payload is not valid base64")?;

        if data.len() > MAX_IMAGE_BYTES {
            anyhow::bail!("Image is {} bytes; the limit is 5 MB", data.len());
        }

        Ok(Self::new(mime, data))
    }

    /// The payload as standard base64, ready for the request body.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}
