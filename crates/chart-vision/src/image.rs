//! Image payload handling
//!
//! The boundary layer receives raw image bytes; providers want base64. Data
//! URLs (`data:image/png;base64,...`) appear on both sides: uploads arrive
//! as bytes and leave as a data URL bound into the result's `imageUrl`.

use crate::error::{Result, VisionError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// A base64-encoded image with its media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Media type (e.g., "image/png")
    pub media_type: String,
    /// Base64-encoded image data, without any data-URL prefix
    pub data: String,
}

impl ImageData {
    /// Encode raw image bytes
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            media_type: media_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Parse a `data:<media type>;base64,<data>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url.strip_prefix("data:").ok_or_else(|| {
            VisionError::InvalidRequest("image reference is not a data URL".to_string())
        })?;
        let (media_type, data) = rest.split_once(";base64,").ok_or_else(|| {
            VisionError::InvalidRequest("data URL is not base64-encoded".to_string())
        })?;

        if media_type.is_empty() {
            return Err(VisionError::InvalidRequest(
                "data URL has no media type".to_string(),
            ));
        }

        Ok(Self {
            media_type: media_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Render as a data URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// True for `image/*` media types
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_round_trip() {
        let image = ImageData::from_bytes("image/png", b"fake png bytes");
        assert_eq!(image.media_type, "image/png");

        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let parsed = ImageData::from_data_url(&url).unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn test_rejects_non_data_url() {
        assert!(ImageData::from_data_url("https://example.com/a.png").is_err());
        assert!(ImageData::from_data_url("data:image/png,plain").is_err());
        assert!(ImageData::from_data_url("data:;base64,AAAA").is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(ImageData::from_bytes("image/jpeg", b"x").is_image());
        assert!(!ImageData::from_bytes("application/pdf", b"x").is_image());
    }
}
