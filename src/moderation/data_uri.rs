//! Data URI parsing and construction.
//!
//! Format: `data:<mimetype>;base64,<encoded_data>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Reasons a data URI is rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataUriError {
    #[error("imageDataUri must start with \"data:\"")]
    MissingPrefix,

    #[error("imageDataUri missing \";base64,\" part")]
    MissingBase64Marker,

    #[error("imageDataUri must include a MIME type")]
    MissingMimeType,

    #[error("imageDataUri has no data")]
    EmptyData,

    #[error("imageDataUri is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A parsed base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64 payload exactly as it appeared in the URI
    pub data: String,
}

impl DataUri {
    /// Parses and validates a data URI, reporting the first problem found.
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingPrefix)?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or(DataUriError::MissingBase64Marker)?;

        if mime_type.is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        if data.is_empty() {
            return Err(DataUriError::EmptyData);
        }
        STANDARD.decode(data)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Builds a data URI from raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Returns true if the MIME type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Size of the decoded payload in bytes, computed from the encoded length.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|&b| b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding.min(2))
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
