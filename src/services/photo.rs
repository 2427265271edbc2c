// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo upload gate and data-URI encoding.
//!
//! Photos are kept inline as `data:<mime>;base64,<payload>` strings in the
//! run and profile records, so every photo passes a fixed size check
//! before it is accepted.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Largest accepted photo, in bytes (5 MB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Alert shown when a photo is over the limit.
pub const PHOTO_TOO_LARGE_MESSAGE: &str = "Файл слишком большой. Максимум 5MB.";

/// MIME type assumed when the upload does not name one.
pub const DEFAULT_PHOTO_MIME: &str = "image/jpeg";

/// A decoded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    /// Accept raw upload bytes, enforcing the size limit.
    pub fn from_upload(bytes: Vec<u8>, mime: Option<&str>) -> Result<Self, PhotoError> {
        check_size(bytes.len())?;
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }

        let mime = mime
            .map(|m| m.split(';').next().unwrap_or("").trim())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_PHOTO_MIME);

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// Parse and size-check a `data:` URI produced by [`Photo::to_data_url`].
    pub fn from_data_url(url: &str) -> Result<Self, PhotoError> {
        let rest = url.strip_prefix("data:").ok_or(PhotoError::InvalidDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(PhotoError::InvalidDataUrl)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(PhotoError::InvalidDataUrl)?;

        // Reject on the encoded length first so oversized payloads are never
        // decoded. The decoded length is checked again by `from_upload`.
        let payload = payload.trim();
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        check_size((payload.len() / 4 * 3).saturating_sub(padding))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| PhotoError::InvalidBase64(e.to_string()))?;

        Self::from_upload(bytes, Some(mime))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Validate an optional data URI field, returning it unchanged when valid.
pub fn validate_data_url(url: Option<String>) -> Result<Option<String>, PhotoError> {
    match url {
        Some(url) if !url.is_empty() => {
            Photo::from_data_url(&url)?;
            Ok(Some(url))
        }
        _ => Ok(None),
    }
}

fn check_size(len: usize) -> Result<(), PhotoError> {
    if len > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge { size: len });
    }
    Ok(())
}

/// Errors from photo validation.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Photo is {size} bytes, limit is {MAX_PHOTO_BYTES}")]
    TooLarge { size: usize },

    #[error("Photo is empty")]
    Empty,

    #[error("Photo must be a base64 data URI")]
    InvalidDataUrl,

    #[error("Photo payload is not valid base64: {0}")]
    InvalidBase64(String),
}

impl PhotoError {
    /// Text for the user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            PhotoError::TooLarge { .. } => PHOTO_TOO_LARGE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: usize = 1024 * 1024;

    #[test]
    fn test_six_megabyte_upload_is_rejected() {
        let err = Photo::from_upload(vec![0u8; 6 * MB], Some("image/png")).unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { size } if size == 6 * MB));
        assert_eq!(err.user_message(), PHOTO_TOO_LARGE_MESSAGE);
    }

    #[test]
    fn test_four_megabyte_upload_is_encoded() {
        let photo = Photo::from_upload(vec![7u8; 4 * MB], Some("image/png")).unwrap();
        let url = photo.to_data_url();

        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(Photo::from_data_url(&url).unwrap(), photo);
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(Photo::from_upload(vec![1u8; MAX_PHOTO_BYTES], None).is_ok());
        assert!(Photo::from_upload(vec![1u8; MAX_PHOTO_BYTES + 1], None).is_err());
    }

    #[test]
    fn test_data_url_at_limit_is_accepted() {
        // 5 MiB is not a multiple of 3, so the encoding ends in padding.
        let photo = Photo::from_upload(vec![1u8; MAX_PHOTO_BYTES], None).unwrap();
        let url = photo.to_data_url();
        assert!(url.ends_with('='));

        assert_eq!(Photo::from_data_url(&url).unwrap(), photo);
        assert_eq!(validate_data_url(Some(url.clone())).unwrap(), Some(url));

        let over = Photo {
            mime: DEFAULT_PHOTO_MIME.to_string(),
            bytes: vec![1u8; MAX_PHOTO_BYTES + 1],
        };
        assert!(matches!(
            Photo::from_data_url(&over.to_data_url()),
            Err(PhotoError::TooLarge { size }) if size == MAX_PHOTO_BYTES + 1
        ));
    }

    #[test]
    fn test_mime_defaults_and_parameters() {
        let photo = Photo::from_upload(vec![1, 2, 3], None).unwrap();
        assert_eq!(photo.mime, "image/jpeg");

        let photo = Photo::from_upload(vec![1, 2, 3], Some("image/webp; q=1")).unwrap();
        assert_eq!(photo.mime, "image/webp");
    }

    #[test]
    fn test_invalid_data_urls() {
        assert!(matches!(
            Photo::from_data_url("http://example.com/a.jpg"),
            Err(PhotoError::InvalidDataUrl)
        ));
        assert!(matches!(
            Photo::from_data_url("data:image/jpeg,plain"),
            Err(PhotoError::InvalidDataUrl)
        ));
        assert!(matches!(
            Photo::from_data_url("data:image/jpeg;base64,@@@"),
            Err(PhotoError::InvalidBase64(_))
        ));
        assert!(matches!(Photo::from_upload(vec![], None), Err(PhotoError::Empty)));
    }

    #[test]
    fn test_validate_data_url_field() {
        assert_eq!(validate_data_url(None).unwrap(), None);
        assert_eq!(validate_data_url(Some(String::new())).unwrap(), None);

        let url = Photo::from_upload(vec![9; 16], None).unwrap().to_data_url();
        assert_eq!(validate_data_url(Some(url.clone())).unwrap(), Some(url));

        let big = format!("data:image/jpeg;base64,{}", "A".repeat(8 * MB));
        assert!(matches!(
            validate_data_url(Some(big)),
            Err(PhotoError::TooLarge { .. })
        ));
    }
}
