use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::AskError;

/// A file read out of the browser, ready for composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Base64-encoded file content paired with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaPayload {
    pub media_type: String,
    /// Standard base64 (RFC 4648, with padding).
    pub data: String,
}

/// One composed submission: the question plus the encoded attachment.
///
/// Built fresh per submission and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    pub prompt: String,
    pub media: MediaPayload,
}

/// Assemble the request payload from the form inputs.
///
/// Fails with `No file specified` when no file was picked. This check
/// runs before anything touches the network.
pub fn compose(prompt: &str, file: Option<PickedFile>) -> Result<AskRequest, AskError> {
    let file = file.ok_or_else(|| AskError::validation("No file specified"))?;

    Ok(AskRequest {
        prompt: prompt.to_string(),
        media: MediaPayload {
            media_type: file.media_type,
            data: STANDARD.encode(&file.bytes),
        },
    })
}

/// Decode a media payload back to raw bytes.
pub fn decode_media(payload: &MediaPayload) -> Result<Vec<u8>, AskError> {
    STANDARD
        .decode(&payload.data)
        .map_err(|e| AskError::unknown(format!("Invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_without_file_fails_with_exact_message() {
        let err = compose("what is this?", None).unwrap_err();
        assert_eq!(err, AskError::Validation("No file specified".to_string()));
        assert_eq!(err.to_string(), "No file specified");
    }

    #[test]
    fn test_compose_carries_prompt_and_media_type() {
        let file = PickedFile::new("photo.png", "image/png", vec![1, 2, 3]);
        let req = compose("describe the photo", Some(file)).unwrap();
        assert_eq!(req.prompt, "describe the photo");
        assert_eq!(req.media.media_type, "image/png");
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        let file = PickedFile::new("blob.bin", "application/octet-stream", bytes.clone());
        let req = compose("echo", Some(file)).unwrap();
        assert_eq!(decode_media(&req.media).unwrap(), bytes);
    }

    #[test]
    fn test_base64_round_trip_empty_file() {
        let file = PickedFile::new("empty.txt", "text/plain", Vec::new());
        let req = compose("empty", Some(file)).unwrap();
        assert_eq!(req.media.data, "");
        assert_eq!(decode_media(&req.media).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_known_encoding() {
        // "Man" encodes to "TWFu" in standard base64
        let file = PickedFile::new("m.txt", "text/plain", b"Man".to_vec());
        let req = compose("q", Some(file)).unwrap();
        assert_eq!(req.media.data, "TWFu");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let payload = MediaPayload {
            media_type: "text/plain".to_string(),
            data: "not base64!!".to_string(),
        };
        assert!(matches!(
            decode_media(&payload),
            Err(AskError::Unknown(_))
        ));
    }
}
