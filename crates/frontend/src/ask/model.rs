//! Ask - file reading and the generateContent call

use contracts::ask::error::AskError;
use contracts::ask::media;
use contracts::ask::payload::{AskRequest, PickedFile};
use contracts::ask::wire::{
    error_message_from_body, GenerateContentRequest, GenerateContentResponse,
};
use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A settled answer with its display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub model: Option<String>,
    pub total_tokens: Option<u32>,
    pub duration_ms: u64,
}

/// generateContent URL for a model.
pub fn endpoint_url(model: &str) -> String {
    format!("{}/models/{}:generateContent", API_BASE, model)
}

/// Read the picked file into memory.
///
/// The MIME type reported by the browser wins when present; otherwise
/// it is inferred from the extension.
pub async fn read_picked_file(file: &web_sys::File) -> Result<PickedFile, AskError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AskError::unknown(format!("Failed to read file: {:?}", e)))?;
    let array = js_sys::Uint8Array::new(&buffer);
    let mut bytes = vec![0; array.length() as usize];
    array.copy_to(&mut bytes);

    let name = file.name();
    let media_type = media::media_type_for(&name, &file.type_());
    Ok(PickedFile::new(name, media_type, bytes))
}

/// One POST to the generateContent endpoint.
pub async fn generate_answer(
    api_key: &str,
    model: &str,
    request: &AskRequest,
) -> Result<Answer, AskError> {
    if api_key.trim().is_empty() {
        return Err(AskError::validation(
            "API key is not set. Open Settings and paste your key.",
        ));
    }

    let wire = GenerateContentRequest::from_ask(request);
    log::debug!(
        "generateContent: model={}, media_type={}, payload={} base64 chars",
        model,
        request.media.media_type,
        request.media.data.len()
    );

    let started = js_sys::Date::now();

    let response = Request::post(&endpoint_url(model))
        .header("x-goog-api-key", api_key.trim())
        .json(&wire)
        .map_err(|e| AskError::transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| AskError::transport(format!("Failed to send request: {}", e)))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = error_message_from_body(&body).unwrap_or_else(|| format!("HTTP {}", status));
        log::warn!("generateContent failed: HTTP {}", status);
        return Err(AskError::transport(format!("Request failed: {}", detail)));
    }

    let parsed = response
        .json::<GenerateContentResponse>()
        .await
        .map_err(|e| AskError::unknown(format!("Failed to parse response: {}", e)))?;

    let duration_ms = (js_sys::Date::now() - started).max(0.0) as u64;
    answer_from_response(parsed, duration_ms)
}

/// Map a decoded response to the answer shown to the user.
fn answer_from_response(
    resp: GenerateContentResponse,
    duration_ms: u64,
) -> Result<Answer, AskError> {
    if let Some(reason) = resp.block_reason() {
        return Err(AskError::transport(format!(
            "Request was blocked by the service: {}",
            reason
        )));
    }

    let Some(text) = resp.primary_text() else {
        return Err(AskError::transport(
            "The service returned no answer text".to_string(),
        ));
    };

    Ok(Answer {
        text,
        model: resp.model_version.clone(),
        total_tokens: resp.total_tokens(),
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_answer_from_response() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "It is a cat." }] } }],
            "usageMetadata": { "totalTokenCount": 42 },
            "modelVersion": "gemini-2.5-flash",
        }))
        .unwrap();

        let answer = answer_from_response(resp, 1200).unwrap();
        assert_eq!(answer.text, "It is a cat.");
        assert_eq!(answer.total_tokens, Some(42));
        assert_eq!(answer.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(answer.duration_ms, 1200);
    }

    #[test]
    fn test_blocked_response_is_transport_error() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" },
        }))
        .unwrap();

        let err = answer_from_response(resp, 10).unwrap_err();
        assert!(matches!(err, AskError::Transport(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_empty_response_is_transport_error() {
        let err = answer_from_response(GenerateContentResponse::default(), 10).unwrap_err();
        assert!(matches!(err, AskError::Transport(_)));
        assert_eq!(err.to_string(), "The service returned no answer text");
    }
}
