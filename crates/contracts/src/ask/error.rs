use thiserror::Error;

/// Errors surfaced by the form.
///
/// Every variant wraps the exact message shown to the user, so the
/// displayed text is always `err.to_string()` with nothing added.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AskError {
    /// Input rejected before any network activity (missing file, bad
    /// extension, oversized pick, missing API key).
    #[error("{0}")]
    Validation(String),

    /// The request left the browser and failed: network error, non-2xx
    /// status, or a service-side refusal (safety block, empty answer).
    #[error("{0}")]
    Transport(String),

    /// Anything that does not fit the taxonomy, e.g. a response body
    /// that cannot be decoded.
    #[error("{0}")]
    Unknown(String),
}

impl AskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AskError::Validation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        AskError::Transport(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        AskError::Unknown(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_verbatim() {
        assert_eq!(
            AskError::validation("No file specified").to_string(),
            "No file specified"
        );
        assert_eq!(
            AskError::transport("Request failed: 503").to_string(),
            "Request failed: 503"
        );
        assert_eq!(AskError::unknown("oops").to_string(), "oops");
    }
}
