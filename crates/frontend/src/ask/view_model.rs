//! Ask - View Model

use super::model::Answer;
use leptos::prelude::*;

/// Submission lifecycle of the form.
///
/// Exactly one variant is active at any time, so a spinner and a stale
/// answer can never show together.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseState {
    Idle,
    Loading,
    Success(Answer),
    Failure(String),
}

impl ResponseState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResponseState::Loading)
    }
}

#[derive(Clone, Copy)]
pub struct AskPageVm {
    pub prompt: RwSignal<String>,
    /// JS file handles are not Send, so the signal lives in local storage.
    pub file: RwSignal<Option<web_sys::File>, LocalStorage>,
    pub response: RwSignal<ResponseState>,
}

impl AskPageVm {
    pub fn new() -> Self {
        Self {
            prompt: RwSignal::new(String::new()),
            file: RwSignal::new_local(None),
            response: RwSignal::new(ResponseState::Idle),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.response.with(|r| r.is_loading())
    }

    /// Reset the form and return the response area to idle.
    pub fn clear(&self) {
        self.prompt.set(String::new());
        self.file.set(None);
        self.response.set(ResponseState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loading_reports_in_flight() {
        assert!(!ResponseState::Idle.is_loading());
        assert!(ResponseState::Loading.is_loading());
        assert!(!ResponseState::Failure("x".to_string()).is_loading());
        let answer = Answer {
            text: "ok".to_string(),
            model: None,
            total_tokens: None,
            duration_ms: 0,
        };
        assert!(!ResponseState::Success(answer).is_loading());
    }

    #[test]
    fn test_clear_resets_from_failure() {
        let vm = AskPageVm::new();
        vm.prompt.set("why is the sky blue?".to_string());
        vm.response
            .set(ResponseState::Failure("No file specified".to_string()));

        vm.clear();

        assert_eq!(vm.prompt.get_untracked(), "");
        assert!(vm.file.get_untracked().is_none());
        assert_eq!(vm.response.get_untracked(), ResponseState::Idle);
        assert!(!vm.is_loading());
    }

    #[test]
    fn test_clear_resets_from_success() {
        let vm = AskPageVm::new();
        vm.prompt.set("describe".to_string());
        vm.response.set(ResponseState::Success(Answer {
            text: "a cat".to_string(),
            model: Some("gemini-2.5-flash".to_string()),
            total_tokens: Some(12),
            duration_ms: 900,
        }));

        vm.clear();

        assert_eq!(vm.prompt.get_untracked(), "");
        assert_eq!(vm.response.get_untracked(), ResponseState::Idle);
    }
}
