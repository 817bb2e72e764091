//! Clipboard utilities for copying text to clipboard
//!
//! Thin wrapper over the Web Clipboard API. Write failures are
//! swallowed; the callback only runs on success.

use wasm_bindgen_futures::spawn_local;

/// Copy text to clipboard with a callback on success
///
/// Useful when you need to flip an indicator after copying.
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_success: F)
where
    F: FnOnce() + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            if wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text))
                .await
                .is_ok()
            {
                on_success();
            }
        }
    });
}
