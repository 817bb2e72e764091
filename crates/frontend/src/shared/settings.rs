//! Client settings for the application.
//!
//! Provides a context-based settings system holding the API key and the
//! model name. Both values are persisted in localStorage; the key never
//! leaves the browser except as the request auth header.

use leptos::prelude::*;
use web_sys::window;

const API_KEY_STORAGE_KEY: &str = "ask-api-key";
const MODEL_STORAGE_KEY: &str = "ask-model";

/// Models offered in the settings panel. The first entry is the default.
pub const MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-2.5-flash-lite",
];

pub fn default_model() -> &'static str {
    MODELS[0]
}

fn load_from_storage(key: &str) -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
        .filter(|v| !v.is_empty())
}

fn save_to_storage(key: &str, value: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        if value.is_empty() {
            let _ = storage.remove_item(key);
        } else {
            let _ = storage.set_item(key, value);
        }
    }
}

/// Settings context type.
#[derive(Clone, Copy)]
pub struct SettingsContext {
    pub api_key: RwSignal<String>,
    pub model: RwSignal<String>,
}

impl SettingsContext {
    /// Set the API key and persist to storage.
    pub fn set_api_key(&self, value: String) {
        save_to_storage(API_KEY_STORAGE_KEY, &value);
        self.api_key.set(value);
    }

    /// Set the model and persist to storage.
    pub fn set_model(&self, value: String) {
        save_to_storage(MODEL_STORAGE_KEY, &value);
        self.model.set(value);
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.get().trim().is_empty()
    }
}

/// Provides settings context to children components.
#[component]
pub fn SettingsProvider(children: Children) -> impl IntoView {
    let api_key = RwSignal::new(load_from_storage(API_KEY_STORAGE_KEY).unwrap_or_default());
    let model = RwSignal::new(
        load_from_storage(MODEL_STORAGE_KEY).unwrap_or_else(|| default_model().to_string()),
    );

    provide_context(SettingsContext { api_key, model });

    children()
}

/// Hook to use the settings context.
pub fn use_settings() -> SettingsContext {
    use_context::<SettingsContext>()
        .expect("SettingsContext not found. Wrap your app with SettingsProvider.")
}

/// Settings panel: API key input plus model selector.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = use_settings();

    view! {
        <div class="settings-panel">
            <div class="settings-panel__field">
                <label for="api-key-input">"API key"</label>
                <input
                    type="password"
                    id="api-key-input"
                    placeholder="paste your Google AI key"
                    autocomplete="off"
                    value=move || ctx.api_key.get()
                    on:input=move |ev| ctx.set_api_key(event_target_value(&ev))
                />
            </div>

            <div class="settings-panel__field">
                <label for="model-select">"Model"</label>
                <select
                    id="model-select"
                    prop:value=move || ctx.model.get()
                    on:change=move |ev| ctx.set_model(event_target_value(&ev))
                >
                    {MODELS
                        .iter()
                        .map(|m| {
                            let selected = move || ctx.model.get() == *m;
                            view! {
                                <option value=*m selected=selected>
                                    {*m}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <p class="settings-panel__hint">
                "The key is stored in this browser only and sent with each request as the auth header."
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_list_has_default() {
        assert!(MODELS.contains(&default_model()));
        assert_eq!(default_model(), "gemini-2.5-flash");
    }
}
