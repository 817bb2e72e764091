//! Ask - View Component

use super::file_drop::FileDropZone;
use super::model::{generate_answer, read_picked_file};
use super::view_model::{AskPageVm, ResponseState};
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use crate::shared::icons::icon;
use crate::shared::markdown::MarkdownView;
use crate::shared::settings::{use_settings, SettingsPanel};
use contracts::ask::payload::compose;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn AskPage() -> impl IntoView {
    let vm = AskPageVm::new();
    let settings = use_settings();
    // Open the settings panel on first visit, before a key is stored
    let (show_settings, set_show_settings) = signal(!settings.has_api_key());

    let is_loading = Signal::derive(move || vm.is_loading());

    // Submit handler - using Callback to avoid move issues
    let handle_submit = Callback::new(move |_: ()| {
        if vm.is_loading() {
            return;
        }
        let prompt = vm.prompt.get();
        if prompt.trim().is_empty() {
            return;
        }

        let file = vm.file.get();
        let api_key = settings.api_key.get();
        let model = settings.model.get();

        vm.response.set(ResponseState::Loading);

        leptos::task::spawn_local(async move {
            // A missing file must fail in composition, before any
            // network activity
            let picked = match file {
                Some(f) => match read_picked_file(&f).await {
                    Ok(p) => Some(p),
                    Err(e) => {
                        log::error!("Failed to read picked file: {}", e);
                        vm.response.set(ResponseState::Failure(e.to_string()));
                        return;
                    }
                },
                None => None,
            };

            let request = match compose(&prompt, picked) {
                Ok(r) => r,
                Err(e) => {
                    vm.response.set(ResponseState::Failure(e.to_string()));
                    return;
                }
            };

            match generate_answer(&api_key, &model, &request).await {
                Ok(answer) => vm.response.set(ResponseState::Success(answer)),
                Err(e) => {
                    log::error!("generateContent request failed: {}", e);
                    vm.response.set(ResponseState::Failure(e.to_string()));
                }
            }
        });
    });

    let handle_clear = move |_| {
        if vm.is_loading() {
            return;
        }
        vm.clear();
    };

    view! {
        <div class="ask-page">
            <Flex
                justify=FlexJustify::SpaceBetween
                align=FlexAlign::Center
                style="margin-bottom: 16px;"
            >
                <h1 class="ask-page__title">"Media Q&A"</h1>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| set_show_settings.update(|open| *open = !*open)
                >
                    {icon("settings")}
                    " Settings"
                </Button>
            </Flex>

            <Show when=move || show_settings.get()>
                <SettingsPanel />
            </Show>

            <div class="ask-page__form">
                <FileDropZone file=vm.file disabled=is_loading />

                <Textarea
                    value=vm.prompt
                    placeholder="Ask a question about the attached file... (Ctrl+Enter to submit)"
                    attr:style="width: 100%; min-height: 80px; max-height: 240px; resize: vertical;"
                    attr:required=true
                    disabled=is_loading
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && ev.ctrl_key() {
                            ev.prevent_default();
                            handle_submit.run(());
                        }
                    }
                />

                <Flex justify=FlexJustify::End style="gap: 8px;">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_loading
                        on_click=handle_clear
                    >
                        {icon("close")}
                        " Clear"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=is_loading
                        on_click=move |_| handle_submit.run(())
                    >
                        {icon("send")}
                        {move || if vm.is_loading() { " Asking..." } else { " Ask" }}
                    </Button>
                </Flex>
            </div>

            <div class="ask-page__result">
                {move || match vm.response.get() {
                    ResponseState::Idle => {
                        view! {
                            <div class="ask-page__hint">
                                "Attach a file, type a question and press Ask."
                            </div>
                        }
                            .into_any()
                    }
                    ResponseState::Loading => {
                        view! {
                            <div class="ask-page__loading">
                                <Space gap=SpaceGap::Small>
                                    <Spinner />
                                    <span>"Waiting for the answer..."</span>
                                </Space>
                            </div>
                        }
                            .into_any()
                    }
                    ResponseState::Failure(e) => {
                        view! {
                            <div class="warning-box warning-box--error">
                                <span class="warning-box__icon">"⚠"</span>
                                <span class="warning-box__text">{e}</span>
                            </div>
                        }
                            .into_any()
                    }
                    ResponseState::Success(answer) => {
                        let mut meta_parts = Vec::new();
                        if let Some(t) = answer.total_tokens {
                            meta_parts.push(format!("🎫 {} tokens", t));
                        }
                        if let Some(m) = &answer.model {
                            meta_parts.push(format!("🤖 {}", m));
                        }
                        meta_parts.push(format!("⏱ {:.1}s", answer.duration_ms as f64 / 1000.0));
                        let copy_text = answer.text.clone();
                        let markdown_text = answer.text.clone();
                        view! {
                            <div class="answer-card">
                                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                                    <span class="answer-card__label">"Answer"</span>
                                    <CopyAnswerButton text=copy_text />
                                </Flex>
                                <MarkdownView text=markdown_text />
                                <div class="answer-card__meta">{meta_parts.join(" • ")}</div>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

/// Copy control for the answer text, flipping to a check mark briefly
/// after a successful copy.
#[component]
fn CopyAnswerButton(text: String) -> impl IntoView {
    let (copied, set_copied) = signal(false);
    let text_sv = StoredValue::new(text);

    let handle_copy = move |_| {
        let text = text_sv.get_value();
        copy_to_clipboard_with_callback(&text, move || {
            set_copied.set(true);
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(1500).await;
                set_copied.set(false);
            });
        });
    };

    view! {
        <Button appearance=ButtonAppearance::Subtle on_click=handle_copy>
            {move || if copied.get() { icon("check") } else { icon("copy") }}
            {move || if copied.get() { " Copied" } else { " Copy" }}
        </Button>
    }
}
