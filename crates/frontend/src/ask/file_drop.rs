//! Ask - file picker with drag-and-drop

use crate::shared::icons::icon;
use contracts::ask::media;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Human-readable size for the file chip.
fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    }
}

#[component]
#[allow(non_snake_case)]
pub fn FileDropZone(
    /// Selected file, owned by the page view model
    file: RwSignal<Option<web_sys::File>, LocalStorage>,
    /// Blocks picking while a submission is in flight
    disabled: Signal<bool>,
) -> impl IntoView {
    let (drag_active, set_drag_active) = signal(false);
    let (pick_error, set_pick_error) = signal(Option::<String>::None);

    // Shared by the input change handler and the drop handler
    let store_pick = move |candidate: Option<web_sys::File>| {
        let Some(f) = candidate else {
            return;
        };
        match media::validate_pick(&f.name(), f.size() as u64) {
            Ok(()) => {
                set_pick_error.set(None);
                file.set(Some(f));
            }
            Err(e) => set_pick_error.set(Some(e.to_string())),
        }
    };

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            store_pick(input.files().and_then(|files| files.get(0)));
            // Clear input so the same file can be picked again after removal
            input.set_value("");
        }
    };

    let handle_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
        if disabled.get() {
            return;
        }
        store_pick(
            ev.data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0)),
        );
    };

    view! {
        <div class="file-drop">
            {move || match file.get() {
                Some(f) => {
                    let name = f.name();
                    let size = format_size(f.size() as u64);
                    let kind = media::kind_of(&name).map(|k| k.as_str()).unwrap_or("document");
                    view! {
                        <div class="file-drop__chip">
                            <span class="file-drop__chip-icon">{icon(kind)}</span>
                            <strong class="file-drop__chip-name">{name}</strong>
                            <span class="file-drop__chip-size">{format!("({})", size)}</span>
                            <button
                                class="file-drop__chip-remove"
                                title="Remove file"
                                disabled=move || disabled.get()
                                on:click=move |_| {
                                    file.set(None);
                                    set_pick_error.set(None);
                                }
                            >
                                {icon("close")}
                            </button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div
                            class=move || {
                                if drag_active.get() {
                                    "file-drop__zone file-drop__zone--active"
                                } else {
                                    "file-drop__zone"
                                }
                            }
                            on:dragover=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                if !disabled.get() {
                                    set_drag_active.set(true);
                                }
                            }
                            on:dragleave=move |_| set_drag_active.set(false)
                            on:drop=handle_drop
                        >
                            {icon("upload")}
                            <span>"Drop a file here, or"</span>
                            <label
                                class="button button--secondary file-drop__browse"
                                for="ask-file-input"
                            >
                                {icon("attach")}
                                " Browse"
                            </label>
                            <span class="file-drop__hint">
                                "documents, images, audio or video, up to 20 MB"
                            </span>
                        </div>
                    }
                        .into_any()
                }
            }}

            <input
                id="ask-file-input"
                type="file"
                accept=media::accept_attr()
                on:change=handle_file_select
                class="hidden"
                disabled=move || disabled.get()
            />

            {move || {
                pick_error
                    .get()
                    .map(|e| {
                        view! {
                            <div class="warning-box warning-box--error">
                                <span class="warning-box__icon">"⚠"</span>
                                <span class="warning-box__text">{e}</span>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
