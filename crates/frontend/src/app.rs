use crate::ask::AskPage;
use crate::shared::settings::SettingsProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SettingsProvider>
            <AskPage />
        </SettingsProvider>
    }
}
