use crate::system::debug_log::config::ViewerConfig;
use crate::system::debug_log::ui::list::DebugLogViewer;
use leptos::prelude::*;

#[component]
pub fn App(config: ViewerConfig) -> impl IntoView {
    // Strings, endpoints and nonce for every component of the panel
    provide_context(config);

    view! {
        <DebugLogViewer />
    }
}
