pub mod app;
pub mod shared;
pub mod system;

use app::App;
use leptos::prelude::*;
use system::debug_log::config::ViewerConfig;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

/// Host element the panel renders into
pub const MOUNT_SELECTOR: &str = "[data-bbai-debug-panel]";

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(MOUNT_SELECTOR).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        log::debug!("no {} element on this page; debug log panel not mounted", MOUNT_SELECTOR);
        return;
    };

    let config = ViewerConfig::from_window();
    let handle = leptos::mount::mount_to(root, move || view! { <App config=config /> });
    handle.forget();
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
