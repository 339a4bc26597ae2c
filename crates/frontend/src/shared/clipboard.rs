//! Clipboard access through the Web Clipboard API

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Copy `text` and report whether the browser accepted it.
///
/// Empty text is not copied and reports `false` immediately.
pub fn copy_text<F>(text: String, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    if text.is_empty() {
        on_done(false);
        return;
    }
    let Some(window) = web_sys::window() else {
        on_done(false);
        return;
    };
    let clipboard = window.navigator().clipboard();
    spawn_local(async move {
        match JsFuture::from(clipboard.write_text(&text)).await {
            Ok(_) => on_done(true),
            Err(e) => {
                log::warn!("clipboard write failed: {:?}", e);
                on_done(false);
            }
        }
    });
}
