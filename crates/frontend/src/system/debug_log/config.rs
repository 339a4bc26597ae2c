use crate::shared::api_utils::resolve_endpoint;
use contracts::shared::debug_log::{DebugBootstrap, DebugStrings, LogsResponse};
use wasm_bindgen::JsValue;

/// Global the host page assigns before loading the bundle
pub const BOOTSTRAP_GLOBAL: &str = "BBAI_DEBUG";

const DEFAULT_LOGS_PATH: &str = "/api/logs";
const DEFAULT_CLEAR_PATH: &str = "/api/logs/clear";

/// Resolved viewer configuration, provided to the component tree via context
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub rest_logs: String,
    pub rest_clear: String,
    pub nonce: String,
    pub strings: DebugStrings,
    pub initial: Option<LogsResponse>,
}

impl ViewerConfig {
    pub fn from_bootstrap(bootstrap: DebugBootstrap) -> Self {
        Self {
            rest_logs: resolve_endpoint(&bootstrap.rest_logs, DEFAULT_LOGS_PATH),
            rest_clear: resolve_endpoint(&bootstrap.rest_clear, DEFAULT_CLEAR_PATH),
            nonce: bootstrap.nonce,
            strings: bootstrap.strings,
            initial: bootstrap.initial,
        }
    }

    /// Read `window.BBAI_DEBUG`; a missing or malformed global yields defaults
    pub fn from_window() -> Self {
        let bootstrap = web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(BOOTSTRAP_GLOBAL)).ok())
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| match serde_wasm_bindgen::from_value::<DebugBootstrap>(v) {
                Ok(b) => Some(b),
                Err(e) => {
                    log::warn!("ignoring malformed {}: {}", BOOTSTRAP_GLOBAL, e);
                    None
                }
            })
            .unwrap_or_default();

        Self::from_bootstrap(bootstrap)
    }
}
