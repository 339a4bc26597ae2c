//! API utilities for frontend-backend communication
//!
//! Provides helpers for resolving the REST endpoints the host page hands us.

/// Get the base URL for API requests
///
/// The viewer is served by the same origin as the Log Query Service, so the
/// base is simply the current `protocol//host`.
///
/// # Returns
/// - Origin like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    format!("{}//{}", protocol, host)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/logs");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Use the configured endpoint when present, otherwise fall back to `default_path`
/// on the current origin
pub fn resolve_endpoint(configured: &str, default_path: &str) -> String {
    resolve_with_base(configured, default_path, &api_base())
}

fn resolve_with_base(configured: &str, default_path: &str, base: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        format!("{}{}", base, default_path)
    } else if configured.starts_with('/') {
        format!("{}{}", base, configured)
    } else {
        configured.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_endpoint() {
        let base = "https://example.test";
        assert_eq!(
            resolve_with_base("", "/api/logs", base),
            "https://example.test/api/logs"
        );
        assert_eq!(
            resolve_with_base("/wp-json/bbai/v1/logs", "/api/logs", base),
            "https://example.test/wp-json/bbai/v1/logs"
        );
        assert_eq!(
            resolve_with_base("https://other.test/logs", "/api/logs", base),
            "https://other.test/logs"
        );
    }
}
