use axum::extract::State;
use axum::response::Html;
use contracts::shared::debug_log::{DebugBootstrap, DebugStrings, LogsQuery};

use super::error::ApiError;
use crate::routes::AppState;
use crate::shared::debug_log::{query::LogFilter, repository};

pub const LOGS_PATH: &str = "/api/logs";
pub const CLEAR_PATH: &str = "/api/logs/clear";

/// Used when the frontend bundle has no index.html yet
const FALLBACK_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <title>Debug Logs</title>
</head>
<body>
    <div data-bbai-debug-panel></div>
</body>
</html>
"#;

/// JSON for an inline `<script>`; `</` is escaped so no value can close the tag
pub fn bootstrap_script(bootstrap: &DebugBootstrap) -> anyhow::Result<String> {
    let json = serde_json::to_string(bootstrap)?.replace("</", "<\\/");
    Ok(format!("<script>window.BBAI_DEBUG = {};</script>", json))
}

/// Inject the bootstrap script right before `</head>`, or at the top when absent
pub fn render_host_page(template: &str, bootstrap: &DebugBootstrap) -> anyhow::Result<String> {
    let script = bootstrap_script(bootstrap)?;
    let page = match template.find("</head>") {
        Some(pos) => {
            let mut page = String::with_capacity(template.len() + script.len());
            page.push_str(&template[..pos]);
            page.push_str(&script);
            page.push_str(&template[pos..]);
            page
        }
        None => format!("{}{}", script, template),
    };
    Ok(page)
}

/// GET /
///
/// The page carries the first page of logs so the panel renders without a
/// round-trip. The embedded nonce works like a WordPress REST nonce: any
/// same-origin page may read it, and the router sends no CORS headers for
/// this route, so other origins cannot.
pub async fn host_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let snapshot = repository::get_logs(&LogFilter::from_query(&LogsQuery::default())).await?;

    let bootstrap = DebugBootstrap {
        rest_logs: LOGS_PATH.to_string(),
        rest_clear: CLEAR_PATH.to_string(),
        nonce: state.token.to_string(),
        initial: Some(snapshot),
        strings: DebugStrings::default(),
    };

    let index_path = state.dist_dir.join("index.html");
    let template = match tokio::fs::read_to_string(&index_path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                "{} not readable ({}), serving the built-in page",
                index_path.display(),
                e
            );
            FALLBACK_TEMPLATE.to_string()
        }
    };

    Ok(Html(render_host_page(&template, &bootstrap)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> DebugBootstrap {
        DebugBootstrap {
            rest_logs: LOGS_PATH.to_string(),
            rest_clear: CLEAR_PATH.to_string(),
            nonce: "n0nce".to_string(),
            initial: None,
            strings: DebugStrings::default(),
        }
    }

    #[test]
    fn test_script_injected_before_head_close() {
        let page = render_host_page(FALLBACK_TEMPLATE, &bootstrap()).unwrap();
        let script_at = page.find("window.BBAI_DEBUG").unwrap();
        assert!(script_at < page.find("</head>").unwrap());
        assert!(page.contains("data-bbai-debug-panel"));
        assert!(page.contains(r#""restLogs":"/api/logs""#));
        assert!(page.contains(r#""nonce":"n0nce""#));
    }

    #[test]
    fn test_template_without_head() {
        let page = render_host_page("<div data-bbai-debug-panel></div>", &bootstrap()).unwrap();
        assert!(page.starts_with("<script>window.BBAI_DEBUG = "));
        assert!(page.ends_with("<div data-bbai-debug-panel></div>"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let mut b = bootstrap();
        b.strings.no_logs = "</script><script>alert(1)</script>".to_string();
        let script = bootstrap_script(&b).unwrap();
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with(";</script>"));
    }
}
