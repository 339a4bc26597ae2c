pub mod query;
pub mod repository;
pub mod sanitize;

use contracts::shared::debug_log::{CreateLogRequest, LogLevel};
use repository::NewLog;
use serde_json::Value;

/// Sanitize an incoming record: markup stripped, message truncated,
/// sensitive context keys redacted
pub fn prepare(request: &CreateLogRequest, user_id: Option<i64>) -> NewLog {
    let meta = request
        .meta
        .as_deref()
        .map(sanitize::text_field)
        .filter(|m| !m.is_empty());

    NewLog {
        level: request.level,
        message: sanitize::message(&request.message),
        context: sanitize::context_for_storage(&request.context),
        source: sanitize::source_key(request.source.as_deref()),
        meta,
        user_id: user_id.filter(|id| *id > 0),
    }
}

pub async fn record(request: &CreateLogRequest, user_id: Option<i64>) -> anyhow::Result<i64> {
    repository::insert(prepare(request, user_id)).await
}

/// Fire-and-forget server side logging into the debug log table
///
/// # Examples
/// ```ignore
/// debug_log::log(LogLevel::Info, "startup", "Server started", serde_json::Value::Null);
/// ```
pub fn log(level: LogLevel, source: &str, message: &str, context: Value) {
    let request = CreateLogRequest {
        level,
        message: message.to_string(),
        context,
        source: Some(source.to_string()),
        meta: None,
    };

    tokio::spawn(async move {
        if let Err(e) = record(&request, None).await {
            tracing::error!("Failed to write debug log entry: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_sanitizes_every_field() {
        let request = CreateLogRequest {
            level: LogLevel::Warning,
            message: "  <em>Quota</em> almost reached ".to_string(),
            context: json!({"remaining": 3, "token": "abc"}),
            source: Some("API".to_string()),
            meta: Some(" <b>batch</b>\n 7 ".to_string()),
        };
        let log = prepare(&request, Some(0));
        assert_eq!(log.level, LogLevel::Warning);
        assert_eq!(log.message, "Quota almost reached");
        assert_eq!(
            log.context.as_deref(),
            Some(r#"{"remaining":3,"token":"[REDACTED]"}"#)
        );
        assert_eq!(log.source, "api");
        assert_eq!(log.meta.as_deref(), Some("batch 7"));
        assert_eq!(log.user_id, None);
    }

    #[test]
    fn test_prepare_without_context() {
        let request: CreateLogRequest =
            serde_json::from_value(json!({"level": "LOUD", "message": "hello"})).unwrap();
        let log = prepare(&request, Some(5));
        assert_eq!(log.level, LogLevel::Info);
        assert_eq!(log.context, None);
        assert_eq!(log.source, "core");
        assert_eq!(log.meta, None);
        assert_eq!(log.user_id, Some(5));
    }
}
