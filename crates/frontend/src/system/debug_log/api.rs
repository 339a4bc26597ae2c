use super::config::ViewerConfig;
use contracts::shared::debug_log::{LogsQuery, LogsResponse, AUTH_HEADER};
use gloo_net::http::{Request, RequestBuilder};
use thiserror::Error;

/// Transport-level failures of the Log Query Service.
///
/// The user only ever sees the generic localized error; the detail goes to the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("failed to build request: {0}")]
    Request(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Decode(String),
}

fn with_auth(builder: RequestBuilder, config: &ViewerConfig) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    if config.nonce.is_empty() {
        builder
    } else {
        builder.header(AUTH_HEADER, &config.nonce)
    }
}

/// Build `<restLogs>?page=&per_page=&level=&date_from=&date_to=&search=`
pub fn logs_url(endpoint: &str, query: &LogsQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Request(e.to_string()))?;
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", endpoint, separator, qs))
}

/// GET one page of log records
pub async fn fetch_logs(config: &ViewerConfig, query: &LogsQuery) -> Result<LogsResponse, ApiError> {
    let url = logs_url(&config.rest_logs, query)?;

    let response = with_auth(Request::get(&url), config)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<LogsResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// POST the destructive clear-all request; the body of a 2xx answer is ignored
pub async fn clear_logs(config: &ViewerConfig) -> Result<(), ApiError> {
    let response = with_auth(Request::post(&config.rest_clear), config)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_url_carries_every_parameter() {
        let query = LogsQuery {
            page: Some(2),
            per_page: Some(10),
            level: "error".to_string(),
            date: String::new(),
            date_from: "2024-01-01".to_string(),
            date_to: String::new(),
            search: "rate limit".to_string(),
        };
        let url = logs_url("/api/logs", &query).unwrap();
        assert!(url.starts_with("/api/logs?"));
        for part in [
            "page=2",
            "per_page=10",
            "level=error",
            "date_from=2024-01-01",
            "date_to=",
            "search=rate",
        ] {
            assert!(url.contains(part), "{url} is missing {part}");
        }
        assert!(!url.contains("date="), "exact date must not be sent: {url}");
    }

    #[test]
    fn test_logs_url_appends_to_existing_query() {
        let query = LogsQuery {
            page: Some(1),
            per_page: Some(10),
            ..LogsQuery::default()
        };
        let url = logs_url("/index.php?rest_route=/bbai/v1/logs", &query).unwrap();
        assert!(url.starts_with("/index.php?rest_route=/bbai/v1/logs&"));
    }
}
