use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header carrying the REST nonce / auth token on every debug-log request
pub const AUTH_HEADER: &str = "X-WP-Nonce";

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Capitalized label used by badges ("Warning")
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
        }
    }

    /// Lenient parse: unknown or empty values fall back to `info`
    pub fn normalize(raw: &str) -> LogLevel {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| LogLevel::normalize(&s)).unwrap_or_default())
    }
}

/// One debug log record as the server returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Display-formatted timestamp
    #[serde(default)]
    pub created_at: String,
    /// Raw `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub context: serde_json::Value,
}

impl LogEntry {
    /// Absent, null, `{}`, `[]` and `""` all count as "no context"
    pub fn has_context(&self) -> bool {
        has_context(&self.context)
    }
}

pub fn has_context(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "one")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "one")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// `max(1, ceil(total_items / per_page))`
    pub fn total_pages_for(total_items: u64, per_page: u32) -> u32 {
        let per_page = u64::from(per_page.max(1));
        let pages = total_items.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}

fn one() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub warnings: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub last_event: Option<String>,
    #[serde(default)]
    pub last_api: Option<String>,
}

/// Response of `GET /api/logs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub stats: LogStats,
}

/// Query parameters of `GET /api/logs`.
///
/// Every filter is always sent; an empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsQuery {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub level: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,
    #[serde(default)]
    pub search: String,
}

/// Body of `POST /api/logs/clear`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearLogsRequest {
    /// Only delete entries older than this many days
    #[serde(default, deserialize_with = "lenient_u32")]
    pub older_than: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearLogsResponse {
    pub cleared: bool,
    #[serde(default)]
    pub stats: LogStats,
}

/// Body of `POST /api/logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default)]
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub context: serde_json::Value,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
}

/// Localized strings handed to the viewer by the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugStrings {
    pub no_logs: String,
    pub context_title: String,
    pub context_hide: String,
    pub clear_confirm: String,
    pub error_generic: String,
    pub empty_context: String,
    pub cleared: String,
    /// Two numeric placeholders: `%1$d` current page, `%2$d` total pages
    pub page_indicator: String,
    pub copy: String,
    pub copied: String,
}

impl Default for DebugStrings {
    fn default() -> Self {
        Self {
            no_logs: "No logs recorded yet.".to_string(),
            context_title: "Log Context".to_string(),
            context_hide: "Hide Context".to_string(),
            clear_confirm: "This will permanently delete all debug logs. Continue?".to_string(),
            error_generic: "Unable to load debug logs. Please try again.".to_string(),
            empty_context: "No additional context was provided for this entry.".to_string(),
            cleared: "Logs cleared successfully.".to_string(),
            page_indicator: "Page %1$d of %2$d".to_string(),
            copy: "Copy".to_string(),
            copied: "Copied!".to_string(),
        }
    }
}

impl DebugStrings {
    pub fn page_indicator(&self, page: u32, total_pages: u32) -> String {
        self.page_indicator
            .replace("%1$d", &page.to_string())
            .replace("%2$d", &total_pages.to_string())
    }
}

/// Configuration injected by the host page as `window.BBAI_DEBUG`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugBootstrap {
    pub rest_logs: String,
    pub rest_clear: String,
    pub nonce: String,
    pub initial: Option<LogsResponse>,
    pub strings: DebugStrings,
}

/// Accepts numbers or numeric strings; anything else is treated as absent
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    struct LenientVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(u32::try_from(v).ok())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(u32::try_from(v).ok())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) {
                Ok(Some(v as u32))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse::<u32>().ok())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(LenientVisitor)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}
