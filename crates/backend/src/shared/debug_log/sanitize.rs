use ammonia::Builder;
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const MAX_MESSAGE_CHARS: usize = 2000;
pub const MAX_CONTEXT_BYTES: usize = 4000;
pub const REDACTED: &str = "[REDACTED]";
const ELLIPSIS: char = '…';

/// Key fragments whose values never reach storage
const SENSITIVE_KEYS: [&str; 11] = [
    "password",
    "pass",
    "pwd",
    "secret",
    "token",
    "api_key",
    "apikey",
    "auth",
    "authorization",
    "jwt",
    "bearer",
];

/// Remove every tag (and the body of script/style) and return plain text
pub fn strip_tags(input: &str) -> String {
    let content_tags: HashSet<&str> = ["script", "style"].into_iter().collect();
    let cleaned = Builder::empty()
        .clean_content_tags(content_tags)
        .clean(input)
        .to_string();
    // the html serializer escapes text; undo it so messages stay plain
    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Single-line text field: tags stripped, whitespace runs collapsed, trimmed
pub fn text_field(input: &str) -> String {
    strip_tags(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn message(input: &str) -> String {
    let text = strip_tags(input);
    let text = text.trim();
    if text.chars().count() > MAX_MESSAGE_CHARS {
        let mut truncated: String = text.chars().take(MAX_MESSAGE_CHARS).collect();
        truncated.push(ELLIPSIS);
        truncated
    } else {
        text.to_string()
    }
}

/// Lowercase `[a-z0-9_-]` key; empty input becomes `core`
pub fn source_key(input: Option<&str>) -> String {
    let key: String = input
        .unwrap_or_default()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if key.is_empty() {
        "core".to_string()
    } else {
        key
    }
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|s| key.contains(s))
}

/// Recursively redact sensitive keys and clean string values.
///
/// Nulls are dropped; booleans and numbers are kept as is.
pub fn redact(context: &Value) -> Value {
    match context {
        Value::Object(map) => {
            let mut clean = Map::new();
            for (key, value) in map {
                let key = text_field(key);
                if is_sensitive(&key) {
                    clean.insert(key, Value::String(REDACTED.to_string()));
                    continue;
                }
                match value {
                    Value::Null => {}
                    Value::String(s) => {
                        clean.insert(key, Value::String(text_field(s)));
                    }
                    Value::Object(_) | Value::Array(_) => {
                        clean.insert(key, redact(value));
                    }
                    other => {
                        clean.insert(key, other.clone());
                    }
                }
            }
            Value::Object(clean)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    Value::String(s) => Value::String(text_field(s)),
                    other => redact(other),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Serialized context for storage, or `None` when there is nothing to keep.
///
/// Scalars are wrapped as `{"value": ..}`. Output longer than
/// `MAX_CONTEXT_BYTES` is cut on a char boundary and suffixed with `…`.
pub fn context_for_storage(context: &Value) -> Option<String> {
    if !contracts::shared::debug_log::has_context(context) {
        return None;
    }
    let wrapped = match context {
        Value::Object(_) | Value::Array(_) => redact(context),
        scalar => {
            let mut map = Map::new();
            map.insert("value".to_string(), scalar.clone());
            redact(&Value::Object(map))
        }
    };
    let mut serialized = serde_json::to_string(&wrapped).ok()?;
    if serialized.len() > MAX_CONTEXT_BYTES {
        let mut cut = MAX_CONTEXT_BYTES;
        while !serialized.is_char_boundary(cut) {
            cut -= 1;
        }
        serialized.truncate(cut);
        serialized.push(ELLIPSIS);
    }
    Some(serialized)
}

/// Stored context back to JSON; anything unreadable becomes `{}`
pub fn context_from_storage(stored: Option<&str>) -> Value {
    stored
        .filter(|s| !s.is_empty())
        .and_then(|s| serde_json::from_str::<Value>(s).ok())
        .filter(|v| v.is_object() || v.is_array())
        .unwrap_or_else(|| Value::Object(Map::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Alt</b> text generated"), "Alt text generated");
        assert_eq!(strip_tags("a <script>alert(1)</script>b"), "a b");
        assert_eq!(strip_tags("5 < 6 & 7"), "5 < 6 & 7");
    }

    #[test]
    fn test_message_truncated_with_ellipsis() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 50);
        let clean = message(&long);
        assert_eq!(clean.chars().count(), MAX_MESSAGE_CHARS + 1);
        assert!(clean.ends_with('…'));

        let exact = "y".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(message(&exact), exact);
    }

    #[test]
    fn test_redacts_nested_sensitive_keys() {
        let context = json!({
            "attachment_id": 42,
            "api_key": "sk-123",
            "request": {
                "Authorization": "Bearer abc",
                "user_password_hash": "x",
                "url": "https://example.com"
            },
            "ok": true,
            "missing": null
        });
        let clean = redact(&context);
        assert_eq!(clean["attachment_id"], 42);
        assert_eq!(clean["api_key"], REDACTED);
        assert_eq!(clean["request"]["Authorization"], REDACTED);
        assert_eq!(clean["request"]["user_password_hash"], REDACTED);
        assert_eq!(clean["request"]["url"], "https://example.com");
        assert_eq!(clean["ok"], true);
        assert!(clean.get("missing").is_none());
    }

    #[test]
    fn test_context_for_storage() {
        assert_eq!(context_for_storage(&json!({})), None);
        assert_eq!(context_for_storage(&Value::Null), None);
        assert_eq!(
            context_for_storage(&json!("quota reached")).as_deref(),
            Some(r#"{"value":"quota reached"}"#)
        );

        let big = json!({ "blob": "z".repeat(MAX_CONTEXT_BYTES * 2) });
        let stored = context_for_storage(&big).unwrap();
        assert_eq!(stored.chars().last(), Some('…'));
        assert_eq!(stored.len(), MAX_CONTEXT_BYTES + '…'.len_utf8());
    }

    #[test]
    fn test_context_from_storage() {
        assert_eq!(context_from_storage(Some(r#"{"a":1}"#)), json!({"a": 1}));
        assert_eq!(context_from_storage(Some("{\"a\":…")), json!({}));
        assert_eq!(context_from_storage(Some("42")), json!({}));
        assert_eq!(context_from_storage(None), json!({}));
    }

    #[test]
    fn test_source_key() {
        assert_eq!(source_key(Some("API")), "api");
        assert_eq!(source_key(Some("Alt Generator!")), "altgenerator");
        assert_eq!(source_key(Some("")), "core");
        assert_eq!(source_key(None), "core");
    }
}
