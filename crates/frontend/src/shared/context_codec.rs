//! Context codec for debug-log entries
//!
//! The per-entry context is arbitrary JSON. It is carried on the row toggle
//! button as an attribute-safe string and decoded only when the row is
//! expanded. Older plugin builds emitted raw or percent-encoded JSON, so the
//! decoder walks through every historical format before giving up.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value};

const RAW_PREVIEW_CHARS: usize = 100;

/// JSON-serialize `context` (strings are taken verbatim) and base64 the UTF-8 bytes.
///
/// The result only contains `[A-Za-z0-9+/=]` and is safe inside an HTML attribute.
pub fn encode(context: &Value) -> String {
    let json = match context {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    STANDARD.encode(json.as_bytes())
}

/// Decode a context attribute. Never fails: undecodable input yields a
/// diagnostic object with an `error` field.
pub fn decode(encoded: &str) -> Value {
    let attempts: [fn(&str) -> Option<Value>; 4] =
        [from_base64, from_json, from_percent_once, from_percent_twice];

    attempts
        .iter()
        .find_map(|attempt| attempt(encoded))
        .unwrap_or_else(|| diagnostic(encoded))
}

/// Decode and format in one step, as the detail row displays it
pub fn decode_for_display(encoded: &str) -> String {
    format_for_display(&decode(encoded))
}

/// Human-readable rendering of a decoded context value
pub fn format_for_display(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| list_properties(map))
        }
        Value::Array(_) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(inner @ (Value::Object(_) | Value::Array(_))) => {
                serde_json::to_string_pretty(&inner).unwrap_or_else(|_| s.clone())
            }
            _ => s.clone(),
        },
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

fn from_base64(input: &str) -> Option<Value> {
    if !is_base64_alphabet(input) {
        return None;
    }
    let bytes = STANDARD.decode(input).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&text).ok()
}

fn from_json(input: &str) -> Option<Value> {
    serde_json::from_str(input).ok()
}

fn from_percent_once(input: &str) -> Option<Value> {
    let decoded = urlencoding::decode(input).ok()?;
    serde_json::from_str(&decoded).ok()
}

fn from_percent_twice(input: &str) -> Option<Value> {
    let once = urlencoding::decode(input).ok()?;
    let twice = urlencoding::decode(&once).ok()?;
    serde_json::from_str(&twice).ok()
}

/// `^[A-Za-z0-9+/]*={0,2}$`
fn is_base64_alphabet(input: &str) -> bool {
    let body = input.trim_end_matches('=');
    if input.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

fn diagnostic(input: &str) -> Value {
    let preview: String = input.chars().take(RAW_PREVIEW_CHARS).collect();
    json!({
        "error": "Unable to decode context",
        "raw": format!("{preview}..."),
        "note": "The context data could not be decoded. This may be a formatting issue.",
    })
}

fn list_properties(map: &Map<String, Value>) -> String {
    let lines: Vec<String> = map
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::Object(_) | Value::Array(_) => {
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
                }
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("  {key}: {rendered}")
        })
        .collect();
    format!("Context Object:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_structures() {
        let samples = [
            json!({"attachment_id": 42, "status": "ok", "nested": {"list": [1, 2, 3]}}),
            json!(["a", "b", {"c": null}]),
            json!({"message": "Привет, 世界 ✓"}),
        ];
        for sample in samples {
            assert_eq!(decode(&encode(&sample)), sample);
        }
    }

    #[test]
    fn test_encoded_is_attribute_safe() {
        let encoded = encode(&json!({"html": "<b>\"quoted\" & 'single'</b>"}));
        assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
    }

    #[test]
    fn test_string_context_is_encoded_verbatim() {
        let encoded = encode(&json!("{\"a\":1}"));
        assert_eq!(decode(&encoded), json!({"a": 1}));
    }

    #[test]
    fn test_decodes_legacy_raw_json() {
        assert_eq!(decode(r#"{"a":[1,2]}"#), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_decodes_legacy_percent_encoding() {
        let once = urlencoding::encode(r#"{"path":"/wp-json/bbai"}"#).into_owned();
        assert_eq!(decode(&once), json!({"path": "/wp-json/bbai"}));

        let twice = urlencoding::encode(&once).into_owned();
        assert_eq!(decode(&twice), json!({"path": "/wp-json/bbai"}));
    }

    #[test]
    fn test_malformed_input_yields_diagnostic() {
        for input in ["%E0%A4%A", "not json at all", "{\"unterminated\": ", "====", ""] {
            let value = decode(input);
            assert!(value.get("error").is_some(), "no error field for {input:?}");
        }
    }

    #[test]
    fn test_diagnostic_raw_is_truncated() {
        let long = "x".repeat(250);
        let value = decode(&format!("{{{long}"));
        let raw = value["raw"].as_str().unwrap();
        assert_eq!(raw.chars().count(), RAW_PREVIEW_CHARS + 3);
        assert!(raw.ends_with("..."));
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display(&json!({"a": 1})), "{\n  \"a\": 1\n}");
        assert_eq!(format_for_display(&json!("plain text")), "plain text");
        assert_eq!(format_for_display(&json!("[1]")), "[\n  1\n]");
        assert_eq!(format_for_display(&json!(12.5)), "12.5");
        assert_eq!(format_for_display(&json!(true)), "true");
    }

    #[test]
    fn test_property_listing_fallback() {
        let mut map = Map::new();
        map.insert("code".to_string(), json!(429));
        map.insert("reason".to_string(), json!("rate limited"));
        assert_eq!(
            list_properties(&map),
            "Context Object:\n  code: 429\n  reason: rate limited"
        );
    }
}
