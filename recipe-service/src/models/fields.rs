//! Lenient readers for loosely-typed model output.
//!
//! Every reader returns the zero value of its type when the key is absent
//! or holds something unusable.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static FIRST_NUMBER: OnceLock<Regex> = OnceLock::new();

fn first_number() -> &'static Regex {
    FIRST_NUMBER.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid number pattern"))
}

/// First signed decimal number appearing in `text`, e.g.
/// `"about 30 minutes"` -> 30, `"-2"` -> -2.
fn number_in_text(text: &str) -> Option<f64> {
    first_number()
        .find(&text.replace(',', ""))
        .and_then(|m| m.as_str().parse().ok())
}

pub(crate) fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn optional_string_field(value: &Value, key: &str) -> Option<String> {
    Some(string_field(value, key)).filter(|s| !s.trim().is_empty())
}

/// Non-negative whole number. Floats are rounded, strings contribute their
/// first number.
pub(crate) fn count_field(value: &Value, key: &str) -> u32 {
    let number = match value.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => number_in_text(s),
        _ => None,
    };

    number
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Monetary amount. Strings such as `"$18.50"` are accepted.
pub(crate) fn amount_field(value: &Value, key: &str) -> f64 {
    let number = match value.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => number_in_text(s),
        _ => None,
    };

    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// List of strings. Scalars inside the list are stringified, nested
/// structures are dropped, and a bare string becomes a one-element list.
pub(crate) fn string_list_field(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
