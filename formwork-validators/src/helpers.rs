// Value helpers shared by the built-in rules
//
// Form values arrive as loosely typed JSON. These helpers give every rule the
// same notion of "present", "length", "number" and "truthy".

use serde_json::{Number, Value};
use std::borrow::Cow;

/// Presence test used by every optional rule.
///
/// `null`, `""`, `[]` and `{}` are absent. `false` and `0` are present.
///
/// ```
/// use formwork_validators::helpers::req;
/// use serde_json::json;
///
/// assert!(!req(&json!(null)));
/// assert!(!req(&json!("")));
/// assert!(req(&json!(false)));
/// assert!(req(&json!(0)));
/// ```
pub fn req(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Length of a value as seen by the length rules.
///
/// Arrays count elements, objects count keys, strings count characters and
/// every other scalar counts the characters of its string form.
pub fn len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => coerce_to_string(other).chars().count(),
    }
}

/// String form of a value, as used by pattern rules and message rendering.
pub fn coerce_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(display_number(n)),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => coerce_to_string(other).into_owned(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Borrowed("[object Object]"),
    }
}

/// Render a number without a trailing `.0` for whole floats.
pub fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Numeric reading of a value. `None` stands for "not a number".
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => parse_number(s.trim()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Number syntax accepted from text input. Only the exact spelling
/// `Infinity` names an infinite value; `inf`, `nan` and friends are rejected.
fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    match unsigned.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => text.parse::<f64>().ok(),
        _ if unsigned == "Infinity" => text.parse::<f64>().ok(),
        _ => None,
    }
}

pub fn has_whitespace(value: &Value) -> bool {
    coerce_to_string(value).chars().any(char::is_whitespace)
}

/// Truthiness of a condition value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
