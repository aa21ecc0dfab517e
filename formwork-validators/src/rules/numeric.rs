// Numeric rules

use super::labeled_params;
use crate::helpers::{coerce_to_string, has_whitespace, req, to_number};
use crate::{Message, Params, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*(\.[0-9]+)?$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^[0-9]*$)|(^-[0-9]+$)").unwrap());

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]*(\.[0-9]+)?$").unwrap());

/// Number read from a value for the bound rules. Values containing whitespace
/// are never numbers here.
fn bounded_number(value: &Value) -> Option<f64> {
    if has_whitespace(value) {
        None
    } else {
        to_number(value)
    }
}

/// Bound stored in params. JSON has no NaN or infinity, so those are kept
/// as their display text.
fn bound_param(bound: f64) -> Value {
    if bound.is_nan() {
        Value::from("NaN")
    } else if bound.is_infinite() {
        Value::from(if bound > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        Value::from(bound)
    }
}

/// Value must be a number no smaller than `min`. Numeric strings are accepted.
///
/// A `min` that is not a number (NaN) makes every non-empty value fail.
pub fn min_value(min: impl Into<f64>) -> Rule {
    let min = min.into();
    Rule::new(
        "minValue",
        labeled_params(Params::new().with("min", bound_param(min))),
        move |value, _| !req(value) || bounded_number(value).is_some_and(|n| n >= min),
        Message::templated(|p| format!("{} should be at least {}.", p.display("label"), p.display("min"))),
    )
}

/// Value must be a number no greater than `max`.
pub fn max_value(max: impl Into<f64>) -> Rule {
    let max = max.into();
    Rule::new(
        "maxValue",
        labeled_params(Params::new().with("max", bound_param(max))),
        move |value, _| !req(value) || bounded_number(value).is_some_and(|n| n <= max),
        Message::templated(|p| format!("{} should be at most {}.", p.display("label"), p.display("max"))),
    )
}

/// Value must be a number in `min..=max`.
///
/// ```
/// use formwork_validators::rules::between;
/// use serde_json::json;
///
/// let rule = between(1, 10).labeled("Rating");
/// assert!(rule.is_valid(&json!(10)));
/// assert!(rule.is_valid(&json!("7")));
/// assert!(!rule.is_valid(&json!(11)));
/// assert_eq!(rule.describe(), "Rating should be between 1 and 10.");
/// ```
pub fn between(min: impl Into<f64>, max: impl Into<f64>) -> Rule {
    let (min, max) = (min.into(), max.into());
    Rule::new(
        "between",
        labeled_params(Params::new().with("min", bound_param(min)).with("max", bound_param(max))),
        move |value, _| {
            !req(value) || bounded_number(value).is_some_and(|n| min <= n && n <= max)
        },
        Message::templated(|p| {
            format!(
                "{} should be between {} and {}.",
                p.display("label"),
                p.display("min"),
                p.display("max")
            )
        }),
    )
}

fn pattern_rule(kind: &'static str, regex: &'static Lazy<Regex>, message: &'static str) -> Rule {
    Rule::new(
        kind,
        labeled_params(Params::new()),
        move |value, _| !req(value) || regex.is_match(&coerce_to_string(value)),
        Message::pattern(message),
    )
}

/// Unsigned digits with an optional fraction.
pub fn numeric() -> Rule {
    pattern_rule("numeric", &NUMERIC_REGEX, "{label} should be a number.")
}

/// Whole number, optionally negative.
pub fn integer() -> Rule {
    pattern_rule("integer", &INTEGER_REGEX, "{label} should be an integer.")
}

/// Number with an optional sign and fraction.
pub fn decimal() -> Rule {
    pattern_rule("decimal", &DECIMAL_REGEX, "{label} should be a decimal number.")
}
