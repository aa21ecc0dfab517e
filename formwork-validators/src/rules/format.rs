// Format rules

use super::labeled_params;
use crate::helpers::{coerce_to_string, req};
use crate::{Message, Params, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]*$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]*$").unwrap());

fn regex_rule(kind: &'static str, regex: &'static Lazy<Regex>, message: &'static str) -> Rule {
    Rule::new(
        kind,
        labeled_params(Params::new()),
        move |value, _| !req(value) || regex.is_match(&coerce_to_string(value)),
        Message::pattern(message),
    )
}

/// ASCII letters only.
pub fn alpha() -> Rule {
    regex_rule("alpha", &ALPHA_REGEX, "{label} should contain only letters.")
}

/// ASCII letters and digits only.
pub fn alpha_num() -> Rule {
    regex_rule(
        "alphaNum",
        &ALPHANUMERIC_REGEX,
        "{label} should contain only letters and numbers.",
    )
}

pub fn email() -> Rule {
    regex_rule("email", &EMAIL_REGEX, "{label} should be a valid email address.")
}

/// `http://` or `https://` URL.
pub fn url() -> Rule {
    regex_rule("url", &URL_REGEX, "{label} should be a valid URL.")
}

/// Custom pattern. Fails to build only if `pattern` is not a valid regex.
///
/// ```
/// use formwork_validators::rules::matches;
/// use serde_json::json;
///
/// let rule = matches(r"^\d{3}-\d{4}$").unwrap().labeled("Phone");
/// assert!(rule.is_valid(&json!("555-0100")));
/// assert!(!rule.is_valid(&json!("5550100")));
/// assert!(matches("(unclosed").is_err());
/// ```
pub fn matches(pattern: &str) -> Result<Rule, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Rule::new(
        "matches",
        labeled_params(Params::new().with("pattern", pattern)),
        move |value, _| !req(value) || regex.is_match(&coerce_to_string(value)),
        Message::pattern("{label} does not match the required pattern."),
    ))
}

fn nibble_valid(nibble: &str) -> bool {
    if nibble.is_empty() || nibble.len() > 3 {
        return false;
    }
    if nibble.starts_with('0') && nibble != "0" {
        return false;
    }
    nibble.bytes().all(|b| b.is_ascii_digit()) && nibble.parse::<u16>().is_ok_and(|n| n <= 255)
}

/// Dotted-quad IPv4 address without leading zeros.
pub fn ip_address() -> Rule {
    Rule::new(
        "ipAddress",
        labeled_params(Params::new()),
        |value, _| {
            if !req(value) {
                return true;
            }
            match value {
                Value::String(s) => {
                    let nibbles: Vec<&str> = s.split('.').collect();
                    nibbles.len() == 4 && nibbles.into_iter().all(nibble_valid)
                }
                _ => false,
            }
        },
        Message::pattern("{label} should be a valid IPv4 address."),
    )
}

fn hex_pair(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_hexdigit())
}

fn mac_parts<'a>(value: &'a str, separator: &str) -> Option<Vec<&'a str>> {
    if !separator.is_empty() {
        return Some(value.split(separator).collect());
    }
    if (value.len() == 12 || value.len() == 16) && value.is_ascii() {
        Some((0..value.len()).step_by(2).map(|i| &value[i..i + 2]).collect())
    } else {
        None
    }
}

/// MAC (6 groups) or EUI-64 (8 groups) address of hex pairs split by
/// `separator`. An empty separator expects the bare 12 or 16 hex digits.
pub fn mac_address(separator: &str) -> Rule {
    let separator = separator.to_string();
    Rule::new(
        "macAddress",
        labeled_params(Params::new().with("separator", separator.clone())),
        move |value, _| {
            if !req(value) {
                return true;
            }
            let Value::String(s) = value else {
                return false;
            };
            mac_parts(s, &separator).is_some_and(|parts| {
                (parts.len() == 6 || parts.len() == 8) && parts.into_iter().all(hex_pair)
            })
        },
        Message::pattern("{label} should be a valid MAC address."),
    )
}
