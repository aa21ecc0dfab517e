// Rule parameters

use crate::helpers::coerce_to_string;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Map, Value};

/// Label used by every built-in rule unless one is supplied.
pub const DEFAULT_LABEL: &str = "This field";

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Named values captured when a rule is built.
///
/// Params are assembled once with [`Params::with`] and are read-only
/// afterwards; rules hold them behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    entries: Map<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// The `label` parameter, or [`DEFAULT_LABEL`] when none was set.
    pub fn label(&self) -> &str {
        self.entries
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_LABEL)
    }

    /// A parameter rendered for a message. Strings are inserted without
    /// quotes and whole numbers without a fraction. Missing keys render empty.
    pub fn display(&self, key: &str) -> String {
        self.entries
            .get(key)
            .map(|value| coerce_to_string(value).into_owned())
            .unwrap_or_default()
    }

    /// Substitute `{name}` placeholders with parameter values.
    ///
    /// Placeholders naming an unknown parameter are left as written.
    ///
    /// ```
    /// use formwork_validators::Params;
    ///
    /// let params = Params::new().with("label", "Age").with("min", 18);
    /// assert_eq!(params.interpolate("{label} must be {min}+ ({unit})"), "Age must be 18+ ({unit})");
    /// ```
    pub fn interpolate(&self, pattern: &str) -> String {
        PLACEHOLDER_REGEX
            .replace_all(pattern, |caps: &Captures<'_>| match self.entries.get(&caps[1]) {
                Some(value) => coerce_to_string(value).into_owned(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}
