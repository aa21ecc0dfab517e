// Rule combinators

use super::labeled_params;
use crate::helpers::req;
use crate::{Message, Params, Rule};
use serde_json::Value;

fn kinds(rules: &[Rule]) -> Value {
    Value::Array(
        rules
            .iter()
            .map(|rule| Value::String(rule.kind().to_string()))
            .collect(),
    )
}

fn invalid_message() -> Message {
    Message::pattern("{label} is invalid.")
}

/// Passes when every inner rule passes. An empty list never passes.
///
/// ```
/// use formwork_validators::rules::{and, alpha, min_length};
/// use serde_json::json;
///
/// let handle = and([alpha(), min_length(3)]).labeled("Handle");
/// assert!(handle.is_valid(&json!("abc")));
/// assert!(!handle.is_valid(&json!("ab")));
/// assert!(!handle.is_valid(&json!("ab1")));
/// ```
pub fn and(rules: impl IntoIterator<Item = Rule>) -> Rule {
    let rules: Vec<Rule> = rules.into_iter().collect();
    Rule::new(
        "and",
        labeled_params(Params::new().with("rules", kinds(&rules))),
        move |value, ctx| !rules.is_empty() && rules.iter().all(|rule| rule.validate(value, ctx)),
        invalid_message(),
    )
}

/// Passes when any inner rule passes. An empty list never passes.
pub fn or(rules: impl IntoIterator<Item = Rule>) -> Rule {
    let rules: Vec<Rule> = rules.into_iter().collect();
    Rule::new(
        "or",
        labeled_params(Params::new().with("rules", kinds(&rules))),
        move |value, ctx| rules.iter().any(|rule| rule.validate(value, ctx)),
        invalid_message(),
    )
}

/// Passes when the inner rule fails. Empty values pass.
pub fn not(rule: Rule) -> Rule {
    Rule::new(
        "not",
        labeled_params(Params::new().with("rule", rule.kind().to_string())),
        move |value, ctx| !req(value) || !rule.validate(value, ctx),
        invalid_message(),
    )
}
