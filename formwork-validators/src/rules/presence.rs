// Presence rules

use super::labeled_params;
use crate::helpers::{is_truthy, req};
use crate::{Message, Params, Reference, Rule};
use serde_json::Value;

fn present(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        other => req(other),
    }
}

fn required_message() -> Message {
    Message::templated(|p| format!("{} is required.", p.display("label")))
}

/// Value must be present. Whitespace-only strings count as missing.
pub fn required() -> Rule {
    Rule::new(
        "required",
        labeled_params(Params::new()),
        |value, _| present(value),
        required_message(),
    )
}

/// Value must be present when `condition` resolves to a truthy value.
///
/// ```
/// use formwork_validators::{ValidationContext, rules::required_if};
/// use serde_json::json;
///
/// let rule = required_if("wants_newsletter");
/// let opted_in = ValidationContext::new().with_field("wants_newsletter", true);
/// assert!(!rule.validate(&json!(""), &opted_in));
/// assert!(rule.validate(&json!(""), &ValidationContext::new()));
/// ```
pub fn required_if(condition: impl Into<Reference>) -> Rule {
    let condition = condition.into();
    Rule::new(
        "requiredIf",
        labeled_params(Params::new().with("prop", condition.param())),
        move |value, ctx| !is_truthy(&condition.resolve(ctx)) || present(value),
        required_message(),
    )
}

/// Value must be present unless `condition` resolves to a truthy value.
pub fn required_unless(condition: impl Into<Reference>) -> Rule {
    let condition = condition.into();
    Rule::new(
        "requiredUnless",
        labeled_params(Params::new().with("prop", condition.param())),
        move |value, ctx| is_truthy(&condition.resolve(ctx)) || present(value),
        required_message(),
    )
}
