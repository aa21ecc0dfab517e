// Cross-field equality

use super::labeled_params;
use crate::{Message, Params, Reference, Rule};

/// Value must equal the referenced value exactly.
///
/// Unlike the other rules, empty values are compared too: an empty
/// confirmation only passes when the original is equally empty.
///
/// ```
/// use formwork_validators::{ValidationContext, rules::same_as};
/// use serde_json::json;
///
/// let rule = same_as("password").labeled("Confirmation");
/// let form = ValidationContext::new().with_field("password", "hunter22");
/// assert!(rule.validate(&json!("hunter22"), &form));
/// assert!(!rule.validate(&json!("hunter23"), &form));
/// assert_eq!(rule.describe(), "Confirmation should match password.");
/// ```
pub fn same_as(other: impl Into<Reference>) -> Rule {
    let other = other.into();
    Rule::new(
        "sameAs",
        labeled_params(Params::new().with("eq", other.param())),
        move |value, ctx| *value == other.resolve(ctx),
        Message::templated(|p| format!("{} should match {}.", p.display("label"), p.display("eq"))),
    )
}
