//! Integration tests for formwork-validators

use formwork_validators::rules::*;
use formwork_validators::*;
use serde_json::{Value, json};
use std::sync::Arc;

#[test]
fn test_min_length_rejects_short_string() {
    let rule = min_length(5);
    assert!(!rule.is_valid(&json!("abcd")));
    assert_eq!(rule.describe(), "This field should be at least 5 long.");
}

#[test]
fn test_min_length_accepts_exact_length() {
    assert!(min_length(5).is_valid(&json!("abcde")));
}

#[test]
fn test_min_length_labeled_sequence() {
    let rule = min_length(3).labeled("Username");
    assert!(!rule.is_valid(&json!(["a", "b"])));
    assert_eq!(rule.describe(), "Username should be at least 3 long.");
}

#[test]
fn test_min_length_empty_string_is_exempt() {
    assert!(min_length(5).is_valid(&json!("")));
}

#[test]
fn test_min_length_coerces_number() {
    assert!(min_length(2).is_valid(&json!(42)));
}

#[test]
fn test_absent_values_pass_for_any_threshold() {
    for n in [0, 1, 5, 100] {
        let rule = min_length(n);
        assert!(rule.is_valid(&Value::Null));
        assert!(rule.is_valid(&json!("")));
        assert!(rule.is_valid(&json!([])));
    }
}

#[test]
fn test_params_hold_construction_values() {
    let rule = min_length(3).labeled("Username");
    assert_eq!(rule.params().to_json(), json!({"length": 3, "label": "Username"}));

    let default = min_length(8);
    assert_eq!(default.params().get("label"), Some(&json!("This field")));
    assert!(default.describe().starts_with("This field should be at least"));
}

#[test]
fn test_params_survive_validation() {
    let rule = min_length(6);
    let params = Arc::clone(rule.params());
    let snapshot = (*params).clone();
    for value in [json!("a"), json!("abcdefgh"), json!([1, 2]), json!(123456)] {
        rule.is_valid(&value);
    }
    assert!(Arc::ptr_eq(&params, rule.params()));
    assert_eq!(snapshot, **rule.params());
}

#[test]
fn test_message_renders_identically() {
    let rule = min_length(10).labeled("Bio");
    assert_eq!(rule.describe(), rule.describe());
    assert_eq!(rule.message().render(rule.params()), "Bio should be at least 10 long.");
}

#[test]
fn test_rules_are_shareable_across_threads() {
    let rule = min_length(3);
    let handles: Vec<_> = ["ab", "abc", "abcd"]
        .into_iter()
        .map(|s| {
            let rule = rule.clone();
            std::thread::spawn(move || rule.is_valid(&json!(s)))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, true, true]);
}

#[test]
fn test_engine_agnostic_validator_trait() {
    fn first_failure(rules: &[&dyn Validator], value: &Value) -> Option<String> {
        let ctx = ValidationContext::new();
        rules
            .iter()
            .find(|rule| !rule.validate(value, &ctx))
            .map(|rule| rule.describe())
    }

    let required = required().labeled("Name");
    let short = max_length(4).labeled("Name");
    let rules: [&dyn Validator; 2] = [&required, &short];

    assert_eq!(first_failure(&rules, &json!("")), Some("Name is required.".to_string()));
    assert_eq!(
        first_failure(&rules, &json!("Bartholomew")),
        Some("Name should be at most 4 long.".to_string())
    );
    assert_eq!(first_failure(&rules, &json!("Bart")), None);
}

#[test]
fn test_validation_rules_builder() {
    let rules = FieldRules::for_field("username")
        .add(required())
        .add(min_length(3))
        .add(alpha_num());

    let ctx = ValidationContext::new();
    assert!(rules.validate(&json!("user123"), &ctx).is_ok());
    assert!(rules.validate(&json!("ab"), &ctx).is_err());
    assert!(rules.validate(&json!("user-1"), &ctx).is_err());
}

#[test]
fn test_form_errors_to_json() {
    let schema = FormRules::new()
        .field(FieldRules::for_field("email").add(email().labeled("Email")))
        .field(FieldRules::for_field("age").add(min_value(18).labeled("Age")));

    let errors = schema
        .validate(&json!({"email": "nope", "age": "16"}))
        .unwrap_err();
    let json = errors.to_json();

    assert_eq!(json["errors"][0]["field"], "email");
    assert_eq!(json["errors"][0]["constraint"], "email");
    assert_eq!(json["errors"][1]["message"], "Age should be at least 18.");
    assert_eq!(json["errors"][1]["value"], "16");
    assert_eq!(json["errors"][1]["params"]["min"], json!(18.0));
}

#[test]
fn test_validation_error_creation() {
    let error = ValidationError::new("email", "invalid email format");

    assert_eq!(error.field, "email");
    assert_eq!(error.message, "invalid email format");
    assert_eq!(error.constraint, "custom");
}

#[tokio::test]
async fn test_async_and_parallel_agree() {
    let taken = AsyncRule::new(
        "unique",
        Params::new().with("label", "Email"),
        |value, _| async move { value != json!("used@example.com") },
        Message::pattern("{label} is already registered."),
    );
    let schema = FormRules::new()
        .field(
            FieldRules::for_field("email")
                .add(email().labeled("Email"))
                .add_async(taken),
        )
        .field(FieldRules::for_field("name").add(required().labeled("Name")));

    let form = json!({"email": "used@example.com", "name": ""});
    let sequential = schema.validate_async(&form).await.unwrap_err();
    let parallel = schema.validate_parallel(&form).await.unwrap_err();

    assert_eq!(sequential, parallel);
    assert_eq!(
        sequential.messages_for("email"),
        vec!["Email is already registered."]
    );
    assert_eq!(sequential.messages_for("name"), vec!["Name is required."]);
}
