// Length rules

use super::labeled_params;
use crate::helpers::{len, req};
use crate::{Message, Params, Rule};

/// Value must be at least `length` long.
///
/// Arrays count elements, strings count characters, other scalars are
/// measured by their string form. Empty values pass.
///
/// `length` is a `usize`, so negative or fractional thresholds cannot be
/// built. The label defaults to "This field"; supply one with
/// [`Rule::labeled`], e.g. `min_length(3).labeled("Username")`.
///
/// ```
/// use formwork_validators::rules::min_length;
/// use serde_json::json;
///
/// let rule = min_length(5);
/// assert!(!rule.is_valid(&json!("abcd")));
/// assert!(rule.is_valid(&json!("abcde")));
/// assert!(rule.is_valid(&json!("")));
/// assert_eq!(rule.describe(), "This field should be at least 5 long.");
///
/// let rule = min_length(3).labeled("Username");
/// assert_eq!(rule.describe(), "Username should be at least 3 long.");
/// ```
pub fn min_length(length: usize) -> Rule {
    Rule::new(
        "minLength",
        labeled_params(Params::new().with("length", length)),
        move |value, _| !req(value) || len(value) >= length,
        Message::templated(|p| {
            format!("{} should be at least {} long.", p.display("label"), p.display("length"))
        }),
    )
}

/// Value must be at most `length` long. Empty values pass.
pub fn max_length(length: usize) -> Rule {
    Rule::new(
        "maxLength",
        labeled_params(Params::new().with("length", length)),
        move |value, _| !req(value) || len(value) <= length,
        Message::templated(|p| {
            format!("{} should be at most {} long.", p.display("label"), p.display("length"))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LABEL;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[test]
    fn test_min_length_strings() {
        let rule = min_length(5);
        assert!(!rule.is_valid(&json!("abcd")));
        assert!(rule.is_valid(&json!("abcde")));
        assert!(rule.is_valid(&json!("abcdef")));
        assert_eq!(rule.describe(), "This field should be at least 5 long.");
    }

    #[test]
    fn test_min_length_sequences() {
        let rule = min_length(3).labeled("Username");
        assert!(!rule.is_valid(&json!(["a", "b"])));
        assert!(rule.is_valid(&json!(["a", "b", "c"])));
        assert_eq!(rule.describe(), "Username should be at least 3 long.");
    }

    #[test]
    fn test_min_length_empty_is_exempt() {
        let rule = min_length(5);
        assert!(rule.is_valid(&Value::Null));
        assert!(rule.is_valid(&json!("")));
        assert!(rule.is_valid(&json!([])));
        assert!(rule.is_valid(&json!({})));
    }

    #[test]
    fn test_min_length_coerces_scalars() {
        assert!(min_length(2).is_valid(&json!(42)));
        assert!(!min_length(3).is_valid(&json!(42)));
        assert!(min_length(5).is_valid(&json!(false)));
    }

    #[test]
    fn test_min_length_counts_characters() {
        assert!(min_length(3).is_valid(&json!("日本語")));
        assert!(!min_length(4).is_valid(&json!("日本語")));
    }

    #[test]
    fn test_min_length_zero_accepts_anything() {
        let rule = min_length(0);
        assert!(rule.is_valid(&json!("a")));
        assert!(rule.is_valid(&json!([1])));
    }

    #[test]
    fn test_min_length_threshold_sweep() {
        let samples = [json!("a"), json!("abc"), json!([1, 2, 3, 4]), json!("hello world")];
        for n in 0..12 {
            let rule = min_length(n);
            for sample in &samples {
                assert_eq!(rule.is_valid(sample), len(sample) >= n, "n={n} sample={sample}");
            }
        }
    }

    #[test]
    fn test_min_length_params() {
        let rule = min_length(3).labeled("Username");
        assert_eq!(rule.params().get("length"), Some(&json!(3)));
        assert_eq!(rule.params().get("label"), Some(&json!("Username")));
        assert_eq!(rule.params().len(), 2);

        let default = min_length(5);
        assert_eq!(default.params().label(), DEFAULT_LABEL);
        assert!(default.describe().starts_with("This field should be at least"));
    }

    #[test]
    fn test_message_is_stable() {
        let rule = min_length(7).labeled("Password");
        let first = rule.describe();
        rule.is_valid(&json!("short"));
        rule.is_valid(&json!("long enough"));
        assert_eq!(first, rule.describe());
        assert_eq!(first, "Password should be at least 7 long.");
    }

    #[test]
    fn test_params_are_reference_stable() {
        let rule = min_length(4);
        let before = Arc::clone(rule.params());
        for value in [json!("ab"), json!("abcd"), json!([1, 2, 3, 4, 5]), Value::Null] {
            rule.is_valid(&value);
        }
        assert!(Arc::ptr_eq(&before, rule.params()));
        assert_eq!(*before, *rule.params().as_ref());
        assert_eq!(rule.params().get("length"), Some(&json!(4)));
    }

    #[test]
    fn test_max_length() {
        let rule = max_length(5).labeled("Nickname");
        assert!(rule.is_valid(&json!("short")));
        assert!(!rule.is_valid(&json!("too long")));
        assert!(!rule.is_valid(&json!([1, 2, 3, 4, 5, 6])));
        assert!(rule.is_valid(&json!("")));
        assert_eq!(rule.describe(), "Nickname should be at most 5 long.");
    }
}
