//! Declarative validation rules for forms
//!
//! Each factory in [`rules`] returns a [`Rule`]: an immutable bundle of a
//! predicate, a failure message and the params both were built from. Rules
//! know nothing about the form engine that runs them; engines either call
//! [`Rule::validate`] / [`Rule::describe`] directly or go through the
//! [`Validator`] trait.
//!
//! # Examples
//!
//! ## A single rule
//!
//! ```
//! use formwork_validators::rules::min_length;
//! use serde_json::json;
//!
//! let rule = min_length(5);
//! assert!(!rule.is_valid(&json!("abcd")));
//! assert!(rule.is_valid(&json!("abcde")));
//! assert!(rule.is_valid(&json!("")));
//! assert_eq!(rule.describe(), "This field should be at least 5 long.");
//!
//! let rule = min_length(3).labeled("Username");
//! assert!(!rule.is_valid(&json!(["a", "b"])));
//! assert_eq!(rule.describe(), "Username should be at least 3 long.");
//! ```
//!
//! ## A form schema
//!
//! ```
//! use formwork_validators::{FieldRules, FormRules, rules::*};
//! use serde_json::json;
//!
//! let schema = FormRules::new()
//!     .field(
//!         FieldRules::for_field("email")
//!             .add(required().labeled("Email"))
//!             .add(email().labeled("Email")),
//!     )
//!     .field(
//!         FieldRules::for_field("age")
//!             .add(integer().labeled("Age"))
//!             .add(between(18, 130).labeled("Age")),
//!     );
//!
//! let errors = schema.validate(&json!({"email": "", "age": 12})).unwrap_err();
//! assert_eq!(errors.messages_for("email"), vec!["Email is required."]);
//! assert_eq!(errors.messages_for("age"), vec!["Age should be between 18 and 130."]);
//! ```
//!
//! ## A custom rule
//!
//! ```
//! use formwork_validators::{Message, Params, Rule, helpers::req};
//! use serde_json::json;
//!
//! fn starts_with(prefix: &'static str) -> Rule {
//!     Rule::new(
//!         "startsWith",
//!         Params::new().with("prefix", prefix).with("label", "This field"),
//!         move |value, _| !req(value) || value.as_str().is_some_and(|s| s.starts_with(prefix)),
//!         Message::pattern("{label} should start with {prefix}."),
//!     )
//! }
//!
//! let sku = starts_with("SKU-").labeled("Code");
//! assert!(sku.is_valid(&json!("SKU-12")));
//! assert_eq!(sku.describe(), "Code should start with SKU-.");
//! ```

mod async_rule;
mod config;
mod errors;
pub mod helpers;
mod message;
mod params;
mod reference;
mod rule;
pub mod rules;
mod schema;
mod traits;

pub use async_rule::AsyncRule;
pub use config::{ConfigError, FileFormat, MESSAGES_FILE_ENV, MessageConfig};
pub use errors::*;
pub use message::Message;
pub use params::{DEFAULT_LABEL, Params};
pub use reference::Reference;
pub use rule::Rule;
pub use schema::{FieldRules, FormRules};
pub use traits::*;
