// Validation traits

use crate::Params;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A validation rule as seen by a form engine.
///
/// Implemented by [`Rule`](crate::Rule); engines that only need a predicate,
/// a message and the params can depend on this trait alone.
pub trait Validator: Send + Sync {
    /// `true` when `value` is valid
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> bool;

    /// Failure message rendered from the rule's own params
    fn describe(&self) -> String;

    fn params(&self) -> &Params;

    /// Rule kind
    fn name(&self) -> &str;
}

/// A validation rule that may need to await (e.g. a uniqueness lookup).
#[async_trait]
pub trait AsyncValidator: Send + Sync {
    async fn validate_async(&self, value: &Value, ctx: &ValidationContext) -> bool;

    fn describe(&self) -> String;

    fn name(&self) -> &str;
}

/// Sibling state of the value being validated.
///
/// Holds the other fields of the object that contains the validated field, so
/// rules such as `same_as` and `required_if` can look at them.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    siblings: Arc<Map<String, Value>>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for the fields of `form`. Non-object values give an empty context.
    pub fn from_value(form: &Value) -> Self {
        match form {
            Value::Object(map) => Self {
                siblings: Arc::new(map.clone()),
            },
            _ => Self::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.siblings).insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.siblings.get(key)
    }

    pub fn siblings(&self) -> &Map<String, Value> {
        &self.siblings
    }
}
