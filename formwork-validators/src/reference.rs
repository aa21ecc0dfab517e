// References to sibling state

use crate::ValidationContext;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type ResolveFn = dyn Fn(&ValidationContext) -> Value + Send + Sync;

/// Where a cross-field rule reads its other value from.
///
/// Strings convert to [`Reference::Field`]; booleans convert to constants.
#[derive(Clone)]
pub enum Reference {
    /// A sibling field by name. Missing fields resolve to `null`.
    Field(String),
    /// A fixed value
    Constant(Value),
    /// Computed from the sibling state
    Computed(Arc<ResolveFn>),
}

impl Reference {
    pub fn computed<F>(resolve: F) -> Self
    where
        F: Fn(&ValidationContext) -> Value + Send + Sync + 'static,
    {
        Reference::Computed(Arc::new(resolve))
    }

    pub fn resolve(&self, ctx: &ValidationContext) -> Value {
        match self {
            Reference::Field(name) => ctx.get(name).cloned().unwrap_or(Value::Null),
            Reference::Constant(value) => value.clone(),
            Reference::Computed(resolve) => resolve(ctx),
        }
    }

    /// How the reference appears in params and messages.
    pub(crate) fn param(&self) -> Value {
        match self {
            Reference::Field(name) => Value::String(name.clone()),
            Reference::Constant(value) => value.clone(),
            Reference::Computed(_) => Value::String("the expected value".to_string()),
        }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Reference::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Reference::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Reference {
    fn from(name: &str) -> Self {
        Reference::Field(name.to_string())
    }
}

impl From<String> for Reference {
    fn from(name: String) -> Self {
        Reference::Field(name)
    }
}

impl From<bool> for Reference {
    fn from(flag: bool) -> Self {
        Reference::Constant(Value::Bool(flag))
    }
}
