// The validator descriptor

use crate::helpers::coerce_to_string;
use crate::{
    AsyncValidator, DEFAULT_LABEL, Message, Params, ValidationContext, ValidationError, Validator,
};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&Value, &ValidationContext) -> bool + Send + Sync;

/// One validation rule: a predicate, a failure message and the params both
/// were built from.
///
/// A `Rule` never changes after construction. Cloning is cheap and clones
/// share the same params. [`labeled`](Rule::labeled) and
/// [`with_message`](Rule::with_message) are for schema definition time: they
/// consume the rule and return a new one.
///
/// ```
/// use formwork_validators::{Message, Params, Rule, helpers};
/// use serde_json::json;
///
/// let even = Rule::new(
///     "even",
///     Params::new().with("label", "Seats"),
///     |value, _| !helpers::req(value) || value.as_i64().is_some_and(|n| n % 2 == 0),
///     Message::pattern("{label} should be even."),
/// );
///
/// assert!(even.is_valid(&json!(4)));
/// assert!(!even.is_valid(&json!(3)));
/// assert_eq!(even.describe(), "Seats should be even.");
/// ```
#[derive(Clone)]
pub struct Rule {
    kind: Cow<'static, str>,
    predicate: Arc<Predicate>,
    message: Message,
    params: Arc<Params>,
}

impl Rule {
    pub fn new<F>(
        kind: impl Into<Cow<'static, str>>,
        params: Params,
        predicate: F,
        message: impl Into<Message>,
    ) -> Self
    where
        F: Fn(&Value, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
            params: Arc::new(params),
        }
    }

    /// A custom rule over the value alone, labelled with the default label.
    pub fn from_fn<F>(kind: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(
            kind,
            Params::new().with("label", DEFAULT_LABEL),
            move |value, _| predicate(value),
            Message::pattern("{label} is invalid."),
        )
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &Arc<Params> {
        &self.params
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn label(&self) -> &str {
        self.params.label()
    }

    /// Render the failure message from this rule's params.
    pub fn describe(&self) -> String {
        self.message.render(&self.params)
    }

    pub fn validate(&self, value: &Value, ctx: &ValidationContext) -> bool {
        (self.predicate)(value, ctx)
    }

    /// Validate without sibling state.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value, &ValidationContext::new())
    }

    /// Validate and turn a failure into a reportable error for `field`.
    pub fn check(
        &self,
        field: &str,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        if self.validate(value, ctx) {
            Ok(())
        } else {
            Err(failure(field, &self.kind, self.describe(), value, &self.params))
        }
    }

    /// Same rule with a different `label` param.
    pub fn labeled(self, label: impl Into<String>) -> Self {
        let params = (*self.params).clone().with("label", label.into());
        Self {
            params: Arc::new(params),
            ..self
        }
    }

    /// Same rule with a different message.
    pub fn with_message(self, message: impl Into<Message>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }
}

pub(crate) fn failure(
    field: &str,
    kind: &str,
    message: String,
    value: &Value,
    params: &Params,
) -> ValidationError {
    let error = ValidationError::new(field, message)
        .with_constraint(kind)
        .with_params(params.to_json());
    match value {
        Value::Null => error,
        other => error.with_value(coerce_to_string(other).into_owned()),
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Validator for Rule {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> bool {
        Rule::validate(self, value, ctx)
    }

    fn describe(&self) -> String {
        Rule::describe(self)
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn name(&self) -> &str {
        &self.kind
    }
}

#[async_trait]
impl AsyncValidator for Rule {
    async fn validate_async(&self, value: &Value, ctx: &ValidationContext) -> bool {
        Rule::validate(self, value, ctx)
    }

    fn describe(&self) -> String {
        Rule::describe(self)
    }

    fn name(&self) -> &str {
        &self.kind
    }
}
