// Rules with asynchronous predicates

use crate::rule::failure;
use crate::{AsyncValidator, Message, Params, ValidationContext, ValidationError};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type AsyncPredicate = dyn Fn(Value, ValidationContext) -> BoxFuture<bool> + Send + Sync;

/// A rule whose predicate has to await, e.g. checking that a username is
/// still free.
///
/// The predicate receives owned copies of the value and the sibling state so
/// the returned future can outlive the call. Empty-value handling is up to the
/// predicate; [`helpers::req`](crate::helpers::req) is the usual first check.
///
/// ```
/// use formwork_validators::{AsyncRule, Message, Params, helpers};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let unique = AsyncRule::new(
///     "unique",
///     Params::new().with("label", "Username"),
///     |value, _| async move { !helpers::req(&value) || value != json!("admin") },
///     Message::pattern("{label} is already taken."),
/// );
///
/// assert!(unique.is_valid(&json!("alice")).await);
/// assert!(!unique.is_valid(&json!("admin")).await);
/// # });
/// ```
#[derive(Clone)]
pub struct AsyncRule {
    kind: Cow<'static, str>,
    predicate: Arc<AsyncPredicate>,
    message: Message,
    params: Arc<Params>,
}

impl AsyncRule {
    pub fn new<F, Fut>(
        kind: impl Into<Cow<'static, str>>,
        params: Params,
        predicate: F,
        message: impl Into<Message>,
    ) -> Self
    where
        F: Fn(Value, ValidationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let predicate = move |value: Value, ctx: ValidationContext| -> BoxFuture<bool> {
            Box::pin(predicate(value, ctx))
        };
        Self {
            kind: kind.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
            params: Arc::new(params),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &Arc<Params> {
        &self.params
    }

    pub fn describe(&self) -> String {
        self.message.render(&self.params)
    }

    pub async fn validate(&self, value: &Value, ctx: &ValidationContext) -> bool {
        (self.predicate)(value.clone(), ctx.clone()).await
    }

    pub async fn is_valid(&self, value: &Value) -> bool {
        self.validate(value, &ValidationContext::new()).await
    }

    pub async fn check(
        &self,
        field: &str,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Result<(), ValidationError> {
        if self.validate(value, ctx).await {
            Ok(())
        } else {
            Err(failure(field, &self.kind, self.describe(), value, &self.params))
        }
    }

    pub fn labeled(self, label: impl Into<String>) -> Self {
        let params = (*self.params).clone().with("label", label.into());
        Self {
            params: Arc::new(params),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<Message>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }
}

impl fmt::Debug for AsyncRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRule")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AsyncValidator for AsyncRule {
    async fn validate_async(&self, value: &Value, ctx: &ValidationContext) -> bool {
        AsyncRule::validate(self, value, ctx).await
    }

    fn describe(&self) -> String {
        AsyncRule::describe(self)
    }

    fn name(&self) -> &str {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::req;
    use serde_json::json;
    use std::collections::HashSet;
    use std::time::Duration;

    fn unique_username(taken: &[&str]) -> AsyncRule {
        let taken: Arc<HashSet<String>> = Arc::new(taken.iter().map(|s| s.to_string()).collect());
        AsyncRule::new(
            "unique",
            Params::new().with("label", "This field"),
            move |value, _| {
                let taken = Arc::clone(&taken);
                async move {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    match value.as_str() {
                        Some(name) => !taken.contains(name),
                        None => !req(&value),
                    }
                }
            },
            Message::pattern("{label} is already taken."),
        )
    }

    #[tokio::test]
    async fn test_async_rule_validates() {
        let rule = unique_username(&["admin", "root"]);
        assert!(rule.is_valid(&json!("alice")).await);
        assert!(!rule.is_valid(&json!("root")).await);
        assert!(rule.is_valid(&Value::Null).await);
    }

    #[tokio::test]
    async fn test_async_rule_check() {
        let rule = unique_username(&["admin"]).labeled("Username");
        let error = rule
            .check("username", &json!("admin"), &ValidationContext::new())
            .await
            .unwrap_err();
        assert_eq!(error.constraint, "unique");
        assert_eq!(error.message, "Username is already taken.");
        assert_eq!(error.value.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_async_rule_sees_context() {
        let rule = AsyncRule::new(
            "differsFromOld",
            Params::new(),
            |value, ctx| async move { ctx.get("old") != Some(&value) },
            "Pick a new value.",
        );
        let ctx = ValidationContext::new().with_field("old", "x");
        assert!(!rule.validate(&json!("x"), &ctx).await);
        assert!(rule.validate(&json!("y"), &ctx).await);
        assert_eq!(rule.describe(), "Pick a new value.");
    }

    #[tokio::test]
    async fn test_trait_object() {
        let rules: Vec<Box<dyn AsyncValidator>> =
            vec![Box::new(unique_username(&["x"])), Box::new(crate::rules::min_length(2))];
        let ctx = ValidationContext::new();
        let mut results = Vec::new();
        for rule in &rules {
            results.push((rule.name().to_string(), rule.validate_async(&json!("x"), &ctx).await));
        }
        assert_eq!(
            results,
            vec![("unique".to_string(), false), ("minLength".to_string(), false)]
        );
    }
}
