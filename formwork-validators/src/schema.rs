// Form schemas: field name -> rules

use crate::{
    AsyncRule, MessageConfig, Rule, ValidationContext, ValidationError, ValidationErrors,
};
use formwork_log::debug;
use serde_json::Value;

/// Rules for one field, evaluated in the order they were added.
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: String,
    rules: Vec<Rule>,
    async_rules: Vec<AsyncRule>,
}

impl FieldRules {
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }

    /// Add a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a rule that has to await. Only the `*_async` paths evaluate these.
    pub fn add_async(mut self, rule: AsyncRule) -> Self {
        self.async_rules.push(rule);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn async_rules(&self) -> &[AsyncRule] {
        &self.async_rules
    }

    /// Evaluate the synchronous rules against `value`.
    pub fn validate(
        &self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Result<(), Vec<ValidationError>> {
        into_result(self.evaluate(&self.field, value, ctx))
    }

    /// Evaluate the synchronous rules, then the asynchronous ones.
    pub async fn validate_async(
        &self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Result<(), Vec<ValidationError>> {
        into_result(self.evaluate_async(&self.field, value, ctx).await)
    }

    fn evaluate(&self, path: &str, value: &Value, ctx: &ValidationContext) -> Vec<ValidationError> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(path, value, ctx).err())
            .inspect(|error| {
                debug!(target: "formwork::schema", "{} failed {}: {}", path, error.constraint, error.message)
            })
            .collect()
    }

    async fn evaluate_async(
        &self,
        path: &str,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Vec<ValidationError> {
        let mut errors = self.evaluate(path, value, ctx);
        for rule in &self.async_rules {
            if let Err(error) = rule.check(path, value, ctx).await {
                debug!(target: "formwork::schema", "{} failed {}: {}", path, error.constraint, error.message);
                errors.push(error);
            }
        }
        errors
    }

    fn apply_messages(self, config: &MessageConfig) -> Self {
        Self {
            field: self.field,
            rules: self.rules.into_iter().map(|rule| config.apply(rule)).collect(),
            async_rules: self
                .async_rules
                .into_iter()
                .map(|rule| config.apply_async(rule))
                .collect(),
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// One field to evaluate, with the value and sibling state it sees.
struct Job {
    path: String,
    rules: FieldRules,
    value: Value,
    ctx: ValidationContext,
}

/// A form's validation schema.
///
/// Fields are looked up in the form object; a missing field is validated as
/// `null`. Nested groups validate a sub-object and report paths such as
/// `address.city`.
///
/// ```
/// use formwork_validators::{FieldRules, FormRules, rules};
/// use serde_json::json;
///
/// let schema = FormRules::new()
///     .field(FieldRules::for_field("name").add(rules::required().labeled("Name")))
///     .group(
///         "address",
///         FormRules::new()
///             .field(FieldRules::for_field("zip").add(rules::min_length(5).labeled("ZIP"))),
///     );
///
/// let errors = schema
///     .validate(&json!({"name": "", "address": {"zip": "123"}}))
///     .unwrap_err();
/// assert_eq!(errors.messages_for("name"), vec!["Name is required."]);
/// assert_eq!(errors.messages_for("address.zip"), vec!["ZIP should be at least 5 long."]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: Vec<FieldRules>,
    groups: Vec<(String, FormRules)>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Add a nested group validated against `form[name]`
    pub fn group(mut self, name: impl Into<String>, rules: FormRules) -> Self {
        self.groups.push((name.into(), rules));
        self
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Replace messages and default labels according to `config`.
    pub fn with_messages(self, config: &MessageConfig) -> Self {
        Self {
            fields: self
                .fields
                .into_iter()
                .map(|field| field.apply_messages(config))
                .collect(),
            groups: self
                .groups
                .into_iter()
                .map(|(name, group)| (name, group.with_messages(config)))
                .collect(),
        }
    }

    /// Validate all synchronous rules
    pub fn validate(&self, form: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for job in self.jobs(form) {
            errors.extend(job.rules.evaluate(&job.path, &job.value, &job.ctx));
        }
        errors.into_result()
    }

    /// Validate all rules, including asynchronous ones, field by field.
    pub async fn validate_async(&self, form: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for job in self.jobs(form) {
            errors.extend(job.rules.evaluate_async(&job.path, &job.value, &job.ctx).await);
        }
        errors.into_result()
    }

    /// Validate all fields concurrently, one task per field.
    ///
    /// Asynchronous rules are included. Errors come back in the same order as
    /// from [`validate_async`](FormRules::validate_async).
    pub async fn validate_parallel(&self, form: &Value) -> Result<(), ValidationErrors> {
        use tokio::task::JoinSet;

        let mut set = JoinSet::new();

        for (index, job) in self.jobs(form).into_iter().enumerate() {
            set.spawn(async move {
                let errors = job.rules.evaluate_async(&job.path, &job.value, &job.ctx).await;
                (index, errors)
            });
        }

        let mut results = Vec::new();
        while let Some(result) = set.join_next().await {
            match result {
                Ok(done) => results.push(done),
                Err(e) => {
                    return Err(ValidationErrors::new(vec![
                        ValidationError::new("unknown", format!("Validation task failed: {}", e))
                            .with_constraint("task_error"),
                    ]));
                }
            }
        }
        results.sort_by_key(|(index, _)| *index);

        let mut errors = ValidationErrors::default();
        for (_, field_errors) in results {
            errors.extend(field_errors);
        }
        errors.into_result()
    }

    fn jobs(&self, form: &Value) -> Vec<Job> {
        let mut jobs = Vec::new();
        self.collect_jobs(form, "", &mut jobs);
        jobs
    }

    fn collect_jobs(&self, form: &Value, prefix: &str, jobs: &mut Vec<Job>) {
        let ctx = ValidationContext::from_value(form);

        for rules in &self.fields {
            jobs.push(Job {
                path: join_path(prefix, rules.field()),
                value: ctx.get(rules.field()).cloned().unwrap_or(Value::Null),
                rules: rules.clone(),
                ctx: ctx.clone(),
            });
        }

        for (name, group) in &self.groups {
            let nested = ctx.get(name).cloned().unwrap_or(Value::Null);
            group.collect_jobs(&nested, &join_path(prefix, name), jobs);
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
