// Formwork - declarative validation rules for form-validation frameworks
//
// Rule factories produce immutable descriptors (predicate, message, params)
// that any form engine can run. The member crates are re-exported here.

pub use formwork_validators::*;

pub use formwork_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::rules::*;
    pub use crate::{
        AsyncRule, FieldRules, FormRules, Message, MessageConfig, Params, Reference, Rule,
        ValidationContext, ValidationError, ValidationErrors, Validator,
    };
    pub use serde_json::{Value, json};
}
