//! Built-in rule factories.
//!
//! Every factory returns a [`Rule`](crate::Rule) carrying a `label` param set
//! to [`DEFAULT_LABEL`](crate::DEFAULT_LABEL); use
//! [`Rule::labeled`](crate::Rule::labeled) to name the field. Apart from the
//! `required*` family, `same_as` and the combinators, empty input (`null`,
//! `""`, `[]`, `{}`) always passes: presence is a separate rule.

mod equality;
mod format;
mod length;
mod logic;
mod numeric;
mod presence;

pub use equality::same_as;
pub use format::{alpha, alpha_num, email, ip_address, mac_address, matches, url};
pub use length::{max_length, min_length};
pub use logic::{and, not, or};
pub use numeric::{between, decimal, integer, max_value, min_value, numeric};
pub use presence::{required, required_if, required_unless};

use crate::{DEFAULT_LABEL, Params};

/// Params for a built-in rule: the rule's own values plus the default label.
pub(crate) fn labeled_params(params: Params) -> Params {
    params.with("label", DEFAULT_LABEL)
}
