// Failure messages

use crate::Params;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type TemplateFn = dyn Fn(&Params) -> String + Send + Sync;

/// The message a rule reports when its predicate fails.
///
/// Either fixed text or a function of the rule's own params. Rendering never
/// touches anything but the params passed in.
#[derive(Clone)]
pub enum Message {
    Static(Cow<'static, str>),
    Templated(Arc<TemplateFn>),
}

impl Message {
    pub fn fixed(text: impl Into<Cow<'static, str>>) -> Self {
        Message::Static(text.into())
    }

    pub fn templated<F>(template: F) -> Self
    where
        F: Fn(&Params) -> String + Send + Sync + 'static,
    {
        Message::Templated(Arc::new(template))
    }

    /// A template written with `{param}` placeholders.
    ///
    /// ```
    /// use formwork_validators::{Message, Params};
    ///
    /// let message = Message::pattern("{label} needs {length} characters");
    /// let params = Params::new().with("label", "PIN").with("length", 4);
    /// assert_eq!(message.render(&params), "PIN needs 4 characters");
    /// ```
    pub fn pattern(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self::templated(move |params| params.interpolate(&pattern))
    }

    pub fn render(&self, params: &Params) -> String {
        match self {
            Message::Static(text) => text.to_string(),
            Message::Templated(template) => template(params),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Message::Templated(_) => f.write_str("Templated(..)"),
        }
    }
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Message::Static(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Static(Cow::Owned(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_ignores_params() {
        let message = Message::from("Nope.");
        assert_eq!(message.render(&Params::new().with("label", "X")), "Nope.");
    }

    #[test]
    fn test_templated_reads_params() {
        let message = Message::templated(|p| format!("{}!", p.label()));
        assert_eq!(message.render(&Params::new().with("label", "Email")), "Email!");
        assert_eq!(message.render(&Params::new()), "This field!");
    }

    #[test]
    fn test_debug_hides_closure() {
        assert_eq!(format!("{:?}", Message::fixed("a")), "Static(\"a\")");
        assert_eq!(format!("{:?}", Message::pattern("{label}")), "Templated(..)");
    }
}
