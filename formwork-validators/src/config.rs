// Message configuration: per-kind overrides and the default label

use crate::{AsyncRule, DEFAULT_LABEL, Message, Rule};
use formwork_log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a message configuration file
pub const MESSAGES_FILE_ENV: &str = "FORMWORK_MESSAGES_FILE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load message configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse message configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Message overrides for built-in and custom rules.
///
/// ```toml
/// default_label = "Ce champ"
///
/// [messages]
/// required = "{label} est obligatoire."
/// minLength = "{label} doit contenir au moins {length} caractères."
/// ```
///
/// Overrides are keyed by rule kind and written with `{param}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Label given to rules that still carry the built-in default label
    pub default_label: String,

    /// Rule kind -> message pattern
    pub messages: HashMap<String, String>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL.to_string(),
            messages: HashMap::new(),
        }
    }
}

impl MessageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    pub fn with_message(mut self, kind: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.messages.insert(kind.into(), pattern.into());
        self
    }

    /// Parse configuration from a string
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        match format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e))),
        }
    }

    /// Load a file, choosing the format from its extension
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;
        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;

        info!(
            target: "formwork::config",
            "loaded {} message overrides from {}",
            config.messages.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load the file named by `FORMWORK_MESSAGES_FILE`, or the defaults when
    /// it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(MESSAGES_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_file(path.trim()),
            _ => {
                debug!(target: "formwork::config", "{} unset, using default messages", MESSAGES_FILE_ENV);
                Ok(Self::default())
            }
        }
    }

    pub fn pattern_for(&self, kind: &str) -> Option<&str> {
        self.messages.get(kind).map(String::as_str)
    }

    /// Apply overrides to a rule.
    ///
    /// The message is replaced when an override exists for the rule's kind.
    /// The label is replaced only while the rule still has the built-in
    /// default label.
    pub fn apply(&self, rule: Rule) -> Rule {
        let rule = if self.relabels(rule.label()) {
            rule.labeled(self.default_label.clone())
        } else {
            rule
        };
        match self.pattern_for(rule.kind()) {
            Some(pattern) => rule.with_message(Message::pattern(pattern)),
            None => rule,
        }
    }

    pub fn apply_async(&self, rule: AsyncRule) -> AsyncRule {
        let rule = if self.relabels(rule.params().label()) {
            rule.labeled(self.default_label.clone())
        } else {
            rule
        };
        match self.pattern_for(rule.kind()) {
            Some(pattern) => rule.with_message(Message::pattern(pattern)),
            None => rule,
        }
    }

    fn relabels(&self, label: &str) -> bool {
        label == DEFAULT_LABEL && self.default_label != DEFAULT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{max_length, min_length, required};
    use std::io::Write;

    const TOML_CONFIG: &str = r#"
        default_label = "Ce champ"

        [messages]
        required = "{label} est obligatoire."
        minLength = "{label} doit contenir au moins {length} caractères."
    "#;

    #[test]
    fn test_parse_toml() {
        let config = MessageConfig::parse(TOML_CONFIG, FileFormat::Toml).unwrap();
        assert_eq!(config.default_label, "Ce champ");
        assert_eq!(config.pattern_for("required"), Some("{label} est obligatoire."));
        assert_eq!(config.pattern_for("maxLength"), None);
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let config =
            MessageConfig::parse(r#"{"messages": {"email": "Bad email"}}"#, FileFormat::Json)
                .unwrap();
        assert_eq!(config.default_label, DEFAULT_LABEL);
        assert_eq!(config.pattern_for("email"), Some("Bad email"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            MessageConfig::parse("{not json", FileFormat::Json),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            MessageConfig::parse("messages = 3", FileFormat::Toml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_apply_override_and_label() {
        let config = MessageConfig::parse(TOML_CONFIG, FileFormat::Toml).unwrap();

        let rule = config.apply(min_length(3));
        assert_eq!(rule.describe(), "Ce champ doit contenir au moins 3 caractères.");

        let rule = config.apply(required().labeled("Nom"));
        assert_eq!(rule.describe(), "Nom est obligatoire.");

        // No override: built-in message with the new default label
        let rule = config.apply(max_length(2));
        assert_eq!(rule.describe(), "Ce champ should be at most 2 long.");
    }

    #[test]
    fn test_apply_keeps_predicate() {
        let config = MessageConfig::new().with_message("minLength", "short");
        let rule = config.apply(min_length(3));
        assert!(!rule.is_valid(&serde_json::json!("ab")));
        assert!(rule.is_valid(&serde_json::json!("abc")));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_CONFIG.as_bytes()).unwrap();

        let config = MessageConfig::load_file(file.path()).unwrap();
        assert_eq!(config.messages.len(), 2);
    }

    #[test]
    fn test_load_file_errors() {
        assert!(matches!(
            MessageConfig::load_file("messages"),
            Err(ConfigError::LoadError(_))
        ));
        assert!(matches!(
            MessageConfig::load_file("messages.ini"),
            Err(ConfigError::LoadError(_))
        ));
        assert!(matches!(
            MessageConfig::load_file("/definitely/not/here/messages.json"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_from_env_without_variable() {
        // Only meaningful when the variable is not set for the test process.
        if std::env::var(MESSAGES_FILE_ENV).is_err() {
            assert_eq!(MessageConfig::from_env().unwrap(), MessageConfig::default());
        }
    }
}
