// Environment-driven logging configuration

use crate::{Format, Level};
use std::env;
use std::io::IsTerminal;

/// Logging configuration.
///
/// Read once from the environment:
///
/// - `FORMWORK_DEBUG=1` lowers the default level to debug
/// - `FORMWORK_LOG_LEVEL=trace|debug|info|warn|error|off`
/// - `FORMWORK_LOG_FORMAT=pretty|compact|json`
/// - `FORMWORK_LOG_TIMESTAMPS=0` drops timestamps
/// - `FORMWORK_LOG_MODULE=0` drops the record target
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
    /// Whether the record target (module path) is printed
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Json,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let debug = env_flag("FORMWORK_DEBUG").unwrap_or(false);

        let level = env::var("FORMWORK_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Warn });

        // Interactive sessions get readable output unless told otherwise.
        let format = env::var("FORMWORK_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or_else(|| {
                if std::io::stderr().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            });

        Self {
            debug,
            level,
            format,
            timestamps: env_flag("FORMWORK_LOG_TIMESTAMPS").unwrap_or(true),
            module_path: env_flag("FORMWORK_LOG_MODULE").unwrap_or(true),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_flag(&v))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
