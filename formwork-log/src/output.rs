// Record rendering

use crate::{Format, Level, LogConfig};
use std::io::Write;

pub(crate) fn write_record(config: &LogConfig, level: Level, target: &str, message: &str) {
    let line = match config.format {
        Format::Pretty => render_pretty(config, level, target, message),
        Format::Compact => render_compact(config, level, target, message),
        Format::Json => render_json(level, target, message),
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

fn render_pretty(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();
    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
    }
    line.push_str(&format!("{:5} ", level.as_str()));
    if config.module_path && !target.is_empty() {
        line.push_str(&format!("[{}] ", target));
    }
    line.push_str(message);
    line
}

fn render_compact(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    let mut line = String::new();
    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
    }
    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    if config.module_path && !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }
    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&record).unwrap_or_default()
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape_json(target),
        escape_json(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> LogConfig {
        LogConfig {
            timestamps: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_pretty_line() {
        let line = render_pretty(&plain(), Level::Debug, "formwork::schema", "rule failed");
        assert_eq!(line, "DEBUG [formwork::schema] rule failed");
    }

    #[test]
    fn test_compact_line() {
        let line = render_compact(&plain(), Level::Warn, "cfg", "missing override");
        assert_eq!(line, "W cfg: missing override");
    }

    #[test]
    fn test_target_omitted_when_disabled() {
        let config = LogConfig {
            module_path: false,
            ..plain()
        };
        assert_eq!(render_pretty(&config, Level::Info, "x", "msg"), "INFO  msg");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_line_is_parseable() {
        let line = render_json(Level::Error, "t", "quote \" inside");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["message"], "quote \" inside");
    }
}
