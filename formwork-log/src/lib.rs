//! Formwork logging
//!
//! Environment-controlled logging shared by the Formwork crates. Validation
//! predicates never log; this crate is used by the layers around them
//! (schema evaluation, message configuration).
//!
//! # Usage
//!
//! ```rust
//! use formwork_log::{debug, info, warn};
//!
//! debug!("evaluating {} rules", 3);
//! info!(target: "formwork::config", "loaded message overrides");
//! warn!("unknown rule kind in overrides: {}", "minLenght");
//! ```
//!
//! Records written through the `log` facade can be routed here as well with
//! [`install`].

mod config;
mod level;
mod output;

pub use config::LogConfig;
pub use level::{Format, Level};

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Read the environment configuration now instead of on first use.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Lazy::force(&CONFIG);
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override the level at runtime.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    log::set_max_level(facade_filter());
}

/// Toggle debug mode at runtime. Enabling it lowers the level to debug.
pub fn set_debug(enabled: bool) {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
    log::set_max_level(facade_filter());
}

/// Whether a record at `level` is written.
///
/// Debug records are also written while the debug flag is on, whatever
/// the level, so `FORMWORK_DEBUG=1` works next to `FORMWORK_LOG_LEVEL=warn`.
pub fn emits(level: Level) -> bool {
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

// The `log` facade drops records above its max level before they reach us.
fn facade_filter() -> log::LevelFilter {
    let level = current_level();
    let level = if is_debug_enabled() { level.min(Level::Debug) } else { level };
    level.to_level_filter()
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if emits(level) {
        output::write_record(config(), level, target, message);
    }
}

// ============================================================================
// `log` facade bridge
// ============================================================================

struct FormworkLogger;

impl log::Log for FormworkLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        emits(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            crate::log(
                record.level().into(),
                record.target(),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: FormworkLogger = FormworkLogger;

/// Install this crate as the `log` facade's global logger.
///
/// Fails if another logger was installed first.
pub fn install() -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(facade_filter());
    Ok(())
}

// ============================================================================
// Macros
// ============================================================================

// Every level macro accepts an optional `target: "..."` prefix and a
// `format!` argument list. Arguments are only formatted when `emits` says
// the record will be written.

#[doc(hidden)]
#[macro_export]
macro_rules! __record {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::emits($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__record!($level, target: module_path!(), $($arg)+)
    };
}

/// Finest-grained records, such as per-rule evaluation.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Trace, $($arg)+) };
}

/// Debug records. Written at level debug or lower, or while
/// `FORMWORK_DEBUG` is on.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Warn, $($arg)+) };
}

/// Errors. Only `FORMWORK_LOG_LEVEL=off` silences these.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Error, $($arg)+) };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber honouring the Formwork level.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let level = current_level().as_str().to_lowercase();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config().format == Format::Pretty))
    }
}
