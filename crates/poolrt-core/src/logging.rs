//! Kernel-style print macros for the pool runtime
//!
//! Provides thread-safe, level-gated debug output similar to Linux kernel's
//! printk, in the same spirit as a hand-rolled logging shim — no `log` or
//! `tracing` dependency, just an env-driven level and a macro per level.
//!
//! # Environment Variables
//!
//! - `POOLRT_LOG_LEVEL=<level>` - off=0, error=1, warn=2, info=3, debug=4, trace=5
//! - `POOLRT_LOG_TIME=1` - include a millisecond-since-start timestamp
//!
//! # Output Format
//!
//! Without timestamp: `[LEVEL] message`
//! With timestamp:    `[LEVEL] [<ms>] message`

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use crate::env::env_get_bool;

/// Log levels, ordered so that `level <= LOG_LEVEL` gates emission
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize logging from environment variables
///
/// Called automatically on first log, but can be called explicitly for
/// deterministic initialization (e.g. at the top of `main`).
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let level: u8 = crate::env::env_get("POOLRT_LOG_LEVEL", LogLevel::Info as u8);
    LOG_LEVEL.store(level, Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("POOLRT_LOG_TIME", false), Ordering::Relaxed);
    START_TIME.get_or_init(Instant::now);
}

#[inline]
pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

#[inline]
pub fn current_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Internal: called by the macros, not meant to be invoked directly
#[doc(hidden)]
pub fn emit(level: LogLevel, args: std::fmt::Arguments<'_>) {
    init();
    if level > current_level() {
        return;
    }
    let mut stderr = std::io::stderr();
    if TIME_ENABLED.load(Ordering::Relaxed) {
        let start = *START_TIME.get_or_init(Instant::now);
        let ms = start.elapsed().as_millis();
        let _ = writeln!(stderr, "{} [{:>8}ms] {}", level.prefix(), ms, args);
    } else {
        let _ = writeln!(stderr, "{} {}", level.prefix(), args);
    }
}

/// Log at `Error` level
#[macro_export]
macro_rules! poolerror {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Error, format_args!($($arg)*))
    };
}

/// Log at `Warn` level
#[macro_export]
macro_rules! poolwarn {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, format_args!($($arg)*))
    };
}

/// Log at `Info` level
#[macro_export]
macro_rules! poolinfo {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Log at `Debug` level
#[macro_export]
macro_rules! pooldebug {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Debug, format_args!($($arg)*))
    };
}

/// Log at `Trace` level
#[macro_export]
macro_rules! pooltrace {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Trace, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_gates_by_severity() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Debug < LogLevel::Trace);
        assert!(LogLevel::Off < LogLevel::Error);
    }

    #[test]
    fn from_u8_round_trips_known_levels() {
        assert_eq!(LogLevel::from_u8(3), LogLevel::Info);
        assert_eq!(LogLevel::from_u8(99), LogLevel::Trace);
    }
}
