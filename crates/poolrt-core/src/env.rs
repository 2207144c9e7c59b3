//! Environment variable utilities
//!
//! Generic `env_get<T>` function for parsing environment variables with
//! defaults, mirroring the convention used by the rest of the workspace's
//! `POOLRT_*`-prefixed knobs.
//!
//! # Usage
//!
//! ```ignore
//! use poolrt_core::env::{env_get, env_get_bool};
//!
//! let workers: usize = env_get("POOLRT_WORKERS", 4);
//! let timeout: u64 = env_get("POOLRT_TIMEOUT_MS", 1000);
//!
//! // Boolean helper (accepts "1", "true", "yes", "on")
//! let time: bool = env_get_bool("POOLRT_LOG_TIME", false);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as type T, or return default
///
/// Works with any type that implements `FromStr`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Get environment variable as boolean
///
/// Accepts: "1", "true", "yes", "on" (case-insensitive) as true.
/// Everything else (including unset) returns the default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_get_falls_back_to_default_when_unset() {
        let v: usize = env_get("POOLRT_TEST_DOES_NOT_EXIST_XYZ", 42);
        assert_eq!(v, 42);
    }

    #[test]
    fn env_get_bool_accepts_common_truthy_spellings() {
        std::env::set_var("POOLRT_TEST_BOOL_A", "yes");
        std::env::set_var("POOLRT_TEST_BOOL_B", "0");
        assert!(env_get_bool("POOLRT_TEST_BOOL_A", false));
        assert!(!env_get_bool("POOLRT_TEST_BOOL_B", true));
        std::env::remove_var("POOLRT_TEST_BOOL_A");
        std::env::remove_var("POOLRT_TEST_BOOL_B");
    }
}
