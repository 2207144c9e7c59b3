//! # poolrt-core
//!
//! Platform-agnostic types shared by the `poolrt` worker-pool runtime:
//! errors, environment-variable helpers, and the hand-rolled logging
//! macros. No threads, locks, or pool logic live here — that is
//! `poolrt-runtime`'s job.
//!
//! ## Modules
//!
//! - `error` - `PoolError`/`SupervisorError` and their `Result` aliases
//! - `env` - generic `env_get<T>`/`env_get_bool` environment parsing
//! - `logging` - level-gated `poolerror!`/`poolwarn!`/.../`pooltrace!` macros

pub mod env;
pub mod error;
pub mod logging;

pub use env::{env_get, env_get_bool};
pub use error::{PoolError, PoolResult, SupervisorError};
pub use logging::LogLevel;

/// Constants shared across the runtime
pub mod constants {
    /// Upper bound on worker threads a single pool will honour; a config
    /// asking for more is silently clamped to this value.
    pub const MAX_WORKERS: usize = 256;
}
