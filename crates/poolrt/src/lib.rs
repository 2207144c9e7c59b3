//! # poolrt
//!
//! A small worker-pool runtime: a fixed set of threads draining a FIFO task
//! queue, one-shot futures for retrieving results, a `map` combinator for
//! chaining dependent work, and a process-wide shutdown supervisor that
//! traps SIGINT/SIGTERM and drains every live pool before the process exits
//! with the signal's default disposition.
//!
//! ## Quick start
//!
//! ```ignore
//! use poolrt::{Pool, spawn, map};
//!
//! let pool = Pool::new(4).unwrap();
//! let a = spawn(&pool, || 6).unwrap();
//! let b = map(&pool, &a, |n| n * 7).unwrap();
//! assert_eq!(b.join(), Some(42));
//! pool.shutdown();
//! ```
//!
//! A pool registers itself with the shutdown supervisor as soon as it is
//! created; no extra wiring is needed for Ctrl-C to drain and join it before
//! the process terminates.

pub use poolrt_core::{
    env_get, env_get_bool, LogLevel, PoolError, PoolResult, SupervisorError,
};

pub use poolrt_core::{poolerror, poolwarn, poolinfo, pooldebug, pooltrace};
pub use poolrt_core::logging::{current_level, init as init_logging, set_log_level};

pub use poolrt_runtime::{map, spawn, Future, Pool, PoolConfig, Task};
