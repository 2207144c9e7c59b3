//! Worker pool, one-shot futures, and the process-wide shutdown supervisor
//!
//! - [`Pool`] — a fixed-size worker pool draining a shared FIFO task queue
//! - [`Future`] — a single-assignment result cell, fulfilled by a worker
//! - [`spawn`]/[`map`] — schedule work onto a pool and chain onto its result
//! - the shutdown supervisor (private, wired in automatically) traps
//!   SIGINT/SIGTERM and drains every live pool before the process exits

mod async_map;
mod config;
mod future;
mod pool;
mod queue;
mod supervisor;

pub use async_map::{map, spawn};
pub use config::PoolConfig;
pub use future::Future;
pub use pool::Pool;
pub use queue::Task;

pub use poolrt_core::{PoolError, PoolResult};
