//! Pool configuration

use poolrt_core::LogLevel;

/// Configuration for a `Pool`
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads (defaults to available CPU count)
    pub num_threads: usize,

    /// Hint passed to the queue's `VecDeque::with_capacity`; purely an
    /// allocation-avoidance hint, not an enforced bound
    pub queue_capacity_hint: usize,

    /// Log level workers/pool/supervisor use for their own diagnostics
    pub log_level: LogLevel,
}

impl Default for PoolConfig {
    fn default() -> Self {
        let num_cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            num_threads: num_cpus.min(poolrt_core::constants::MAX_WORKERS),
            queue_capacity_hint: 16,
            log_level: LogLevel::Info,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads, clamped to `MAX_WORKERS`
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = n.clamp(1, poolrt_core::constants::MAX_WORKERS);
        self
    }

    /// Set the queue capacity hint
    pub fn queue_capacity_hint(mut self, n: usize) -> Self {
        self.queue_capacity_hint = n;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_num_threads_is_at_least_one() {
        assert!(PoolConfig::default().num_threads >= 1);
    }

    #[test]
    fn num_threads_is_clamped_to_max_workers() {
        let cfg = PoolConfig::new().num_threads(10_000);
        assert_eq!(cfg.num_threads, poolrt_core::constants::MAX_WORKERS);
    }

    #[test]
    fn num_threads_floor_is_one() {
        let cfg = PoolConfig::new().num_threads(0);
        assert_eq!(cfg.num_threads, 1);
    }
}
