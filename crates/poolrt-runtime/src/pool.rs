//! Fixed-size worker pool: lifecycle, dispatch, and orderly shutdown
//!
//! Mirrors `threadpool.c`'s `thread_pool_t`/`work_thread` pair — a fixed set
//! of `pthread`s draining a shared queue under a stop flag and a condition
//! variable — but with the pool registered in the process-wide
//! [`crate::supervisor`] the way the original's `//TODO signals` comment
//! wished it could be.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use poolrt_core::{pooldebug, poolinfo, PoolError, PoolResult};

use crate::config::PoolConfig;
use crate::queue::{Task, TaskQueue};
use crate::supervisor;

/// Shared pool state, reachable both from the `Pool` handle its owner holds
/// and, via a `Weak` reference, from the shutdown supervisor.
pub(crate) struct PoolInner {
    queue: TaskQueue,
    num_threads: usize,
    handles: Mutex<Option<Vec<JoinHandle<()>>>>,
}

impl PoolInner {
    /// Is this pool refusing new submissions right now? Consulted by
    /// `defer` only — a racy, lock-free snapshot is fine there since it
    /// never gates a condvar wait, unlike the queue's own stopping bit.
    fn is_stopping(&self) -> bool {
        self.queue.is_stopping() || supervisor::deny_new_work()
    }

    /// Worker main loop (states S-Idle, S-Busy, S-Exiting in SPEC_FULL.md).
    fn worker_loop(self: Arc<Self>, idx: usize) {
        loop {
            match self.queue.pop_front_blocking() {
                Some(task) => {
                    pooldebug!("worker {idx} picked up a task");
                    task();
                    pooldebug!("worker {idx} finished a task");
                }
                None => {
                    // `pop_front_blocking` only returns `None` once the
                    // queue's own stopping flag is set and its deque is
                    // empty — both observed together under the queue's
                    // lock, so this can't be a stale read racing a late
                    // push. Nothing else to drain; exit.
                    break;
                }
            }
        }
    }

    /// Mark the pool as stopping and wake every worker. Idempotent.
    ///
    /// Delegates to the queue's own `stop`, which sets the flag and
    /// broadcasts under the same lock workers check that flag under —
    /// setting a bare flag here and notifying separately would reopen a
    /// window in which a worker's wakeup is missed and `shutdown`'s `join`
    /// never returns.
    pub(crate) fn stop(&self) {
        self.queue.stop();
    }

    /// Stop, then join every worker thread. Safe to call more than once —
    /// the second call finds `handles` already taken and is a no-op.
    pub(crate) fn shutdown(&self) {
        self.stop();
        let taken = self
            .handles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handles) = taken {
            for handle in handles {
                let _ = handle.join();
            }
            poolinfo!("pool shut down, all workers joined");
        }
    }

    fn set_handles(&self, handles: Vec<JoinHandle<()>>) {
        *self.handles.lock().unwrap_or_else(|e| e.into_inner()) = Some(handles);
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(num_threads: usize, queue_capacity_hint: usize) -> Self {
        Self {
            queue: TaskQueue::new(queue_capacity_hint),
            num_threads,
            handles: Mutex::new(Some(Vec::new())),
        }
    }
}

/// A fixed-size pool of worker threads draining a shared FIFO task queue.
///
/// Dropping a `Pool` stops it and joins every worker, the same as calling
/// [`Pool::shutdown`] explicitly.
pub struct Pool {
    inner: Arc<PoolInner>,
}

impl Pool {
    /// Start a pool with `num_threads` workers using default configuration.
    pub fn new(num_threads: usize) -> PoolResult<Pool> {
        Self::with_config(PoolConfig::new().num_threads(num_threads))
    }

    /// Start a pool using an explicit [`PoolConfig`].
    pub fn with_config(config: PoolConfig) -> PoolResult<Pool> {
        // Must happen before any worker thread is spawned: it blocks the
        // shutdown signals on the calling thread, and every thread spawned
        // afterwards (workers here, the supervisor's own thread) inherits
        // that mask.
        supervisor::ensure_initialized();

        let inner = Arc::new(PoolInner {
            queue: TaskQueue::new(config.queue_capacity_hint),
            num_threads: config.num_threads,
            handles: Mutex::new(None),
        });

        let mut handles = Vec::with_capacity(config.num_threads);
        for idx in 0..config.num_threads {
            let worker_inner = Arc::clone(&inner);
            match thread::Builder::new()
                .name(format!("poolrt-worker-{idx}"))
                .spawn(move || worker_inner.worker_loop(idx))
            {
                Ok(handle) => handles.push(handle),
                Err(_) => {
                    // Don't leave a half-started pool running: stop what
                    // did spawn and join it before reporting failure.
                    inner.set_handles(handles);
                    inner.shutdown();
                    return Err(PoolError::SpawnFailed);
                }
            }
        }

        inner.set_handles(handles);
        supervisor::register(&inner);
        poolinfo!("pool started with {} workers", config.num_threads);
        Ok(Pool { inner })
    }

    /// Enqueue a task. Refused once the pool is stopping or the process-wide
    /// supervisor has denied new work.
    pub fn defer<F>(&self, f: F) -> PoolResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.inner.is_stopping() {
            return Err(PoolError::Refused);
        }
        let task: Task = Box::new(f);
        self.inner.queue.push_back(task);
        Ok(())
    }

    /// Mark the pool as stopping. Already-enqueued tasks still run; no new
    /// ones are accepted afterwards. Idempotent.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Stop the pool (if not already) and join every worker. Safe to call
    /// more than once.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }

    /// Number of worker threads this pool was configured with.
    pub fn num_threads(&self) -> usize {
        self.inner.num_threads
    }

    /// Current queue depth. For tests/diagnostics only — always a stale
    /// snapshot the instant it's observed by anyone but the pool's own lock
    /// holder.
    pub fn pending_tasks(&self) -> usize {
        self.inner.queue.len()
    }

    pub(crate) fn inner(&self) -> &Arc<PoolInner> {
        &self.inner
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::{Duration, Instant};

    #[test]
    fn fifo_single_worker() {
        let pool = Pool::new(1).unwrap();
        let order = Arc::new(StdMutex::new(Vec::new()));

        for i in 0..10 {
            let order = order.clone();
            pool.defer(move || order.lock().unwrap().push(i)).unwrap();
        }

        pool.shutdown();
        assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn parallel_tasks_overlap() {
        let n = 4;
        let pool = Pool::new(n).unwrap();
        let delay = Duration::from_millis(60);

        let start = Instant::now();
        for _ in 0..n {
            pool.defer(move || std::thread::sleep(delay)).unwrap();
        }
        pool.shutdown();

        assert!(start.elapsed() < delay.mul_f64(1.5));
    }

    #[test]
    fn drain_on_stop_runs_all_pending_tasks() {
        let pool = Pool::new(2).unwrap();
        let completed = Arc::new(AtomicUsize::new(0));

        for _ in 0..20 {
            let completed = completed.clone();
            pool.defer(move || {
                completed.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        pool.stop();
        pool.shutdown();

        assert_eq!(completed.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn defer_after_stop_is_refused_and_not_executed() {
        let pool = Pool::new(1).unwrap();
        pool.stop();

        let ran = Arc::new(AtomicBool::new(false));
        let ran2 = ran.clone();
        let result = pool.defer(move || ran2.store(true, Ordering::SeqCst));

        pool.shutdown();

        assert_eq!(result, Err(PoolError::Refused));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn empty_pool_shutdown_completes() {
        let pool = Pool::new(2).unwrap();
        pool.shutdown();
        // A second shutdown (e.g. via Drop) must be a harmless no-op.
        pool.shutdown();
    }

    #[test]
    fn num_threads_reports_configured_count() {
        let pool = Pool::new(3).unwrap();
        assert_eq!(pool.num_threads(), 3);
        pool.shutdown();
    }
}
