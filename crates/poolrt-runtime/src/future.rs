//! One-shot future: a single-assignment result cell with blocking retrieval
//!
//! Modeled directly on `future.c`'s `future_t` (a mutex/condvar pair guarding
//! a `ready` flag and a result pointer) but generic over the result type and
//! without ever exposing the raw mutex/condvar to callers.

use std::sync::{Condvar, Mutex};

struct FutureState<T> {
    ready: bool,
    value: Option<T>,
}

/// A single-assignment cell that delivers the result of a task scheduled on
/// a `Pool`.
///
/// A `Future<T>` is always handed out already wired to the task that will
/// fulfil it (via `spawn`/`map`); there is no public constructor for an
/// "empty" future with no producer.
pub struct Future<T> {
    state: Mutex<FutureState<T>>,
    ready_cond: Condvar,
}

impl<T> Future<T> {
    /// Construct a pending future. Crate-private: only `spawn`/`map` should
    /// create one, paired with the task that will fulfil it.
    pub(crate) fn pending() -> Self {
        Self {
            state: Mutex::new(FutureState {
                ready: false,
                value: None,
            }),
            ready_cond: Condvar::new(),
        }
    }

    /// Fulfil the future. Invoked exactly once, by the worker executing the
    /// task this future represents.
    pub(crate) fn fulfil(&self, value: T) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug_assert!(!guard.ready, "a future may only be fulfilled once");
        guard.value = Some(value);
        guard.ready = true;
        drop(guard);
        self.ready_cond.notify_all();
    }

    /// Non-blocking poll: has this future been fulfilled yet?
    pub fn is_ready(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).ready
    }

    /// Block until fulfilled, then take the value out of the cell.
    ///
    /// Calling `join` more than once on the same future returns `None` on
    /// every call after the first, since the value is moved out. Futures
    /// whose `T: Clone` should prefer `join_ref`, which can be called
    /// repeatedly and from multiple threads.
    pub fn join(&self) -> Option<T> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while !guard.ready {
            guard = self
                .ready_cond
                .wait(guard)
                .unwrap_or_else(|e| e.into_inner());
        }
        guard.value.take()
    }
}

impl<T: Clone> Future<T> {
    /// Block until fulfilled, then return a clone of the value. Safe to call
    /// from any number of threads, any number of times; every call observes
    /// the same value (broadcast wake via `notify_all`).
    pub fn join_ref(&self) -> T {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while !guard.ready {
            guard = self
                .ready_cond
                .wait(guard)
                .unwrap_or_else(|e| e.into_inner());
        }
        guard
            .value
            .clone()
            .expect("ready implies value is present")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn join_blocks_until_fulfilled() {
        let future = Arc::new(Future::pending());
        let f2 = future.clone();

        let handle = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            f2.fulfil(42);
        });

        assert_eq!(future.join(), Some(42));
        handle.join().unwrap();
    }

    #[test]
    fn join_ref_is_observable_from_many_threads() {
        let future: Arc<Future<u64>> = Arc::new(Future::pending());
        future.fulfil(7);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let f = future.clone();
                thread::spawn(move || f.join_ref())
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), 7);
        }
    }

    #[test]
    fn is_ready_reflects_fulfilment() {
        let future = Future::pending();
        assert!(!future.is_ready());
        future.fulfil("done");
        assert!(future.is_ready());
    }

    #[test]
    fn join_after_first_consumes_value_returns_none() {
        let future = Future::pending();
        future.fulfil(5);
        assert_eq!(future.join(), Some(5));
        assert_eq!(future.join(), None);
    }
}
