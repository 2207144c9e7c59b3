//! Scheduling a computation onto a pool and chaining onto its result
//!
//! Grounded in `silnia.c`/`macierz.c`'s `async`/`map` free functions — they
//! take a pool and a function, allocate a `future_t`, `defer` a wrapper
//! closure that calls the function and fulfils the future, and hand the
//! future back. `map` additionally blocks on the source future from inside
//! the deferred closure before running its own function, which is the
//! realization kept here (see `SPEC_FULL.md` §4.4/§9 for the alternative
//! considered and rejected).

use std::sync::Arc;

use poolrt_core::PoolResult;

use crate::future::Future;
use crate::pool::Pool;

/// Schedule `f` on `pool` and return a future for its result.
///
/// Fails the same way [`Pool::defer`] fails: the pool is stopping, or the
/// process-wide supervisor has denied new work.
pub fn spawn<T, F>(pool: &Pool, f: F) -> PoolResult<Arc<Future<T>>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let future = Arc::new(Future::pending());
    let sink = Arc::clone(&future);
    pool.defer(move || {
        let value = f();
        sink.fulfil(value);
    })?;
    Ok(future)
}

/// Schedule `f(source.join_ref())` on `pool`, run only once `source` is ready.
///
/// Reads the source via `join_ref` rather than the consuming `join`, so the
/// same source future may feed more than one `map` call. Requires `T:
/// Clone` for that reason. The deferred task blocks on `source` before
/// invoking `f` — a worker thread sits idle for the duration, so chaining a
/// long `map` pipeline ties up one worker per link in flight. That tradeoff
/// mirrors the original: a continuation-style realization that re-enqueues
/// itself when the source becomes ready would free the worker while
/// waiting, at the cost of a more complex wakeup path with no counterpart in
/// the source material.
pub fn map<T, U, F>(pool: &Pool, source: &Arc<Future<T>>, f: F) -> PoolResult<Arc<Future<U>>>
where
    T: Clone + Send + 'static,
    U: Send + 'static,
    F: FnOnce(T) -> U + Send + 'static,
{
    let future = Arc::new(Future::pending());
    let sink = Arc::clone(&future);
    let source = Arc::clone(source);
    pool.defer(move || {
        let input = source.join_ref();
        let value = f(input);
        sink.fulfil(value);
    })?;
    Ok(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn spawn_runs_and_delivers_result() {
        let pool = Pool::new(2).unwrap();
        let future = spawn(&pool, || 2 + 2).unwrap();
        assert_eq!(future.join(), Some(4));
        pool.shutdown();
    }

    #[test]
    fn map_chains_onto_source_result() {
        let pool = Pool::new(2).unwrap();
        let base = spawn(&pool, || 3).unwrap();
        let doubled = map(&pool, &base, |n| n * 2).unwrap();
        assert_eq!(doubled.join(), Some(6));
        pool.shutdown();
    }

    #[test]
    fn map_chain_runs_in_order() {
        let pool = Pool::new(1).unwrap();
        let a = spawn(&pool, || 1u64).unwrap();
        let b = map(&pool, &a, |n| n + 1).unwrap();
        let c = map(&pool, &b, |n| n * 10).unwrap();
        let d = map(&pool, &c, |n| n - 5).unwrap();
        assert_eq!(d.join(), Some(15));
        pool.shutdown();
    }

    #[test]
    fn spawn_refused_after_pool_stopped() {
        let pool = Pool::new(1).unwrap();
        pool.stop();
        let result = spawn(&pool, || 1);
        pool.shutdown();
        assert!(result.is_err());
    }

    #[test]
    fn many_independent_spawns_all_resolve() {
        let pool = Pool::new(4).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let futures: Vec<_> = (0..50)
            .map(|i| {
                let counter = counter.clone();
                spawn(&pool, move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    i * i
                })
                .unwrap()
            })
            .collect();

        for (i, future) in futures.into_iter().enumerate() {
            assert_eq!(future.join(), Some(i * i));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 50);
        pool.shutdown();
    }
}
