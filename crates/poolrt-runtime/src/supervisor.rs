//! Process-wide shutdown supervisor
//!
//! Translates a terminal signal (SIGINT/SIGTERM) into an orderly shutdown of
//! every live `Pool`, then re-raises the signal with its default
//! disposition so the process exits with conventional signal-based status.
//!
//! Running pool shutdown and thread joins inside an actual signal handler
//! would mean calling non-async-signal-safe code (mutex locks, `join`) from
//! a handler — unsound on any platform. Instead a dedicated thread blocks
//! the target signals and calls `sigwait`, which is the only portable way to
//! react to a signal with ordinary blocking code. Every other thread
//! (workers included) blocks the same signals at birth by inheriting the
//! mask from the thread that first touches the supervisor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, Weak};

use poolrt_core::poolwarn;

use crate::pool::PoolInner;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        use unix as imp;
    } else {
        use other as imp;
    }
}

struct Supervisor {
    deny: AtomicBool,
    pools: Mutex<Vec<Weak<PoolInner>>>,
}

static SUPERVISOR: OnceLock<Supervisor> = OnceLock::new();

/// Ensure the supervisor (and its signal-handling thread) exists.
///
/// Must be called — and have returned — before any pool spawns its own
/// worker threads, so that the signal mask installed here is inherited by
/// every thread spawned afterwards.
pub(crate) fn ensure_initialized() {
    let _ = supervisor();
}

fn supervisor() -> &'static Supervisor {
    SUPERVISOR.get_or_init(|| {
        imp::block_shutdown_signals();
        imp::spawn_signal_thread();
        Supervisor {
            deny: AtomicBool::new(false),
            pools: Mutex::new(Vec::new()),
        }
    })
}

/// Register a pool so the supervisor will shut it down on a terminal signal.
///
/// Prunes already-dead entries first so the registry does not grow without
/// bound across many short-lived pools (P9).
pub(crate) fn register(inner: &std::sync::Arc<PoolInner>) {
    let sup = supervisor();
    let mut pools = sup.pools.lock().unwrap_or_else(|e| e.into_inner());
    pools.retain(|weak| weak.strong_count() > 0);
    pools.push(std::sync::Arc::downgrade(inner));
}

/// Has the supervisor set the deny-new-work flag? Checked by every `defer`.
pub(crate) fn deny_new_work() -> bool {
    match SUPERVISOR.get() {
        Some(sup) => sup.deny.load(Ordering::Acquire),
        None => false,
    }
}

fn shut_down_all_registered_pools() {
    let sup = supervisor();
    sup.deny.store(true, Ordering::SeqCst);

    let pools = {
        let mut guard = sup.pools.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    };

    for weak in pools {
        if let Some(inner) = weak.upgrade() {
            poolwarn!("supervisor: shutting down a registered pool");
            inner.shutdown();
        }
    }
}

#[cfg(unix)]
mod unix {
    use super::shut_down_all_registered_pools;
    use nix::sys::signal::{self, SigHandler, SigSet, SigmaskHow, Signal};
    use poolrt_core::{poolerror, poolwarn};
    use std::thread;

    const SHUTDOWN_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

    fn shutdown_sigset() -> SigSet {
        let mut set = SigSet::empty();
        for sig in SHUTDOWN_SIGNALS {
            set.add(sig);
        }
        set
    }

    /// Block SIGINT/SIGTERM on the calling thread. Every thread spawned
    /// afterwards inherits this mask (POSIX thread creation semantics), so
    /// calling this once, early, before any workers exist, is sufficient.
    pub(super) fn block_shutdown_signals() {
        let set = shutdown_sigset();
        if signal::pthread_sigmask(SigmaskHow::SIG_BLOCK, Some(&set), None).is_err() {
            poolerror!("failed to block shutdown signals; signal-driven shutdown is disabled");
        }
    }

    pub(super) fn spawn_signal_thread() {
        let spawned = thread::Builder::new()
            .name("poolrt-supervisor".to_string())
            .spawn(move || {
                let set = shutdown_sigset();
                loop {
                    match set.wait() {
                        Ok(sig) => {
                            poolwarn!("supervisor: received {:?}", sig);
                            shut_down_all_registered_pools();
                            restore_and_reraise(sig);
                        }
                        Err(_) => {
                            // sigwait failing is unrecoverable: we have no way
                            // left to react to the shutdown signal.
                            std::process::abort();
                        }
                    }
                }
            });
        if spawned.is_err() {
            poolerror!("failed to spawn the shutdown-supervisor thread");
        }
    }

    /// Restore the signal's default disposition and re-raise it, so the
    /// process terminates with conventional signal exit status (preserving
    /// wait-status semantics for a parent process) instead of just calling
    /// `exit`.
    fn restore_and_reraise(sig: Signal) -> ! {
        unsafe {
            if signal::signal(sig, SigHandler::SigDfl).is_err() {
                std::process::abort();
            }
        }
        let mut unblock = SigSet::empty();
        unblock.add(sig);
        if signal::pthread_sigmask(SigmaskHow::SIG_UNBLOCK, Some(&unblock), None).is_err() {
            std::process::abort();
        }
        if unsafe { libc::raise(sig as libc::c_int) } != 0 {
            std::process::abort();
        }
        // The signal now has default disposition (terminate the process) and
        // is unblocked on this thread; the kernel delivers it the moment we
        // return from `raise` or at the next scheduling point. Park rather
        // than fall through to unrelated code while that happens.
        loop {
            thread::park();
        }
    }
}

#[cfg(not(unix))]
mod other {
    //! No portable non-Unix equivalent of `sigwait` is wired up yet; a pool
    //! still functions, it simply never receives signal-driven shutdown.

    pub(super) fn block_shutdown_signals() {}

    pub(super) fn spawn_signal_thread() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolInner;
    use std::sync::Arc;

    #[test]
    fn register_prunes_dead_weak_entries() {
        ensure_initialized();
        let sup = supervisor();

        {
            let inner = Arc::new(PoolInner::new_for_test(1, 4));
            register(&inner);
        }
        // `inner` dropped; its Weak should be pruned on the next register.
        let inner2 = Arc::new(PoolInner::new_for_test(1, 4));
        register(&inner2);

        let pools = sup.pools.lock().unwrap();
        assert!(pools.iter().filter(|w| w.strong_count() > 0).count() <= 1);
    }
}
