//! Thread-safe FIFO task queue with cooperative blocking
//!
//! A single `Mutex<QueueState>` protects the task deque *and* the stopping
//! flag together — unlike the original C implementation's hand-rolled
//! doubly-linked list (kept as a single allocation per node so a pop never
//! has to walk the chain), `VecDeque` already gives O(1)
//! push-back/pop-front without that bookkeeping. A `Condvar` lets workers
//! block until there is work, instead of spinning.
//!
//! The stopping flag lives here, behind the same lock the condvar uses,
//! rather than as a bare atomic on the pool: `threadpool.c`'s
//! `thread_pool_stop` sets `pool->stop` and broadcasts while holding
//! `pool->lock` precisely so that a worker which has just finished
//! evaluating its wait condition — lock held, about to call `pthread_cond_wait`
//! — cannot have the flip-and-broadcast land in that window and be missed.
//! A `stop` implemented as a separate `AtomicBool` set without the queue's
//! lock reopens exactly that window, since `notify_all` needs no lock to
//! call; a worker could observe the old value, then the flag flips and the
//! broadcast fires before the worker parks, and the wakeup is lost forever.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// A unit of work: a boxed closure invoked once, with no return value.
///
/// The typed rewrite's answer to the original's `(function, arg, argsz)`
/// triple — a Rust closure captures its own arguments, so there is no
/// separate argument blob or hand-rolled `call_data` binding to manage.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    stopping: bool,
}

/// A thread-safe FIFO queue of pending tasks plus the condition variable
/// workers wait on. Also owns the "stopping" bit so that its mutation is
/// serialised with the very condvar wait it needs to wake.
pub struct TaskQueue {
    state: Mutex<QueueState>,
    not_empty: Condvar,
}

impl TaskQueue {
    pub fn new(capacity_hint: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::with_capacity(capacity_hint),
                stopping: false,
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Append a task to the back of the queue and wake one waiter.
    pub fn push_back(&self, task: Task) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        guard.tasks.push_back(task);
        drop(guard);
        self.not_empty.notify_one();
    }

    /// Mark the queue as stopping and wake every waiter.
    ///
    /// The flag is set under the same lock a waiter's wait-condition check
    /// is made under, so there is no window between a worker's last check
    /// of the condition and it actually parking on the condvar in which
    /// this can land unobserved. Idempotent.
    pub fn stop(&self) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        guard.stopping = true;
        drop(guard);
        self.not_empty.notify_all();
    }

    /// Pop the front task, if any. Never blocks.
    pub fn pop_front(&self) -> Option<Task> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        guard.tasks.pop_front()
    }

    /// Block until either a task is available or the queue is stopping,
    /// then pop a task if one is present. Returns `None` only once stopping
    /// has been observed with an empty queue, which the caller interprets
    /// as "time to exit".
    pub fn pop_front_blocking(&self) -> Option<Task> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while guard.tasks.is_empty() && !guard.stopping {
            guard = self
                .not_empty
                .wait(guard)
                .unwrap_or_else(|e| e.into_inner());
        }
        guard.tasks.pop_front()
    }

    /// Non-blocking emptiness check. The result may be stale the instant it
    /// is returned if other threads are concurrently pushing/popping.
    pub fn is_empty(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .tasks
            .is_empty()
    }

    /// Has `stop` been called on this queue?
    pub fn is_stopping(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).stopping
    }

    /// Current depth, used by tests/supervisor diagnostics only.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).tasks.len()
    }
}
