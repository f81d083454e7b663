//! Deferred task queue
//!
//! Background threads queue work; the thread that owns the dispatcher
//! drains it, typically once per frame or tick.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::config::DispatcherConfig;

use super::payload::PayloadKind;
use super::report::{ErrorReporter, LogReporter, TaskFailure};
use super::task::{BindCallback, Callback, Task};

/// Default number of tasks run per `process` call
pub const DEFAULT_MAX_PER_PROCESS: NonZeroUsize = match NonZeroUsize::new(128) {
    Some(n) => n,
    None => unreachable!(),
};

/// Thread-safe FIFO of tasks with a bounded drain
///
/// Share it with `Arc`. Any thread may enqueue; only one thread should call
/// [`step`](Self::step) or [`process`](Self::process) at a time, otherwise
/// the relative order of tasks across drainers is undefined.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use frameq_core::Dispatcher;
///
/// let dispatcher = Arc::new(Dispatcher::new());
///
/// let producer = Arc::clone(&dispatcher);
/// std::thread::spawn(move || {
///     producer.enqueue_int(|n| println!("got {n}"), 7);
/// })
/// .join()
/// .unwrap();
///
/// // On the consumer thread, once per tick:
/// assert_eq!(dispatcher.process(), 1);
/// ```
pub struct Dispatcher {
    queue: Mutex<VecDeque<Task>>,
    max_per_process: AtomicUsize,
    reporter: Box<dyn ErrorReporter>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the default cap that logs task failures
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            max_per_process: AtomicUsize::new(DEFAULT_MAX_PER_PROCESS.get()),
            reporter: Box::new(LogReporter),
        }
    }

    /// Create a dispatcher from loaded configuration
    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new().with_max_per_process(config.max_per_process)
    }

    /// Set the failure reporter (builder pattern)
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Set the per-`process` cap (builder pattern)
    pub fn with_max_per_process(self, max: NonZeroUsize) -> Self {
        self.set_max_per_process(max);
        self
    }

    /// Get the per-`process` cap
    pub fn max_per_process(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_per_process.load(Ordering::Relaxed))
            .unwrap_or(DEFAULT_MAX_PER_PROCESS)
    }

    /// Change the per-`process` cap
    ///
    /// Takes effect on the next `process` call.
    pub fn set_max_per_process(&self, max: NonZeroUsize) {
        self.max_per_process.store(max.get(), Ordering::Relaxed);
    }

    /// Queue a task
    ///
    /// Safe to call from any thread, including from inside a running task.
    /// Invalid tasks are dropped without error.
    pub fn enqueue(&self, task: Task) {
        if !task.is_valid() {
            tracing::trace!("Dropping invalid task");
            return;
        }

        self.queue.lock().push_back(task);
    }

    /// Queue a zero-argument callback
    pub fn enqueue_fn<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(Task::new(callback));
    }

    /// Queue a callback with an argument of any supported type
    pub fn enqueue_with<T, F>(&self, callback: F, value: T)
    where
        T: BindCallback,
        F: FnOnce(T) + Send + 'static,
    {
        self.enqueue(Task::with_arg(callback, value));
    }

    /// Queue a callback taking a `bool`
    pub fn enqueue_bool<F>(&self, callback: F, value: bool)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.enqueue(Task::bound(Callback::Bool(Box::new(callback), value)));
    }

    /// Queue a callback taking an `i32`
    pub fn enqueue_int<F>(&self, callback: F, value: i32)
    where
        F: FnOnce(i32) + Send + 'static,
    {
        self.enqueue(Task::bound(Callback::Int(Box::new(callback), value)));
    }

    /// Queue a callback taking an `f32`
    pub fn enqueue_float<F>(&self, callback: F, value: f32)
    where
        F: FnOnce(f32) + Send + 'static,
    {
        self.enqueue(Task::bound(Callback::Float(Box::new(callback), value)));
    }

    /// Queue a callback taking a `String`
    pub fn enqueue_string<F>(&self, callback: F, value: impl Into<String>)
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.enqueue(Task::bound(Callback::String(
            Box::new(callback),
            value.into(),
        )));
    }

    /// Number of queued tasks
    ///
    /// Snapshot only; producers may change it immediately after.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether no tasks are queued
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Run the oldest queued task
    ///
    /// The lock is released before the task runs. A panicking task is
    /// reported and still counts as processed.
    ///
    /// # Returns
    /// `true` if a task was dequeued, `false` if the queue was empty
    pub fn step(&self) -> bool {
        let Some(task) = self.queue.lock().pop_front() else {
            return false;
        };

        self.run(task);
        true
    }

    /// Run queued tasks until the queue is empty or the cap is reached
    ///
    /// Call from the consumer thread. Tasks left over are picked up by the
    /// next call.
    ///
    /// # Returns
    /// The number of tasks run
    #[tracing::instrument(skip(self))]
    pub fn process(&self) -> usize {
        let max = self.max_per_process().get();
        let mut count = 0;

        while count < max && self.step() {
            count += 1;
        }

        if count > 0 {
            tracing::trace!("Processed {} queued tasks", count);
        }

        count
    }

    /// Discard all queued tasks without running them
    ///
    /// # Returns
    /// The number of tasks discarded
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) -> usize {
        // Take the tasks out so their captures drop outside the lock
        let discarded = std::mem::take(&mut *self.queue.lock());
        let count = discarded.len();
        drop(discarded);

        if count > 0 {
            tracing::debug!("Cleared {} queued tasks", count);
        }

        count
    }

    fn run(&self, task: Task) {
        let kind = task.kind().unwrap_or(PayloadKind::None);

        match catch_unwind(AssertUnwindSafe(|| task.invoke())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Skipped queued task: {}", e),
            Err(panic) => {
                let failure = TaskFailure::from_panic(kind, panic);
                if catch_unwind(AssertUnwindSafe(|| self.reporter.report(failure))).is_err() {
                    tracing::error!(kind = %kind, "Error reporter panicked while reporting a task failure");
                }
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("len", &self.len())
            .field("max_per_process", &self.max_per_process())
            .finish_non_exhaustive()
    }
}
