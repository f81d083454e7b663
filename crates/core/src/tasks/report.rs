//! Reporting of task failures
//!
//! A task that panics while being drained is turned into a [`TaskFailure`]
//! and handed to the dispatcher's [`ErrorReporter`]. The panic never reaches
//! the caller of `step` or `process`.

use std::any::Any;

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::payload::PayloadKind;

/// A drained task that panicked
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Task ({kind}) panicked: {message}")]
pub struct TaskFailure {
    /// Argument kind of the failed task
    pub kind: PayloadKind,
    /// Panic message
    pub message: String,
}

impl TaskFailure {
    /// Build a failure from a `catch_unwind` payload
    pub fn from_panic(kind: PayloadKind, panic: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self { kind, message }
    }
}

/// Receives failures from drained tasks
///
/// Called on the draining thread, once per failed task.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, failure: TaskFailure);
}

impl<F> ErrorReporter for F
where
    F: Fn(TaskFailure) + Send + Sync,
{
    fn report(&self, failure: TaskFailure) {
        self(failure)
    }
}

/// Reporter that logs failures through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, failure: TaskFailure) {
        tracing::error!(kind = %failure.kind, "Queued task panicked: {}", failure.message);
    }
}

/// Reporter that forwards failures over a channel
///
/// Useful when failures are collected on a thread other than the drainer.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: Sender<TaskFailure>,
}

impl ChannelReporter {
    /// Wrap an existing sender
    pub fn new(sender: Sender<TaskFailure>) -> Self {
        Self { sender }
    }

    /// Create a reporter with its own unbounded channel
    pub fn unbounded() -> (Self, Receiver<TaskFailure>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl ErrorReporter for ChannelReporter {
    fn report(&self, failure: TaskFailure) {
        if let Err(e) = self.sender.send(failure) {
            tracing::warn!("Failure receiver disconnected, dropping report: {}", e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_failure_from_str_panic() {
        let panic = catch_unwind(|| panic!("boom")).unwrap_err();
        let failure = TaskFailure::from_panic(PayloadKind::None, panic);
        assert_eq!(failure.message, "boom");
    }

    #[test]
    fn test_failure_from_formatted_panic() {
        let panic = catch_unwind(|| panic!("bad value {}", 3)).unwrap_err();
        let failure = TaskFailure::from_panic(PayloadKind::Int, panic);
        assert_eq!(failure.message, "bad value 3");
        assert_eq!(failure.to_string(), "Task (int) panicked: bad value 3");
    }

    #[test]
    fn test_failure_from_opaque_panic() {
        let panic = catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        let failure = TaskFailure::from_panic(PayloadKind::None, panic);
        assert_eq!(failure.message, "non-string panic payload");
    }

    #[test]
    fn test_channel_reporter_forwards() {
        let (reporter, rx) = ChannelReporter::unbounded();
        reporter.report(TaskFailure {
            kind: PayloadKind::Bool,
            message: "x".to_string(),
        });

        let got = rx.try_recv().unwrap();
        assert_eq!(got.kind, PayloadKind::Bool);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_reporter_survives_disconnect() {
        let (reporter, rx) = ChannelReporter::unbounded();
        drop(rx);
        reporter.report(TaskFailure {
            kind: PayloadKind::None,
            message: "lost".to_string(),
        });
    }
}
