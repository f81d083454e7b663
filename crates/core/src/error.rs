//! Error types for task construction

use crate::tasks::PayloadKind;

/// Error returned when a task cannot be built
///
/// These are programmer errors caught at the call site. A task that fails
/// construction never reaches a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// No callback was supplied
    #[error("Task callback is null")]
    NullCallback,

    /// The payload tag does not match the callback's argument type
    #[error("Payload mismatch: callback takes {expected}, payload is {found}")]
    PayloadMismatch {
        /// Argument kind the callback accepts
        expected: PayloadKind,
        /// Kind the supplied payload was tagged with
        found: PayloadKind,
    },
}

/// Result type for task operations
pub type TaskResult<T> = Result<T, TaskError>;
