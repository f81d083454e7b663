//! frameq - Deferred task queue
//!
//! Lets background threads schedule work for a thread that must run it,
//! such as a render or game thread. Producers enqueue callbacks with an
//! optional typed argument; the owning thread drains them in FIFO order,
//! a bounded number per call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use frameq_core::{Dispatcher, Payload, Task};
//!
//! let dispatcher = Arc::new(Dispatcher::new());
//!
//! dispatcher.enqueue_fn(|| println!("next tick"));
//! dispatcher.enqueue(Task::try_with_payload(Some(|on: bool| println!("on = {on}")), Payload::Bool(true))?);
//!
//! // Once per tick on the owning thread
//! dispatcher.process();
//! # Ok::<(), frameq_core::TaskError>(())
//! ```

pub mod config;
pub mod error;
pub mod tasks;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, DispatcherConfig};
pub use error::{TaskError, TaskResult};
pub use tasks::{
    ChannelReporter, Dispatcher, ErrorReporter, LogReporter, Payload, PayloadKind, PayloadValue,
    Task, TaskFailure,
};
