//! Task queue for deferred execution on a designated thread
//!
//! Producers on any thread queue callbacks, optionally with one typed
//! argument. The consumer thread drains them with [`Dispatcher::process`],
//! typically once per frame or tick.

mod payload;
mod queue;
mod report;
mod task;

pub use payload::{Payload, PayloadKind, PayloadValue};
pub use queue::{Dispatcher, DEFAULT_MAX_PER_PROCESS};
pub use report::{ChannelReporter, ErrorReporter, LogReporter, TaskFailure};
pub use task::{BindCallback, Task};
