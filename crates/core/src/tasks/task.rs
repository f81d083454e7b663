//! Task value and callback shapes

use std::fmt;

use crate::error::{TaskError, TaskResult};

use super::payload::{Payload, PayloadKind, PayloadValue};

/// A zero-argument callback
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// A single-argument callback
pub type ActionWith<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// A callback bound to its argument
///
/// Each case holds the callback shape for one [`PayloadKind`] together with
/// the value it will be called with, so invoking is a single match.
/// Not re-exported; tasks are built through [`Task`] constructors only.
pub enum Callback {
    NoArg(Action),
    Bool(ActionWith<bool>, bool),
    Int(ActionWith<i32>, i32),
    Float(ActionWith<f32>, f32),
    String(ActionWith<String>, String),
}

impl Callback {
    /// Get the argument kind of this callback
    pub fn kind(&self) -> PayloadKind {
        match self {
            Callback::NoArg(_) => PayloadKind::None,
            Callback::Bool(..) => PayloadKind::Bool,
            Callback::Int(..) => PayloadKind::Int,
            Callback::Float(..) => PayloadKind::Float,
            Callback::String(..) => PayloadKind::String,
        }
    }

    fn call(self) {
        match self {
            Callback::NoArg(f) => f(),
            Callback::Bool(f, v) => f(v),
            Callback::Int(f, v) => f(v),
            Callback::Float(f, v) => f(v),
            Callback::String(f, v) => f(v),
        }
    }
}

/// Binds a typed callback to its argument
///
/// Split from [`PayloadValue`] so each argument type picks its own
/// [`Callback`] case.
pub trait BindCallback: PayloadValue {
    fn bind(callback: ActionWith<Self>, value: Self) -> Callback;
}

impl BindCallback for bool {
    fn bind(callback: ActionWith<Self>, value: Self) -> Callback {
        Callback::Bool(callback, value)
    }
}

impl BindCallback for i32 {
    fn bind(callback: ActionWith<Self>, value: Self) -> Callback {
        Callback::Int(callback, value)
    }
}

impl BindCallback for f32 {
    fn bind(callback: ActionWith<Self>, value: Self) -> Callback {
        Callback::Float(callback, value)
    }
}

impl BindCallback for String {
    fn bind(callback: ActionWith<Self>, value: Self) -> Callback {
        Callback::String(callback, value)
    }
}

/// One deferred unit of work
///
/// A task is either valid (holds a callback) or invalid (holds nothing).
/// Invalid tasks are never queued; see [`Dispatcher::enqueue`].
///
/// [`Dispatcher::enqueue`]: super::Dispatcher::enqueue
#[derive(Default)]
pub struct Task {
    callback: Option<Callback>,
}

impl Task {
    /// Create a zero-argument task
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::bound(Callback::NoArg(Box::new(callback)))
    }

    /// Create a single-argument task from a plain value
    pub fn with_arg<T, F>(callback: F, value: T) -> Self
    where
        T: BindCallback,
        F: FnOnce(T) + Send + 'static,
    {
        Self::bound(T::bind(Box::new(callback), value))
    }

    /// Create a zero-argument task from a callback that may be missing
    ///
    /// # Errors
    /// [`TaskError::NullCallback`] if `callback` is `None`.
    pub fn try_new<F>(callback: Option<F>) -> TaskResult<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        callback.map(Self::new).ok_or(TaskError::NullCallback)
    }

    /// Create a single-argument task from a tagged payload
    ///
    /// # Errors
    /// - [`TaskError::NullCallback`] if `callback` is `None`
    /// - [`TaskError::PayloadMismatch`] if the payload is not tagged `T::KIND`
    pub fn try_with_payload<T, F>(callback: Option<F>, payload: Payload) -> TaskResult<Self>
    where
        T: BindCallback,
        F: FnOnce(T) + Send + 'static,
    {
        let callback = callback.ok_or(TaskError::NullCallback)?;
        let value = T::from_payload(payload).map_err(|found| TaskError::PayloadMismatch {
            expected: T::KIND,
            found: found.kind(),
        })?;
        Ok(Self::with_arg(callback, value))
    }

    /// Create a task with no callback
    pub fn invalid() -> Self {
        Self::default()
    }

    pub(crate) fn bound(callback: Callback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Whether this task holds a callback
    pub fn is_valid(&self) -> bool {
        self.callback.is_some()
    }

    /// Argument kind of the callback, `None` for an invalid task
    pub fn kind(&self) -> Option<PayloadKind> {
        self.callback.as_ref().map(Callback::kind)
    }

    /// Run the callback, consuming the task
    ///
    /// # Errors
    /// [`TaskError::NullCallback`] if the task is invalid. Nothing runs.
    pub fn invoke(self) -> TaskResult<()> {
        let callback = self.callback.ok_or(TaskError::NullCallback)?;
        callback.call();
        Ok(())
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("valid", &self.is_valid())
            .field("kind", &self.kind())
            .finish()
    }
}
