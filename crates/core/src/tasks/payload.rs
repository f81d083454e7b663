//! Typed task arguments
//!
//! A task carries at most one argument from a small closed set of scalar
//! types. The argument is stored inline in [`Payload`], never boxed.

use std::fmt;

/// Tag identifying which argument shape a task uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    None,
    Bool,
    Int,
    Float,
    String,
}

impl PayloadKind {
    /// Lowercase name used in logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::None => "none",
            PayloadKind::Bool => "bool",
            PayloadKind::Int => "int",
            PayloadKind::Float => "float",
            PayloadKind::String => "string",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged task argument
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
}

impl Payload {
    /// Get the tag for this payload
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::None => PayloadKind::None,
            Payload::Bool(_) => PayloadKind::Bool,
            Payload::Int(_) => PayloadKind::Int,
            Payload::Float(_) => PayloadKind::Float,
            Payload::String(_) => PayloadKind::String,
        }
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Int(value)
    }
}

impl From<f32> for Payload {
    fn from(value: f32) -> Self {
        Payload::Float(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::String(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_string())
    }
}

/// Trait for types that can be passed as a task argument
///
/// Implemented for `bool`, `i32`, `f32` and `String`. Supporting a new type
/// means adding a [`PayloadKind`] tag, a [`Payload`] case, a bound callback
/// case in `task.rs` and a [`BindCallback`](super::BindCallback) impl.
pub trait PayloadValue: Sized + Send + 'static {
    /// Tag this type is stored under
    const KIND: PayloadKind;

    /// Extract the value, handing the payload back if the tag differs
    fn from_payload(payload: Payload) -> Result<Self, Payload>;

    /// Wrap the value in its payload case
    fn into_payload(self) -> Payload;
}

impl PayloadValue for bool {
    const KIND: PayloadKind = PayloadKind::Bool;

    fn from_payload(payload: Payload) -> Result<Self, Payload> {
        match payload {
            Payload::Bool(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_payload(self) -> Payload {
        Payload::Bool(self)
    }
}

impl PayloadValue for i32 {
    const KIND: PayloadKind = PayloadKind::Int;

    fn from_payload(payload: Payload) -> Result<Self, Payload> {
        match payload {
            Payload::Int(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_payload(self) -> Payload {
        Payload::Int(self)
    }
}

impl PayloadValue for f32 {
    const KIND: PayloadKind = PayloadKind::Float;

    fn from_payload(payload: Payload) -> Result<Self, Payload> {
        match payload {
            Payload::Float(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_payload(self) -> Payload {
        Payload::Float(self)
    }
}

impl PayloadValue for String {
    const KIND: PayloadKind = PayloadKind::String;

    fn from_payload(payload: Payload) -> Result<Self, Payload> {
        match payload {
            Payload::String(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_payload(self) -> Payload {
        Payload::String(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_matches_case() {
        assert_eq!(Payload::None.kind(), PayloadKind::None);
        assert_eq!(Payload::from(true).kind(), PayloadKind::Bool);
        assert_eq!(Payload::from(7).kind(), PayloadKind::Int);
        assert_eq!(Payload::from(1.5f32).kind(), PayloadKind::Float);
        assert_eq!(Payload::from("hi").kind(), PayloadKind::String);
    }

    #[test]
    fn test_from_payload_returns_original_on_mismatch() {
        let err = i32::from_payload(Payload::Bool(true)).unwrap_err();
        assert_eq!(err, Payload::Bool(true));

        let err = String::from_payload(Payload::Float(2.0)).unwrap_err();
        assert_eq!(err, Payload::Float(2.0));
    }

    #[test]
    fn test_from_payload_extracts_value() {
        assert_eq!(bool::from_payload(Payload::Bool(false)), Ok(false));
        assert_eq!(i32::from_payload(Payload::Int(-3)), Ok(-3));
        assert_eq!(
            String::from_payload(Payload::from("abc")),
            Ok("abc".to_string())
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PayloadKind::Float.to_string(), "float");
        assert_eq!(PayloadKind::None.to_string(), "none");
    }
}
