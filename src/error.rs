//! Error types used by the outcome crate.
//!
//! Captured failures travel as [`Cause`](crate::Cause) handles, so most of what
//! flows through this crate is whatever the wrapped computation produced. The
//! types here are the few failure objects the crate creates itself:
//!
//! - [`AlreadyUsedError`]: a terminal operation was called on a spent outcome
//! - [`PayloadBorrowedError`]: a terminal operation ran while the payload was
//!   borrowed for inspection
//! - [`InvalidFailurePayload`]: a dynamic payload that is not a failure object
//! - [`PanicPayload`]: a caught panic, turned into a failure object
//! - [`ConfigError`]: an unparseable configuration override

use core::fmt;
use std::any::Any;

/// A terminal operation was invoked on an outcome that was already used.
///
/// Every outcome can be unwrapped, sent, or async-sent exactly once. This
/// error always indicates a usage bug in the calling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("outcome already used: `{operation}` called on a spent outcome")]
pub struct AlreadyUsedError {
    operation: &'static str,
}

impl AlreadyUsedError {
    /// Creates the error for the rejected terminal operation.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    /// Returns the name of the rejected terminal operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }
}

/// A terminal operation was invoked while the value's payload was borrowed.
///
/// The payload cannot be moved out while a [`Value::value`](crate::Value::value)
/// borrow is alive. The outcome is left unused, so the call can be retried
/// once the borrow is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("outcome payload is borrowed: `{operation}` called during inspection")]
pub struct PayloadBorrowedError {
    operation: &'static str,
}

impl PayloadBorrowedError {
    /// Creates the error for the rejected terminal operation.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    /// Returns the name of the rejected terminal operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }
}

/// A dynamic payload offered as a failure was not a failure object.
///
/// The rejected payload is handed back so the caller can recover it.
#[derive(thiserror::Error)]
#[error("invalid failure payload: expected a failure object")]
pub struct InvalidFailurePayload {
    payload: Box<dyn Any + Send>,
}

impl InvalidFailurePayload {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Returns the rejected payload.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for InvalidFailurePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidFailurePayload").finish_non_exhaustive()
    }
}

/// Payload from a caught panic.
///
/// This wraps the panic message so a panic can travel as an ordinary failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("panic: {message}")]
pub struct PanicPayload {
    message: String,
}

impl PanicPayload {
    /// Creates a new panic payload with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a raw panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Self { message }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while resolving a [`CaptureConfig`](crate::CaptureConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {var}: expected {expected}, got {value:?}")]
    InvalidValue {
        /// The offending variable.
        var: &'static str,
        /// The raw value found.
        value: String,
        /// What the variable should contain.
        expected: &'static str,
    },
}
