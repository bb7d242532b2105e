//! Outcome: capture a computation's result as a value, replay it exactly once.
//!
//! # Overview
//!
//! Instead of letting a failure propagate immediately, a capture boundary turns
//! the completion of a computation into a first-class object: a [`Value`] for a
//! normal return, a [`Failure`] for a raised failure. The object can be stored,
//! passed around, compared, and later replayed exactly once.
//!
//! # Core Guarantees
//!
//! - **Single use**: `unwrap`, `send` and `asend` share one budget per instance;
//!   every call after the first fails with [`AlreadyUsedError`]
//! - **Identity-preserving failures**: a replayed failure is the same [`Cause`]
//!   that was captured, with `unwrap` recorded in front of its trail
//! - **Clean trails**: capture boundaries hide their own frame, and trail
//!   frames are plain data that never keep a failure alive
//! - **Replay into continuations**: a stored outcome resumes a paused
//!   computation with its value or by injecting its failure
//!
//! # Module Structure
//!
//! - [`types`]: [`Value`], [`Failure`], [`Maybe`], [`Cause`] and the trail types
//! - [`resume`]: continuation traits outcomes are replayed into
//! - [`capture`](mod@capture): the capture boundaries
//! - [`config`]: boundary configuration and environment overrides
//! - [`error`]: error types created by the crate itself
//!
//! # Example
//!
//! ```
//! use outcome::{capture, cause, AlreadyUsedError, Cause};
//!
//! fn parse_port(raw: &str) -> Result<u16, Cause> {
//!     raw.parse().map_err(|e| cause!(e))
//! }
//!
//! let ok = capture(|| parse_port("8080"));
//! assert_eq!(ok.unwrap().ok(), Some(8080));
//! assert!(ok.unwrap().unwrap_err().is::<AlreadyUsedError>());
//!
//! let failed = capture(|| parse_port("http"));
//! let raised = failed.unwrap().unwrap_err();
//! assert_eq!(raised.trail().functions(), vec!["unwrap", "parse_port"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]

pub mod capture;
pub mod config;
pub mod error;
pub mod resume;
pub mod tracing_compat;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use capture::{acapture, capture, Capture};
pub use config::CaptureConfig;
pub use error::{
    AlreadyUsedError, ConfigError, InvalidFailurePayload, PanicPayload, PayloadBorrowedError,
};
pub use resume::{AsyncResume, Resume, Step};
pub use types::{
    Cause, DynError, Failure, Frame, Maybe, Outcome, SourceLocation, Trail, Value,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
