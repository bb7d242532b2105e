//! Core outcome types.
//!
//! - [`cause`]: the shared failure handle with identity semantics
//! - [`trail`]: diagnostic frames recorded as a failure unwinds
//! - [`value`]: the successful variant
//! - [`failure`]: the failed variant
//! - [`outcome`]: the capability set shared by both, and the [`Maybe`] union

pub mod cause;
pub mod failure;
mod guard;
pub mod outcome;
pub mod trail;
pub mod value;

pub use cause::{Cause, DynError};
pub use failure::Failure;
pub use outcome::{Maybe, Outcome};
pub use trail::{Frame, SourceLocation, Trail};
pub use value::Value;
