//! Single-use guard shared by every outcome variant.

use super::cause::Cause;
use super::trail::{Frame, SourceLocation};
use crate::error::AlreadyUsedError;
use crate::tracing_compat::warn;
use std::cell::Cell;

/// Consume-once flag embedded in each outcome.
///
/// The flag is set by the first terminal operation and never reset. It is a
/// plain `Cell`, so an outcome is `!Sync`: sharing one across threads needs
/// external synchronization.
#[derive(Debug, Default)]
pub(crate) struct UseGuard {
    spent: Cell<bool>,
}

impl UseGuard {
    pub(crate) const fn new() -> Self {
        Self {
            spent: Cell::new(false),
        }
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.spent.get()
    }

    /// Marks the outcome as used by `operation`.
    ///
    /// Fails with an [`AlreadyUsedError`] cause when the outcome is already
    /// spent; nothing else is touched in that case.
    #[track_caller]
    pub(crate) fn consume(&self, operation: &'static str) -> Result<(), Cause> {
        self.consume_at(operation, SourceLocation::caller())
    }

    pub(crate) fn consume_at(
        &self,
        operation: &'static str,
        location: SourceLocation,
    ) -> Result<(), Cause> {
        if self.spent.replace(true) {
            return Err(Self::reject(operation, location));
        }
        Ok(())
    }

    /// Fails like [`consume_at`](Self::consume_at) on a spent outcome, but
    /// leaves an unspent one untouched.
    pub(crate) fn ensure_unspent(
        &self,
        operation: &'static str,
        location: SourceLocation,
    ) -> Result<(), Cause> {
        if self.spent.get() {
            return Err(Self::reject(operation, location));
        }
        Ok(())
    }

    fn reject(operation: &'static str, location: SourceLocation) -> Cause {
        warn!(operation, %location, "terminal operation on a spent outcome");
        Cause::with_frame(
            AlreadyUsedError::new(operation),
            Frame::new(operation, location),
        )
    }
}
