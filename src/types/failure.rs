//! The failed outcome variant.

use super::cause::Cause;
use super::guard::UseGuard;
use super::trail::{Frame, SourceLocation};
use crate::error::InvalidFailurePayload;
use crate::resume::{AsyncResume, Resume};
use crate::tracing_compat::{debug, trace};
use core::convert::Infallible;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::any::Any;
use std::future::Future;

/// A failed outcome holding the raised [`Cause`].
///
/// Two failures are equal when they hold the same cause instance; failures
/// with equal-looking but distinct causes are not.
pub struct Failure {
    cause: Cause,
    guard: UseGuard,
}

impl Failure {
    /// Wraps a failure object in a fresh, unused outcome.
    #[must_use]
    pub fn new(cause: impl Into<Cause>) -> Self {
        Self {
            cause: cause.into(),
            guard: UseGuard::new(),
        }
    }

    /// Wraps `cause` after dropping up to `frames` leading trail entries.
    ///
    /// Capture boundaries use this to hide their own frame.
    #[must_use]
    pub fn with_trimmed_trail(cause: Cause, frames: usize) -> Self {
        cause.remove_frames(frames);
        Self::new(cause)
    }

    /// Builds a failure from a dynamically typed payload.
    ///
    /// Only two payload types are recognised: a [`Cause`] and a
    /// `Box<dyn Error + Send + Sync>`. Anything else is rejected immediately
    /// and handed back inside the error. That includes a concrete error type
    /// boxed as `dyn Any`, because its `Error` impl cannot be recovered from
    /// `Any`. Pass concrete errors to [`Failure::new`] or convert them with
    /// `Into<Cause>` first.
    pub fn try_from_any(payload: Box<dyn Any + Send>) -> Result<Self, InvalidFailurePayload> {
        let payload = match payload.downcast::<Cause>() {
            Ok(cause) => return Ok(Self::new(*cause)),
            Err(payload) => payload,
        };
        match payload.downcast::<Box<dyn std::error::Error + Send + Sync>>() {
            Ok(error) => Ok(Self::new(Cause::from_boxed(*error))),
            Err(payload) => {
                debug!("rejected a payload that is not a failure object");
                Err(InvalidFailurePayload::new(payload))
            }
        }
    }

    /// Returns the wrapped failure object.
    ///
    /// The cause stays readable after the outcome is spent.
    #[must_use]
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns true once a terminal operation has run.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.guard.is_spent()
    }

    /// Re-raises the cause.
    ///
    /// The returned cause is the stored failure itself, with an `unwrap` frame
    /// added in front of its trail. No other handle to it is kept by this call.
    #[track_caller]
    pub fn unwrap(&self) -> Result<Infallible, Cause> {
        let location = SourceLocation::caller();
        self.guard.consume_at("unwrap", location)?;
        let raised = self.cause.clone();
        raised.unwound_through(Frame::new("unwrap", location));
        Err(raised)
    }

    /// Injects the cause into `continuation` at its suspension point.
    ///
    /// Returns the continuation's next yield if it handles the failure,
    /// otherwise whatever failure it propagates.
    #[track_caller]
    pub fn send<V, C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<V> + ?Sized,
    {
        self.guard.consume("send")?;
        trace!(cause = %self.cause, "injecting failure into continuation");
        continuation.resume_with_failure(self.cause.clone())
    }

    /// Injects the cause into a cooperatively suspending `continuation`.
    ///
    /// The use is recorded when the returned future is first polled.
    #[track_caller]
    pub fn asend<'a, V, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<V> + ?Sized,
    {
        self.asend_at(continuation, SourceLocation::caller())
    }

    pub(crate) fn asend_at<'a, V, C>(
        &'a self,
        continuation: &'a mut C,
        location: SourceLocation,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<V> + ?Sized,
    {
        async move {
            self.guard.consume_at("asend", location)?;
            trace!(cause = %self.cause, "injecting failure into async continuation");
            continuation.resume_with_failure(self.cause.clone()).await
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_spent() {
            f.write_str("Failure(<spent>)")
        } else {
            f.debug_tuple("Failure").field(&self.cause).finish()
        }
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.cause == other.cause
    }
}

impl Eq for Failure {}

impl Hash for Failure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cause.hash(state);
    }
}
