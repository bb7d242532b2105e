//! The outcome capability set and the two-variant union.
//!
//! [`Outcome`] is what both variants can do: one terminal operation per
//! instance, picked from `unwrap`, `send` and `asend`. [`Maybe`] is the union
//! returned by the capture boundaries, for callers that want to branch on the
//! variant instead of replaying it blindly.

use super::cause::Cause;
use super::failure::Failure;
use super::trail::SourceLocation;
use super::value::Value;
use crate::resume::{AsyncResume, Resume};
use core::fmt;
use core::hash::{Hash, Hasher};
use std::future::Future;

/// Operations shared by every outcome variant.
///
/// Each instance carries a single-use budget shared by all three terminal
/// operations: the first call succeeds, every later one returns a cause
/// wrapping [`AlreadyUsedError`](crate::AlreadyUsedError).
pub trait Outcome<T> {
    /// Returns the value, or re-raises the failure.
    fn unwrap(&self) -> Result<T, Cause>;

    /// Replays the outcome into a sequential continuation.
    fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized;

    /// Replays the outcome into a cooperatively suspending continuation.
    ///
    /// The use is recorded when the returned future is first polled.
    fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized;

    /// Returns true once a terminal operation has run.
    fn is_spent(&self) -> bool;
}

impl<T> Outcome<T> for Value<T> {
    #[track_caller]
    fn unwrap(&self) -> Result<T, Cause> {
        Self::unwrap(self)
    }

    #[track_caller]
    fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized,
    {
        Self::send(self, continuation)
    }

    #[track_caller]
    fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        self.asend_at(continuation, SourceLocation::caller())
    }

    fn is_spent(&self) -> bool {
        Self::is_spent(self)
    }
}

impl<T> Outcome<T> for Failure {
    #[track_caller]
    fn unwrap(&self) -> Result<T, Cause> {
        match Self::unwrap(self)? {}
    }

    #[track_caller]
    fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized,
    {
        Self::send::<T, C>(self, continuation)
    }

    #[track_caller]
    fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        self.asend_at::<T, C>(continuation, SourceLocation::caller())
    }

    fn is_spent(&self) -> bool {
        Self::is_spent(self)
    }
}

/// Either a [`Value`] or a [`Failure`].
///
/// Returned by [`capture`](crate::capture) and [`acapture`](crate::acapture).
/// The terminal operations dispatch to the held variant, so a `Maybe` can be
/// replayed without matching on it first.
pub enum Maybe<T> {
    /// The computation returned normally.
    Value(Value<T>),
    /// The computation raised a failure.
    Failure(Failure),
}

impl<T> Maybe<T> {
    /// Returns true for the value variant.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns true for the failure variant.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the value variant, if that is what this is.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value<T>> {
        match self {
            Self::Value(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the failure variant, if that is what this is.
    #[must_use]
    pub const fn as_failure(&self) -> Option<&Failure> {
        match self {
            Self::Value(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Returns true once a terminal operation has run.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        match self {
            Self::Value(value) => value.is_spent(),
            Self::Failure(failure) => failure.is_spent(),
        }
    }

    /// Returns the value, or re-raises the failure.
    #[track_caller]
    pub fn unwrap(&self) -> Result<T, Cause> {
        match self {
            Self::Value(value) => value.unwrap(),
            Self::Failure(failure) => match failure.unwrap()? {},
        }
    }

    /// Replays the held variant into a sequential continuation.
    #[track_caller]
    pub fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized,
    {
        match self {
            Self::Value(value) => value.send(continuation),
            Self::Failure(failure) => failure.send::<T, C>(continuation),
        }
    }

    /// Replays the held variant into a cooperatively suspending continuation.
    #[track_caller]
    pub fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        let location = SourceLocation::caller();
        async move {
            match self {
                Self::Value(value) => value.asend_at(continuation, location).await,
                Self::Failure(failure) => failure.asend_at::<T, C>(continuation, location).await,
            }
        }
    }
}

impl<T> Outcome<T> for Maybe<T> {
    #[track_caller]
    fn unwrap(&self) -> Result<T, Cause> {
        Self::unwrap(self)
    }

    #[track_caller]
    fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized,
    {
        Self::send(self, continuation)
    }

    #[track_caller]
    fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        Self::asend(self, continuation)
    }

    fn is_spent(&self) -> bool {
        Self::is_spent(self)
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Debug::fmt(value, f),
            Self::Failure(failure) => fmt::Debug::fmt(failure, f),
        }
    }
}

impl<T, U> PartialEq<Maybe<U>> for Maybe<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Maybe<U>) -> bool {
        match (self, other) {
            (Self::Value(a), Maybe::Value(b)) => a == b,
            (Self::Failure(a), Maybe::Failure(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Maybe<T> {}

impl<T: Hash> Hash for Maybe<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Value(value) => value.hash(state),
            Self::Failure(failure) => failure.hash(state),
        }
    }
}

impl<T> From<Value<T>> for Maybe<T> {
    fn from(value: Value<T>) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Failure> for Maybe<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl<T, E> From<Result<T, E>> for Maybe<T>
where
    E: Into<Cause>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::Value(Value::new(payload)),
            Err(error) => Self::Failure(Failure::new(error)),
        }
    }
}
