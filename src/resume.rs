//! Suspended computations that an outcome can be replayed into.
//!
//! A continuation is a computation paused at a point that expects either a
//! fed value or an injected failure. [`Resume`] covers sequential
//! continuations and [`AsyncResume`] cooperatively suspending ones. The
//! outcome variants only pick which primitive to call: a
//! [`Value`](crate::Value) resumes with its payload, a
//! [`Failure`](crate::Failure) resumes by injecting its cause. Driver code can
//! therefore replay a stored outcome without branching on its variant.

use crate::Cause;
use std::future::Future;

/// A paused sequential computation.
pub trait Resume<V> {
    /// What the computation produces when it pauses again or finishes.
    ///
    /// Implementations that need to tell those apart can use [`Step`].
    type Yield;

    /// Resumes the computation, feeding `value` in at the suspension point.
    fn resume_with_value(&mut self, value: V) -> Result<Self::Yield, Cause>;

    /// Resumes the computation by raising `cause` at the suspension point.
    ///
    /// Returns the next yield if the computation handles the failure, or
    /// the failure it propagates (`cause` itself or a new one).
    fn resume_with_failure(&mut self, cause: Cause) -> Result<Self::Yield, Cause>;
}

/// A paused, cooperatively suspending computation.
///
/// Same contract as [`Resume`]; resuming may suspend the caller.
pub trait AsyncResume<V> {
    /// What the computation produces when it pauses again or finishes.
    type Yield;

    /// Resumes the computation, feeding `value` in at the suspension point.
    fn resume_with_value(&mut self, value: V) -> impl Future<Output = Result<Self::Yield, Cause>>;

    /// Resumes the computation by raising `cause` at the suspension point.
    fn resume_with_failure(&mut self, cause: Cause)
        -> impl Future<Output = Result<Self::Yield, Cause>>;
}

/// What a resumed computation did next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<Y, R> {
    /// The computation paused again, producing an item.
    Yielded(Y),
    /// The computation ran to completion.
    Complete(R),
}

impl<Y, R> Step<Y, R> {
    /// Returns the yielded item, if the computation paused again.
    #[must_use]
    pub fn yielded(self) -> Option<Y> {
        match self {
            Self::Yielded(item) => Some(item),
            Self::Complete(_) => None,
        }
    }

    /// Returns true if the computation ran to completion.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl<V, C> Resume<V> for &mut C
where
    C: Resume<V> + ?Sized,
{
    type Yield = C::Yield;

    fn resume_with_value(&mut self, value: V) -> Result<Self::Yield, Cause> {
        (**self).resume_with_value(value)
    }

    fn resume_with_failure(&mut self, cause: Cause) -> Result<Self::Yield, Cause> {
        (**self).resume_with_failure(cause)
    }
}

impl<V, C> Resume<V> for Box<C>
where
    C: Resume<V> + ?Sized,
{
    type Yield = C::Yield;

    fn resume_with_value(&mut self, value: V) -> Result<Self::Yield, Cause> {
        (**self).resume_with_value(value)
    }

    fn resume_with_failure(&mut self, cause: Cause) -> Result<Self::Yield, Cause> {
        (**self).resume_with_failure(cause)
    }
}
