//! The successful outcome variant.

use super::cause::Cause;
use super::guard::UseGuard;
use super::trail::{Frame, SourceLocation};
use crate::error::PayloadBorrowedError;
use crate::resume::{AsyncResume, Resume};
use crate::tracing_compat::trace;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::cell::{Ref, RefCell};
use std::future::Future;

/// A successful outcome holding the produced value.
///
/// The payload is handed out by exactly one terminal operation
/// ([`unwrap`](Value::unwrap), [`send`](Value::send) or
/// [`asend`](Value::asend)); every later terminal call fails with
/// [`AlreadyUsedError`](crate::AlreadyUsedError).
///
/// Equality, ordering and hashing delegate to the payload. The successful
/// terminal operation moves the payload out, so a spent value no longer
/// equals a fresh value with the same payload and hashes differently than it
/// did before. Do not spend a value while it is the key of a hashed or
/// ordered collection.
pub struct Value<T> {
    payload: RefCell<Option<T>>,
    guard: UseGuard,
}

impl<T> Value<T> {
    /// Wraps `payload` in a fresh, unused outcome.
    #[must_use]
    pub const fn new(payload: T) -> Self {
        Self {
            payload: RefCell::new(Some(payload)),
            guard: UseGuard::new(),
        }
    }

    /// Borrows the payload, or returns `None` once the value is spent.
    ///
    /// A terminal operation attempted while the borrow is alive fails with
    /// [`PayloadBorrowedError`] and leaves the value unused.
    #[must_use]
    pub fn value(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.payload.borrow(), Option::as_ref).ok()
    }

    /// Returns true once a terminal operation has run.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.guard.is_spent()
    }

    /// Returns the payload.
    #[track_caller]
    pub fn unwrap(&self) -> Result<T, Cause> {
        self.claim("unwrap", SourceLocation::caller())
    }

    /// Resumes `continuation` by feeding it the payload.
    ///
    /// Returns whatever the continuation produces next.
    #[track_caller]
    pub fn send<C>(&self, continuation: &mut C) -> Result<C::Yield, Cause>
    where
        C: Resume<T> + ?Sized,
    {
        let payload = self.claim("send", SourceLocation::caller())?;
        trace!("feeding value into continuation");
        continuation.resume_with_value(payload)
    }

    /// Resumes a cooperatively suspending `continuation` with the payload.
    ///
    /// The use is recorded when the returned future is first polled.
    #[track_caller]
    pub fn asend<'a, C>(
        &'a self,
        continuation: &'a mut C,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        self.asend_at(continuation, SourceLocation::caller())
    }

    pub(crate) fn asend_at<'a, C>(
        &'a self,
        continuation: &'a mut C,
        location: SourceLocation,
    ) -> impl Future<Output = Result<C::Yield, Cause>> + 'a
    where
        C: AsyncResume<T> + ?Sized,
    {
        async move {
            let payload = self.claim("asend", location)?;
            trace!("feeding value into async continuation");
            continuation.resume_with_value(payload).await
        }
    }

    /// Moves the payload out for `operation`.
    ///
    /// The slot is locked before the guard is committed, so a live inspection
    /// borrow rejects the call without spending the value.
    fn claim(&self, operation: &'static str, location: SourceLocation) -> Result<T, Cause> {
        let Ok(mut slot) = self.payload.try_borrow_mut() else {
            self.guard.ensure_unspent(operation, location)?;
            return Err(Cause::with_frame(
                PayloadBorrowedError::new(operation),
                Frame::new(operation, location),
            ));
        };
        self.guard.consume_at(operation, location)?;
        match slot.take() {
            Some(payload) => Ok(payload),
            None => unreachable!("unspent value without payload"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.payload.borrow() {
            Some(payload) => f.debug_tuple("Value").field(payload).finish(),
            None => f.write_str("Value(<spent>)"),
        }
    }
}

impl<T, U> PartialEq<Value<U>> for Value<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Value<U>) -> bool {
        match (&*self.payload.borrow(), &*other.payload.borrow()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Value<T> {}

impl<T: PartialOrd> PartialOrd for Value<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.payload.borrow().partial_cmp(&*other.payload.borrow())
    }
}

impl<T: Ord> Ord for Value<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.payload.borrow().cmp(&*other.payload.borrow())
    }
}

impl<T: Hash> Hash for Value<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.payload.borrow().hash(state);
    }
}

impl<T> From<T> for Value<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}
