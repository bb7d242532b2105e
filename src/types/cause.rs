//! The failure object carried by a [`Failure`](super::Failure).
//!
//! A [`Cause`] is a shared handle to a dynamic error together with its
//! diagnostic [`Trail`]. Cloning a cause clones the handle, not the error, so
//! every clone is the *same* failure: equality and hashing use identity,
//! never the error's content.

use super::trail::{Frame, SourceLocation, Trail};
use crate::error::PanicPayload;
use core::fmt;
use core::hash::{Hash, Hasher};
use parking_lot::Mutex;
use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

/// Dynamic error type stored inside a [`Cause`].
pub type DynError = dyn StdError + Send + Sync + 'static;

/// A failure object with identity semantics and a diagnostic trail.
///
/// Any `E: Error + Send + Sync + 'static` converts into a `Cause`. Conversion
/// through `From`/`?` records no frame; use [`Cause::new`] or the
/// [`cause!`](crate::cause) macro to record where the failure was raised.
#[derive(Clone)]
pub struct Cause {
    inner: Arc<CauseInner>,
}

struct CauseInner {
    error: Box<DynError>,
    trail: Mutex<Trail>,
}

impl Cause {
    /// Wraps `error`, recording the caller as the raising frame.
    #[must_use]
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_trail(
            Box::new(error),
            Trail::starting_at(Frame::unnamed(SourceLocation::caller())),
        )
    }

    /// Wraps `error`, recording the caller as a frame of `function`.
    ///
    /// The [`cause!`](crate::cause) macro fills `function` in automatically.
    #[must_use]
    #[track_caller]
    pub fn raised_in<E>(error: E, function: &'static str) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_trail(
            Box::new(error),
            Trail::starting_at(Frame::new(function, SourceLocation::caller())),
        )
    }

    /// Wraps an already boxed error without recording a frame.
    #[must_use]
    pub fn from_boxed(error: Box<DynError>) -> Self {
        Self::with_trail(error, Trail::new())
    }

    /// Recovers a failure from a panic payload.
    ///
    /// A payload that already is a `Cause` (see [`Cause::raise`]) is returned
    /// as-is, preserving its identity. Anything else becomes a
    /// [`PanicPayload`] failure.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<Self>() {
            Ok(cause) => *cause,
            Err(payload) => Self::from(PanicPayload::from_panic(payload.as_ref())),
        }
    }

    pub(crate) fn with_frame<E>(error: E, frame: Frame) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_trail(Box::new(error), Trail::starting_at(frame))
    }

    fn with_trail(error: Box<DynError>, trail: Trail) -> Self {
        Self {
            inner: Arc::new(CauseInner {
                error,
                trail: Mutex::new(trail),
            }),
        }
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn error(&self) -> &DynError {
        self.inner.error.as_ref()
    }

    /// Returns true if the wrapped error is an `E`.
    #[must_use]
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.error.is::<E>()
    }

    /// Returns the wrapped error as an `E`, if it is one.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.error.downcast_ref::<E>()
    }

    /// Returns the source of the wrapped error, if any.
    #[must_use]
    pub fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.error.source()
    }

    /// Returns true if both handles refer to the same failure.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns a snapshot of the diagnostic trail.
    #[must_use]
    pub fn trail(&self) -> Trail {
        self.inner.trail.lock().clone()
    }

    /// Records that this failure unwound through `frame`.
    pub fn unwound_through(&self, frame: Frame) {
        self.inner.trail.lock().push_outer(frame);
    }

    /// Drops up to `n` leading frames of the trail and returns how many were removed.
    pub fn remove_frames(&self, n: usize) -> usize {
        self.inner.trail.lock().remove_leading(n)
    }

    /// Unwinds the current thread with this cause as the panic payload.
    ///
    /// The panic hook is not invoked. A capture boundary catching the unwind
    /// recovers this exact cause.
    pub fn raise(self) -> ! {
        std::panic::resume_unwind(Box::new(self))
    }

    #[cfg(test)]
    pub(crate) fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::with_trail(Box::new(error), Trail::new())
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Cause {}

impl Hash for Cause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cause").field(&self.inner.error).finish()
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.error, f)
    }
}

/// Builds a [`Cause`] recording the enclosing function as the raising frame.
///
/// ```
/// use outcome::{cause, Cause};
///
/// fn open_config() -> Result<(), Cause> {
///     Err(cause!(std::io::Error::other("missing config")))
/// }
///
/// let err = open_config().unwrap_err();
/// assert_eq!(err.trail().functions(), vec!["open_config"]);
/// ```
#[macro_export]
macro_rules! cause {
    ($error:expr $(,)?) => {
        $crate::Cause::raised_in($error, $crate::function_name!())
    };
}
