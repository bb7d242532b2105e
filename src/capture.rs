//! Capture boundaries: run a computation and keep its completion as an outcome.
//!
//! A boundary converts a normal return into a [`Value`] and a raised failure
//! into a [`Failure`]. Failures are never allowed past the boundary: an `Err`
//! from the computation and (by default) a panic inside it both end up in the
//! returned [`Maybe`].
//!
//! The boundary records itself on the failure's trail and then removes exactly
//! that one frame again, so the trail starts at the frame that raised. Frames
//! recorded on the raising side are never removed, however many boundaries
//! the failure crosses.

use crate::config::CaptureConfig;
use crate::error::ConfigError;
use crate::tracing_compat::{debug, trace};
use crate::types::{Cause, Failure, Frame, Maybe, SourceLocation, Value};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Frames a boundary records on a failure it captures.
const BOUNDARY_FRAMES: usize = 1;

/// A configured capture boundary.
///
/// [`capture`] and [`acapture`] use the default configuration; build a
/// `Capture` to change it.
///
/// ```
/// use outcome::{Capture, CaptureConfig};
///
/// let boundary = Capture::new(CaptureConfig::new().catch_panics(false));
/// let maybe = boundary.run(|| "42".parse::<u8>());
/// assert_eq!(maybe.unwrap().ok(), Some(42));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capture {
    config: CaptureConfig,
}

impl Capture {
    /// Creates a boundary with `config`.
    #[must_use]
    pub const fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Creates a boundary configured from `OUTCOME_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        CaptureConfig::from_env().map(Self::new)
    }

    /// Returns the boundary configuration.
    #[must_use]
    pub const fn config(&self) -> CaptureConfig {
        self.config
    }

    /// Runs `f` on the calling thread and captures how it completed.
    #[track_caller]
    pub fn run<T, E, F>(&self, f: F) -> Maybe<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Cause>,
    {
        let boundary = Frame::new("capture", SourceLocation::caller());
        let completion = if self.config.catch_panics {
            match std::panic::catch_unwind(AssertUnwindSafe(f)) {
                Ok(result) => result.map_err(Into::into),
                Err(payload) => Err(Cause::from_panic(payload)),
            }
        } else {
            f().map_err(Into::into)
        };
        self.settle(completion, boundary)
    }

    /// Captures how the future produced by `f` completes.
    ///
    /// Nothing runs until the returned future is polled. Dropping it drops the
    /// wrapped computation along with it.
    #[track_caller]
    pub fn run_async<T, E, F, Fut>(&self, f: F) -> impl Future<Output = Maybe<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Cause>,
    {
        let boundary = Frame::new("acapture", SourceLocation::caller());
        let this = *self;
        async move {
            let completion = if this.config.catch_panics {
                match std::panic::catch_unwind(AssertUnwindSafe(f)) {
                    Ok(fut) => match CatchUnwind(Box::pin(fut)).await {
                        Ok(result) => result.map_err(Into::into),
                        Err(payload) => Err(Cause::from_panic(payload)),
                    },
                    Err(payload) => Err(Cause::from_panic(payload)),
                }
            } else {
                f().await.map_err(Into::into)
            };
            this.settle(completion, boundary)
        }
    }

    fn settle<T>(&self, completion: Result<T, Cause>, boundary: Frame) -> Maybe<T> {
        match completion {
            Ok(payload) => {
                trace!(boundary = %boundary, "captured value");
                Maybe::Value(Value::new(payload))
            }
            Err(cause) => {
                cause.unwound_through(boundary);
                debug!(boundary = %boundary, error = %cause, "captured failure");
                Maybe::Failure(Failure::with_trimmed_trail(cause, BOUNDARY_FRAMES))
            }
        }
    }
}

/// Runs `f` and captures its completion with the default configuration.
///
/// ```
/// use outcome::capture;
///
/// let maybe = capture(|| "nope".parse::<u8>());
/// assert!(maybe.is_failure());
/// assert!(maybe.unwrap().is_err());
/// ```
#[track_caller]
pub fn capture<T, E, F>(f: F) -> Maybe<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Cause>,
{
    Capture::default().run(f)
}

/// Awaits the future produced by `f` and captures its completion with the
/// default configuration.
#[track_caller]
pub fn acapture<T, E, F, Fut>(f: F) -> impl Future<Output = Maybe<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Cause>,
{
    Capture::default().run_async(f)
}

/// Future wrapper that turns a panic during `poll` into an `Err` payload.
struct CatchUnwind<F>(Pin<Box<F>>);

impl<F: Future> Future for CatchUnwind<F> {
    type Output = std::thread::Result<F::Output>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = self.0.as_mut();
        match std::panic::catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(output)) => Poll::Ready(Ok(output)),
            Err(payload) => Poll::Ready(Err(payload)),
        }
    }
}
