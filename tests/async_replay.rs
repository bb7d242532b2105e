//! Capture and replay of cooperatively suspending computations.

mod common;

use common::*;
use futures_lite::future;
use outcome::{acapture, cause, AsyncResume, Cause, Failure, Maybe, Step, Value};

fn init_test(name: &str) {
    init_test_logging();
    test_phase!(name);
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("value error: {0}")]
struct ValueError(i32);

#[derive(Debug, thiserror::Error)]
#[error("key error")]
struct KeyError;

async fn add(x: i32, y: i32) -> Result<i32, Cause> {
    future::yield_now().await;
    Ok(x + y)
}

async fn raise_value_error(x: i32) -> Result<i32, Cause> {
    future::yield_now().await;
    Err(cause!(ValueError(x)))
}

/// A paused async stream: yields 1, expects "value" and yields 2, expects a
/// `KeyError` and yields 3, then finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgenState {
    Created,
    AtOne,
    AtTwo,
    AtThree,
    Finished,
}

struct Agen {
    state: AgenState,
}

impl Agen {
    fn new() -> Self {
        Self {
            state: AgenState::Created,
        }
    }

    async fn start(&mut self) -> Step<i32, ()> {
        future::yield_now().await;
        assert_eq!(self.state, AgenState::Created);
        self.state = AgenState::AtOne;
        Step::Yielded(1)
    }

    fn finish(&mut self) -> Step<i32, ()> {
        self.state = AgenState::Finished;
        Step::Complete(())
    }
}

impl AsyncResume<&'static str> for Agen {
    type Yield = Step<i32, ()>;

    async fn resume_with_value(&mut self, value: &'static str) -> Result<Step<i32, ()>, Cause> {
        future::yield_now().await;
        match self.state {
            AgenState::AtOne => {
                assert_eq!(value, "value");
                self.state = AgenState::AtTwo;
                Ok(Step::Yielded(2))
            }
            AgenState::AtTwo => panic!("expected a KeyError, got {value:?}"),
            _ => Ok(self.finish()),
        }
    }

    async fn resume_with_failure(&mut self, cause: Cause) -> Result<Step<i32, ()>, Cause> {
        future::yield_now().await;
        match self.state {
            AgenState::AtTwo if cause.is::<KeyError>() => {
                self.state = AgenState::AtThree;
                Ok(Step::Yielded(3))
            }
            _ => {
                self.finish();
                Err(cause)
            }
        }
    }
}

#[test]
fn acapture_value_and_failure() {
    init_test("acapture_value_and_failure");
    future::block_on(async {
        let v = acapture(|| add(3, 4)).await;
        assert_eq!(v, Maybe::Value(Value::new(7)));

        let e = acapture(|| raise_value_error(9)).await;
        let failure = assert_failure!(&e);
        assert_eq!(failure.cause().downcast_ref::<ValueError>(), Some(&ValueError(9)));
    });
    test_complete!("acapture_value_and_failure");
}

#[test]
fn asend_drives_async_stream() {
    init_test("asend_drives_async_stream");
    future::block_on(async {
        let mut agen = Agen::new();
        let v = Value::new("value");
        let e = Failure::new(KeyError);

        assert_eq!(agen.start().await, Step::Yielded(1));
        assert_eq!(v.asend(&mut agen).await.unwrap(), Step::Yielded(2));
        assert_already_used!(v.asend(&mut agen).await.unwrap_err(), "asend");

        let yielded = e.asend::<&'static str, _>(&mut agen).await.unwrap();
        assert_eq!(yielded, Step::Yielded(3));
        assert_already_used!(
            e.asend::<&'static str, _>(&mut agen).await.unwrap_err(),
            "asend"
        );

        let done = AsyncResume::resume_with_value(&mut agen, "ignored").await.unwrap();
        assert!(done.is_complete());
        assert_eq!(agen.state, AgenState::Finished);
    });
    test_complete!("asend_drives_async_stream");
}

#[test]
fn unhandled_injection_propagates() {
    init_test("unhandled_injection_propagates");
    future::block_on(async {
        let mut agen = Agen::new();
        agen.start().await;
        let cause = Cause::new(ValueError(1));
        let e = Failure::new(cause.clone());
        let err = e.asend::<&'static str, _>(&mut agen).await.unwrap_err();
        assert!(Cause::ptr_eq(&err, &cause));
        assert_eq!(agen.state, AgenState::Finished);
    });
    test_complete!("unhandled_injection_propagates");
}

#[test]
fn trail_frame_removal() {
    init_test("trail_frame_removal");
    let e = future::block_on(acapture(|| raise_value_error(0)));
    let raised = e.unwrap().unwrap_err();
    let functions = raised.trail().functions();
    assert_with_log!(
        functions.ends_with(&["unwrap", "raise_value_error"]),
        "trail tail",
        ["unwrap", "raise_value_error"],
        functions
    );
    assert!(!functions.contains(&"acapture"));
    test_complete!("trail_frame_removal");
}
