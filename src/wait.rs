//! Fixed-interval polling with cancellation.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{MissedTickBehavior, interval};

/// Outcome of a wait that did not produce a value.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum WaitError<E> {
    /// The check itself failed; the wait stopped on the first failure.
    #[error(transparent)]
    Check(E),
    /// The cancellation signal fired before the check reported completion.
    #[error("wait cancelled before completion")]
    Cancelled,
}

/// Repeatedly runs `check` until it yields a value, fails, or `cancel`
/// resolves.
///
/// The first check runs immediately. While it returns `Ok(None)` the flow
/// parks until the next tick of a fixed `interval`; there is no backoff or
/// jitter. A check error is returned at once without retrying. `cancel` is
/// raced against both the parked wait and an in-flight check, so dropping out
/// on cancellation also abandons any request the check was making.
///
/// # Errors
///
/// Returns [`WaitError::Check`] with the first check failure, or
/// [`WaitError::Cancelled`] once `cancel` resolves.
pub async fn wait_until<T, E, F, Fut, C>(
    period: Duration,
    mut check: F,
    cancel: C,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    C: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;
    tokio::pin!(cancel);

    loop {
        let outcome = tokio::select! {
            biased;
            () = &mut cancel => return Err(WaitError::Cancelled),
            outcome = check() => outcome,
        };
        match outcome {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(err) => return Err(WaitError::Check(err)),
        }

        tokio::select! {
            biased;
            () = &mut cancel => return Err(WaitError::Cancelled),
            _ = ticker.tick() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::future::pending;

    use tokio::time::{Instant, sleep};

    use super::*;

    const TICK: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn returns_immediately_when_first_check_completes() {
        let calls = Cell::new(0_u32);
        let started = Instant::now();

        let result: Result<&str, WaitError<String>> = wait_until(
            TICK,
            || {
                calls.set(calls.get() + 1);
                async { Ok(Some("done")) }
            },
            pending(),
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn propagates_check_error_without_retrying() {
        let calls = Cell::new(0_u32);

        let result: Result<(), WaitError<String>> = wait_until(
            TICK,
            || {
                calls.set(calls.get() + 1);
                async { Err(String::from("boom")) }
            },
            pending(),
        )
        .await;

        assert_eq!(result, Err(WaitError::Check(String::from("boom"))));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_an_endless_wait() {
        let calls = Cell::new(0_u32);
        let started = Instant::now();

        let result: Result<(), WaitError<String>> = wait_until(
            TICK,
            || {
                calls.set(calls.get() + 1);
                async { Ok(None) }
            },
            sleep(TICK),
        )
        .await;

        assert_eq!(result, Err(WaitError::Cancelled));
        assert_eq!(started.elapsed(), TICK);
        assert!((1..=2).contains(&calls.get()), "calls: {}", calls.get());
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_fixed_interval_until_done() {
        let calls = Cell::new(0_u32);
        let started = Instant::now();

        let result: Result<u32, WaitError<String>> = wait_until(
            TICK,
            || {
                let attempt = calls.get() + 1;
                calls.set(attempt);
                async move { Ok((attempt == 3).then_some(attempt)) }
            },
            pending(),
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(started.elapsed(), TICK * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_abandons_an_in_flight_check() {
        let result: Result<(), WaitError<String>> = wait_until(
            TICK,
            || async {
                sleep(TICK * 10).await;
                Ok(Some(()))
            },
            sleep(TICK),
        )
        .await;

        assert_eq!(result, Err(WaitError::Cancelled));
    }
}
