// ABOUTME: Bounded fixed-delay polling with an injectable clock.
// ABOUTME: Used for the backend health wait; tests swap in a recording clock.

use crate::config::PollConfig;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Source of delays between poll attempts.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How a poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Result of the last attempt made.
    pub succeeded: bool,
    /// Number of probe calls, between 1 and the configured attempts.
    pub attempts: u32,
}

/// Call `probe` until it returns true or `policy.attempts` calls were made.
///
/// Sleeps `policy.interval` between attempts, never after the last one.
/// `on_retry` runs before each sleep with the 1-based attempt that just failed.
/// A policy of zero attempts is treated as one.
pub async fn poll_until<C, P, Fut, R>(
    policy: &PollConfig,
    clock: &C,
    mut probe: P,
    mut on_retry: R,
) -> PollOutcome
where
    C: Clock + ?Sized,
    P: FnMut(u32) -> Fut,
    Fut: Future<Output = bool>,
    R: FnMut(u32, u32, Duration),
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        if probe(attempt).await {
            return PollOutcome {
                succeeded: true,
                attempts: attempt,
            };
        }

        if attempt < attempts {
            on_retry(attempt, attempts, policy.interval);
            clock.sleep(policy.interval).await;
        }
    }

    PollOutcome {
        succeeded: false,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingClock {
        sleeps: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Clock for CountingClock {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().push(duration);
        }
    }

    fn policy(attempts: u32) -> PollConfig {
        PollConfig {
            attempts,
            interval: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn stops_on_first_success() {
        let clock = CountingClock::default();
        let outcome = poll_until(
            &policy(6),
            &clock,
            |attempt| async move { attempt == 3 },
            |_, _, _| {},
        )
        .await;

        assert_eq!(
            outcome,
            PollOutcome {
                succeeded: true,
                attempts: 3
            }
        );
        assert_eq!(clock.sleeps.lock().len(), 2);
    }

    #[tokio::test]
    async fn exhausts_attempts_without_trailing_sleep() {
        let clock = CountingClock::default();
        let mut calls = 0;
        let outcome = poll_until(
            &policy(6),
            &clock,
            |_| {
                calls += 1;
                async { false }
            },
            |_, _, _| {},
        )
        .await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.attempts, 6);
        assert_eq!(calls, 6);
        assert_eq!(*clock.sleeps.lock(), vec![Duration::from_secs(5); 5]);
    }

    #[tokio::test]
    async fn immediate_success_never_sleeps() {
        let clock = CountingClock::default();
        let outcome = poll_until(&policy(6), &clock, |_| async { true }, |_, _, _| {}).await;
        assert_eq!(outcome.attempts, 1);
        assert!(clock.sleeps.lock().is_empty());
    }

    #[tokio::test]
    async fn retry_callback_sees_attempt_numbers() {
        let clock = CountingClock::default();
        let mut seen = Vec::new();
        poll_until(
            &policy(3),
            &clock,
            |_| async { false },
            |attempt, total, _| seen.push((attempt, total)),
        )
        .await;
        assert_eq!(seen, vec![(1, 3), (2, 3)]);
    }

    #[tokio::test]
    async fn zero_attempts_still_probes_once() {
        let clock = CountingClock::default();
        let outcome = poll_until(&policy(0), &clock, |_| async { false }, |_, _, _| {}).await;
        assert_eq!(outcome.attempts, 1);
        assert!(clock.sleeps.lock().is_empty());
    }
}
