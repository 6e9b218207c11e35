//! Bounded-retry resource acquisition.
//!
//! Browser session startup fails for environmental reasons (a busy
//! debugging port, a driver process that is slow to bind) far more often
//! than for permanent ones. [`acquire`] runs a factory up to a fixed
//! number of times, in sequence, and aggregates every failure message
//! into a single error so the operator sees the whole history instead of
//! only the last attempt.

use crate::result::{EsperarError, EsperarResult};
use crate::timeouts;
use std::fmt;
use tracing::{debug, warn};

/// A single failed attempt inside a bounded retry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// 1-based attempt number
    pub attempt: u32,
    /// Failure message recorded for this attempt
    pub message: String,
}

impl AttemptFailure {
    /// Create a new attempt failure record
    #[must_use]
    pub fn new(attempt: u32, message: impl Into<String>) -> Self {
        Self {
            attempt,
            message: message.into(),
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt {}: {}", self.attempt, self.message)
    }
}

/// Retry policy for resource acquisition.
///
/// Immutable once constructed; created per invocation and discarded after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts; must be at least 1
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: timeouts::SESSION_STARTUP_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Run `factory` under this policy. See [`acquire`].
    pub fn acquire<T, F>(&self, factory: F) -> EsperarResult<T>
    where
        F: FnMut() -> EsperarResult<T>,
    {
        acquire(self.max_attempts, factory)
    }
}

fn render_history(failures: &[AttemptFailure]) -> String {
    let rendered: Vec<String> = failures.iter().map(ToString::to_string).collect();
    rendered.join("; ")
}

/// Attempt to acquire a resource up to `max_attempts` times.
///
/// Attempts run strictly in sequence and back to back, with no delay
/// between them. The first success returns immediately. Each failure is
/// recorded in order; when the final attempt fails the call returns
/// [`EsperarError::ExhaustedRetries`] whose message lists every recorded
/// failure prefixed by its attempt number.
///
/// A failed attempt is not cleaned up here; any partial state belongs to
/// the factory.
///
/// # Errors
///
/// Returns [`EsperarError::InvalidArgument`] when `max_attempts` is zero
/// (the factory is never invoked), or `ExhaustedRetries` when every
/// attempt failed.
pub fn acquire<T, F>(max_attempts: u32, mut factory: F) -> EsperarResult<T>
where
    F: FnMut() -> EsperarResult<T>,
{
    if max_attempts == 0 {
        return Err(EsperarError::invalid_argument(
            "max_attempts must be at least 1",
        ));
    }

    let mut failures: Vec<AttemptFailure> = Vec::new();
    for attempt in 1..=max_attempts {
        match factory() {
            Ok(resource) => {
                debug!(attempt, "resource acquired");
                return Ok(resource);
            }
            Err(err) => {
                warn!(attempt, error = %err, "acquisition attempt failed");
                failures.push(AttemptFailure::new(attempt, err.to_string()));
            }
        }
    }

    Err(EsperarError::ExhaustedRetries {
        attempts: max_attempts,
        history: render_history(&failures),
    })
}

/// Async twin of [`acquire`] for session factories that must await.
///
/// Identical semantics: sequential attempts, no delay between them, the
/// full numbered failure history on exhaustion.
///
/// # Errors
///
/// Same as [`acquire`].
#[cfg(feature = "browser")]
pub async fn acquire_async<T, F, Fut>(max_attempts: u32, mut factory: F) -> EsperarResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = EsperarResult<T>>,
{
    if max_attempts == 0 {
        return Err(EsperarError::invalid_argument(
            "max_attempts must be at least 1",
        ));
    }

    let mut failures: Vec<AttemptFailure> = Vec::new();
    for attempt in 1..=max_attempts {
        match factory().await {
            Ok(resource) => {
                debug!(attempt, "resource acquired");
                return Ok(resource);
            }
            Err(err) => {
                warn!(attempt, error = %err, "acquisition attempt failed");
                failures.push(AttemptFailure::new(attempt, err.to_string()));
            }
        }
    }

    Err(EsperarError::ExhaustedRetries {
        attempts: max_attempts,
        history: render_history(&failures),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    mod attempt_failure_tests {
        use super::*;

        #[test]
        fn test_display_prefixes_attempt_number() {
            let failure = AttemptFailure::new(2, "port busy");
            assert_eq!(failure.to_string(), "attempt 2: port busy");
        }

        #[test]
        fn test_equality() {
            assert_eq!(
                AttemptFailure::new(1, "x"),
                AttemptFailure::new(1, "x")
            );
            assert_ne!(
                AttemptFailure::new(1, "x"),
                AttemptFailure::new(2, "x")
            );
        }
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_default_attempt_budget() {
            let policy = RetryPolicy::default();
            assert_eq!(policy.max_attempts, timeouts::SESSION_STARTUP_ATTEMPTS);
        }

        #[test]
        fn test_policy_acquire_delegates() {
            let policy = RetryPolicy::new(2);
            let result = policy.acquire(|| Ok::<_, EsperarError>(7));
            assert_eq!(result.unwrap(), 7);
        }
    }

    mod acquire_tests {
        use super::*;

        #[test]
        fn test_success_on_first_attempt_invokes_factory_once() {
            let calls = AtomicU32::new(0);
            let result = acquire(3, || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, EsperarError>("session")
            });
            assert_eq!(result.unwrap(), "session");
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn test_success_on_attempt_k_invokes_factory_k_times() {
            let calls = AtomicU32::new(0);
            let result = acquire(5, || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 4 {
                    Err(EsperarError::Acquisition {
                        message: "not yet".to_string(),
                    })
                } else {
                    Ok(n)
                }
            });
            assert_eq!(result.unwrap(), 4);
            assert_eq!(calls.load(Ordering::SeqCst), 4);
        }

        #[test]
        fn test_zero_attempts_is_invalid_and_never_invokes_factory() {
            let calls = AtomicU32::new(0);
            let result = acquire(0, || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, EsperarError>(())
            });
            assert!(matches!(
                result,
                Err(EsperarError::InvalidArgument { .. })
            ));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn test_exhausted_message_lists_all_attempts_in_order() {
            let result: EsperarResult<()> = acquire(3, || {
                Err(EsperarError::SessionStartup {
                    message: "driver not found".to_string(),
                })
            });

            match result {
                Err(EsperarError::ExhaustedRetries { attempts, history }) => {
                    assert_eq!(attempts, 3);
                    for n in 1..=3 {
                        assert!(history.contains(&format!("attempt {n}:")));
                    }
                    assert_eq!(history.matches("driver not found").count(), 3);
                    let first = history.find("attempt 1").unwrap();
                    let second = history.find("attempt 2").unwrap();
                    let third = history.find("attempt 3").unwrap();
                    assert!(first < second && second < third);
                }
                other => panic!("expected ExhaustedRetries, got {other:?}"),
            }
        }

        #[test]
        fn test_port_busy_then_success_scenario() {
            let calls = AtomicU32::new(0);
            let result = acquire(3, || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= 2 {
                    Err(EsperarError::SessionStartup {
                        message: "port busy".to_string(),
                    })
                } else {
                    Ok("session")
                }
            });
            assert_eq!(result.unwrap(), "session");
            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn test_single_attempt_failure_is_not_surfaced_alone() {
            let result: EsperarResult<()> = acquire(2, || {
                Err(EsperarError::Acquisition {
                    message: "boom".to_string(),
                })
            });
            // The caller sees the aggregated error, never a bare attempt
            assert!(matches!(
                result,
                Err(EsperarError::ExhaustedRetries { .. })
            ));
        }
    }
}
