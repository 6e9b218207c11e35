//! Condition polling for synchronization with the browser.
//!
//! Every wait in this crate is a blocking sleep-and-repoll loop on the
//! calling thread. Test steps are sequential; only one logical operation
//! is ever in flight per session, so no event callbacks or worker threads
//! are involved.

use crate::result::{EsperarError, EsperarResult};
use crate::timeouts;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default timeout for wait operations (60 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = timeouts::DEFAULT_TIMEOUT_MS;

/// Default polling interval (1 second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = timeouts::DEFAULT_POLL_INTERVAL_MS;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// CANCELLATION
// =============================================================================

/// Cooperative cancellation handle for a poll.
///
/// Cloned tokens share one flag. Cancellation is observed at tick
/// boundaries; a sleeping poll finishes its current sleep before it
/// notices.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, uncancelled token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any poll holding a clone of this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// =============================================================================
// POLL OUTCOME
// =============================================================================

/// Outcome of a single poll invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Whether the condition was satisfied before the timeout
    pub satisfied: bool,
    /// Time spent polling
    pub elapsed: Duration,
}

impl PollOutcome {
    /// Create a satisfied outcome
    #[must_use]
    pub const fn satisfied_after(elapsed: Duration) -> Self {
        Self {
            satisfied: true,
            elapsed,
        }
    }

    /// Create a timed-out outcome
    #[must_use]
    pub const fn timed_out_after(elapsed: Duration) -> Self {
        Self {
            satisfied: false,
            elapsed,
        }
    }
}

// =============================================================================
// WAITER
// =============================================================================

/// Waiter for synchronization operations
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    cancel: Option<CancelToken>,
}

impl Waiter {
    /// Create a new waiter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation token; a cancelled token aborts the poll
    /// with [`EsperarError::Cancelled`]
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Poll a fallible predicate until it is satisfied or the timeout
    /// elapses.
    ///
    /// The predicate is evaluated immediately; a `true` result returns
    /// without sleeping, and a zero timeout evaluates the predicate
    /// exactly once. Between evaluations the calling thread sleeps for
    /// the configured interval.
    ///
    /// Transient predicate errors ([`EsperarError::is_transient`]) count
    /// as "not satisfied yet" and polling continues; any other error
    /// aborts the poll immediately.
    ///
    /// # Errors
    ///
    /// Propagates the first non-transient predicate error, or
    /// [`EsperarError::Cancelled`] when the attached token fires.
    pub fn poll_until<F>(&self, mut predicate: F, options: &WaitOptions) -> EsperarResult<PollOutcome>
    where
        F: FnMut() -> EsperarResult<bool>,
    {
        let start = Instant::now();
        let timeout = options.timeout();
        let interval = options.poll_interval();

        loop {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(EsperarError::Cancelled);
                }
            }

            match predicate() {
                Ok(true) => return Ok(PollOutcome::satisfied_after(start.elapsed())),
                Ok(false) => {}
                Err(err) if err.is_transient() => {
                    trace!(error = %err, "condition not queryable yet");
                }
                Err(err) => return Err(err),
            }

            if start.elapsed() >= timeout {
                return Ok(PollOutcome::timed_out_after(start.elapsed()));
            }
            std::thread::sleep(interval);
        }
    }

    /// Poll an infallible boolean predicate. See [`Waiter::poll_until`].
    ///
    /// # Errors
    ///
    /// Returns [`EsperarError::Cancelled`] when the attached token fires.
    pub fn poll<F>(&self, mut predicate: F, options: &WaitOptions) -> EsperarResult<PollOutcome>
    where
        F: FnMut() -> bool,
    {
        self.poll_until(|| Ok(predicate()), options)
    }
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Wait for a condition with default options, failing on timeout.
///
/// # Errors
///
/// Returns [`EsperarError::Timeout`] if the condition is not satisfied
/// within `timeout_ms`.
pub fn wait_until<F>(predicate: F, timeout_ms: u64) -> EsperarResult<()>
where
    F: FnMut() -> bool,
{
    let options = WaitOptions::new().with_timeout(timeout_ms);
    let outcome = Waiter::new().poll(predicate, &options)?;
    if outcome.satisfied {
        Ok(())
    } else {
        Err(EsperarError::Timeout { ms: timeout_ms })
    }
}

/// Async twin of [`Waiter::poll_until`] for predicates that must await
/// the browser session. Identical semantics, with the sleep handed to the
/// tokio timer instead of the calling thread.
///
/// # Errors
///
/// Propagates the first non-transient predicate error.
#[cfg(feature = "browser")]
pub async fn poll_until_async<F, Fut>(
    mut predicate: F,
    options: &WaitOptions,
) -> EsperarResult<PollOutcome>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = EsperarResult<bool>>,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let interval = options.poll_interval();

    loop {
        match predicate().await {
            Ok(true) => return Ok(PollOutcome::satisfied_after(start.elapsed())),
            Ok(false) => {}
            Err(err) if err.is_transient() => {
                trace!(error = %err, "condition not queryable yet");
            }
            Err(err) => return Err(err),
        }

        if start.elapsed() >= timeout {
            return Ok(PollOutcome::timed_out_after(start.elapsed()));
        }
        tokio::time::sleep(interval).await;
    }
}
