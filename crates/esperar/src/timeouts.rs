//! Timeout values used during testing.

/// Default timeout for page-level waits, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Timeout for individual control interactions, in milliseconds.
pub const CONTROL_TIMEOUT_MS: u64 = 10_000;

/// One second, in milliseconds.
pub const ONE_SECOND_MS: u64 = 1_000;

/// Control-interaction timeout, in seconds.
pub const CONTROL_TIMEOUT_SECS: u64 = 60;

/// Page-load timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default polling interval, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Number of attempts made when starting a browser session.
pub const SESSION_STARTUP_ATTEMPTS: u32 = 3;
