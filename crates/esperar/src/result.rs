//! Result and error types for Esperar.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// A precondition on inputs was violated; never retried
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// A single acquisition attempt failed; absorbed by the retry loop
    #[error("acquisition attempt failed: {message}")]
    Acquisition {
        /// Error message
        message: String,
    },

    /// Every acquisition attempt failed; carries the full ordered history
    #[error("gave up after {attempts} attempts: {history}")]
    ExhaustedRetries {
        /// Number of attempts made
        attempts: u32,
        /// Numbered failure messages in attempt order
        history: String,
    },

    /// The polled resource is momentarily not queryable; polling continues
    #[error("not ready yet: {message}")]
    TransientUnavailable {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Operation cancelled through a [`CancelToken`](crate::CancelToken)
    #[error("operation cancelled")]
    Cancelled,

    /// Browser executable not found
    #[error("browser executable not found; install a browser or set the binary path in SessionConfig")]
    BrowserNotFound,

    /// Browser session startup error
    #[error("failed to start browser session: {message}")]
    SessionStartup {
        /// Error message
        message: String,
    },

    /// Connection to a remote grid endpoint failed
    #[error("failed to connect to remote endpoint {endpoint}: {message}")]
    RemoteConnection {
        /// The endpoint that was dialed
        endpoint: String,
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An element could not be located on the page
    #[error("could not find element {selector} on page")]
    ElementNotFound {
        /// Description of the selector that failed
        selector: String,
    },

    /// Page error (script evaluation, readiness probe, load failure)
    #[error("page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Screenshot capture failed
    #[error("screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EsperarError {
    /// Create an [`InvalidArgument`](Self::InvalidArgument) error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a [`TransientUnavailable`](Self::TransientUnavailable) error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::TransientUnavailable {
            message: message.into(),
        }
    }

    /// Whether this failure is expected to resolve itself within a polling
    /// window. Transient failures are swallowed by the poller; everything
    /// else aborts it.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientUnavailable { .. })
    }
}
