//! Tracing setup for test runs.

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber for test output.
///
/// The filter is taken from `RUST_LOG` when set, defaulting to `info`.
/// Calling this more than once is harmless; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
    }
}
