//! Session configuration.
//!
//! These are plain configuration values handed to the session layer and
//! the fixture; nothing here is interpreted by the retry/wait core.

use crate::timeouts;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Supported browsers for a test session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrowserKind {
    /// Firefox
    #[default]
    Firefox,
    /// Chrome / Chromium
    Chrome,
    /// Microsoft Edge
    Edge,
}

impl BrowserKind {
    /// Capability name for this browser
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Edge => "edge",
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a browser session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which browser to drive
    pub browser: BrowserKind,
    /// Run in headless mode
    pub headless: bool,
    /// Path to the browser binary (None = auto-detect)
    pub binary_path: Option<PathBuf>,
    /// Path to the driver executable, for backends that spawn one
    pub driver_path: Option<PathBuf>,
    /// Remote grid/debugging endpoint; when set the session connects
    /// instead of launching a local browser
    pub remote_endpoint: Option<String>,
    /// Delete all cookies before the first navigation
    pub clear_cookies: bool,
    /// Directory downloads are saved to
    pub download_dir: Option<PathBuf>,
    /// Maximize the window after startup
    pub maximize: bool,
    /// Page-load timeout in seconds
    pub page_load_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::default(),
            headless: true,
            binary_path: None,
            driver_path: None,
            remote_endpoint: None,
            clear_cookies: true,
            download_dir: None,
            maximize: true,
            page_load_timeout_secs: timeouts::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the browser kind
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the browser binary path
    #[must_use]
    pub fn with_binary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary_path = Some(path.into());
        self
    }

    /// Set the driver executable path
    #[must_use]
    pub fn with_driver_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.driver_path = Some(path.into());
        self
    }

    /// Set a remote endpoint; the session will connect to it rather than
    /// launch a local browser
    #[must_use]
    pub fn with_remote_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote_endpoint = Some(endpoint.into());
        self
    }

    /// Set whether cookies are cleared before the first navigation
    #[must_use]
    pub const fn with_clear_cookies(mut self, clear: bool) -> Self {
        self.clear_cookies = clear;
        self
    }

    /// Set the download directory
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Set whether the window is maximized after startup
    #[must_use]
    pub const fn with_maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    /// Set the page-load timeout in seconds
    #[must_use]
    pub const fn with_page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    /// Whether this config points at a remote grid endpoint
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote_endpoint.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod browser_kind_tests {
        use super::*;

        #[test]
        fn test_capability_names() {
            assert_eq!(BrowserKind::Firefox.as_str(), "firefox");
            assert_eq!(BrowserKind::Chrome.as_str(), "chrome");
            assert_eq!(BrowserKind::Edge.as_str(), "edge");
        }

        #[test]
        fn test_default_is_firefox() {
            assert_eq!(BrowserKind::default(), BrowserKind::Firefox);
        }

        #[test]
        fn test_display() {
            assert_eq!(format!("{}", BrowserKind::Chrome), "chrome");
        }
    }

    mod session_config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SessionConfig::default();
            assert_eq!(config.browser, BrowserKind::Firefox);
            assert!(config.headless);
            assert!(config.clear_cookies);
            assert!(config.maximize);
            assert!(!config.is_remote());
            assert_eq!(
                config.page_load_timeout_secs,
                timeouts::DEFAULT_TIMEOUT_SECS
            );
        }

        #[test]
        fn test_builder_chain() {
            let config = SessionConfig::new()
                .with_browser(BrowserKind::Chrome)
                .with_headless(false)
                .with_binary_path("/usr/bin/chromium")
                .with_driver_path("/usr/bin/chromedriver")
                .with_download_dir("/tmp/downloads")
                .with_clear_cookies(false)
                .with_maximize(false)
                .with_page_load_timeout_secs(30);
            assert_eq!(config.browser, BrowserKind::Chrome);
            assert!(!config.headless);
            assert_eq!(
                config.binary_path.as_deref(),
                Some(std::path::Path::new("/usr/bin/chromium"))
            );
            assert!(!config.clear_cookies);
            assert!(!config.maximize);
            assert_eq!(config.page_load_timeout_secs, 30);
        }

        #[test]
        fn test_remote_endpoint() {
            let config =
                SessionConfig::new().with_remote_endpoint("ws://grid.internal:4444/session");
            assert!(config.is_remote());
        }

        #[test]
        fn test_serde_round_trip() {
            let config = SessionConfig::new()
                .with_browser(BrowserKind::Edge)
                .with_remote_endpoint("ws://grid:9222");
            let json = serde_json::to_string(&config).unwrap();
            let back: SessionConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(back.browser, BrowserKind::Edge);
            assert_eq!(back.remote_endpoint.as_deref(), Some("ws://grid:9222"));
        }
    }
}
