//! Page objects.
//!
//! A page object holds a session-independent map of named locators and
//! resolves them on demand; the session handle is passed into every
//! operation instead of living in process-wide state, so concurrent test
//! runs stay safe. Declare a locator once, reuse it across methods.

use crate::element::Control;
use crate::locator::{Locator, Selector};
use crate::result::{EsperarError, EsperarResult};
use crate::timeouts;
use crate::wait::WaitOptions;
use std::collections::HashMap;

/// Trait for page objects representing a page or component in the UI
pub trait PageObject {
    /// URL pattern that matches this page (e.g., "/login")
    fn url_pattern(&self) -> &str;

    /// Check if the page is fully loaded and ready for interaction
    fn is_loaded(&self) -> bool {
        true
    }

    /// Timeout for page load, in milliseconds
    fn load_timeout_ms(&self) -> u64 {
        timeouts::DEFAULT_TIMEOUT_MS
    }

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A generic page object backed by a named locator map
#[derive(Debug, Clone)]
pub struct Page {
    url_pattern: String,
    locators: HashMap<String, Locator>,
    load_timeout_ms: u64,
}

impl Page {
    /// Create a page object for the given URL pattern
    #[must_use]
    pub fn new(url_pattern: impl Into<String>) -> Self {
        Self {
            url_pattern: url_pattern.into(),
            locators: HashMap::new(),
            load_timeout_ms: timeouts::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Register a named locator
    #[must_use]
    pub fn with_locator(mut self, name: impl Into<String>, selector: Selector) -> Self {
        let _ = self
            .locators
            .insert(name.into(), Locator::from_selector(selector));
        self
    }

    /// Set the page-load timeout
    #[must_use]
    pub const fn with_load_timeout(mut self, timeout_ms: u64) -> Self {
        self.load_timeout_ms = timeout_ms;
        self
    }

    /// Register a named locator on an existing page
    pub fn add_locator(&mut self, name: impl Into<String>, selector: Selector) {
        let _ = self
            .locators
            .insert(name.into(), Locator::from_selector(selector));
    }

    /// Look up a locator by name
    #[must_use]
    pub fn locator(&self, name: &str) -> Option<&Locator> {
        self.locators.get(name)
    }

    /// Build a [`Control`] for a named locator
    #[must_use]
    pub fn control(&self, name: &str) -> Option<Control> {
        self.locators.get(name).cloned().map(Control::new)
    }

    /// Names of all registered locators
    #[must_use]
    pub fn locator_names(&self) -> Vec<&str> {
        self.locators.keys().map(String::as_str).collect()
    }

    fn load_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.load_timeout_ms)
            .with_poll_interval(timeouts::ONE_SECOND_MS)
    }
}

impl PageObject for Page {
    fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    fn load_timeout_ms(&self) -> u64 {
        self.load_timeout_ms
    }
}

#[cfg(not(feature = "browser"))]
mod sync_impl {
    use super::*;
    use crate::session::Session;
    use crate::wait::Waiter;

    impl Page {
        /// Wait for the document to finish loading before the page is
        /// used.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::PageError`] when the page does not
        /// finish loading within the page-load timeout.
        pub fn open(&self, session: &Session) -> EsperarResult<()> {
            let outcome =
                Waiter::new().poll_until(|| session.document_ready(), &self.load_options())?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::PageError {
                    message: "timed out while waiting for the page to load".to_string(),
                })
            }
        }

        /// Wait for the document to load and a marker element to be
        /// attached, confirming the correct page is showing.
        ///
        /// The marker is polled once per second up to the page-load
        /// timeout.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when the marker
        /// never appears.
        pub fn open_with_marker(
            &self,
            session: &Session,
            marker: &Selector,
        ) -> EsperarResult<()> {
            self.open(session)?;
            let outcome =
                Waiter::new().poll_until(|| session.exists(marker), &self.load_options())?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::ElementNotFound {
                    selector: marker.to_string(),
                })
            }
        }
    }
}

#[cfg(feature = "browser")]
mod async_impl {
    use super::*;
    use crate::session::Session;
    use crate::wait::poll_until_async;

    impl Page {
        /// Wait for the document to finish loading before the page is
        /// used.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::PageError`] when the page does not
        /// finish loading within the page-load timeout.
        pub async fn open(&self, session: &Session) -> EsperarResult<()> {
            let outcome =
                poll_until_async(|| session.document_ready(), &self.load_options()).await?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::PageError {
                    message: "timed out while waiting for the page to load".to_string(),
                })
            }
        }

        /// Wait for the document to load and a marker element to be
        /// attached, confirming the correct page is showing.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when the marker
        /// never appears.
        pub async fn open_with_marker(
            &self,
            session: &Session,
            marker: &Selector,
        ) -> EsperarResult<()> {
            self.open(session).await?;
            let outcome = poll_until_async(|| session.exists(marker), &self.load_options()).await?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::ElementNotFound {
                    selector: marker.to_string(),
                })
            }
        }
    }
}
