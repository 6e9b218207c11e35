//! Element selectors and locators.
//!
//! A [`Selector`] describes how to find an element; it compiles to a
//! JavaScript expression that the session evaluates in the page. A
//! [`Locator`] pairs a selector with the wait options used when the
//! element is interacted with.

use crate::timeouts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id
    Id(String),
    /// Text content selector
    Text(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an element-id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    // JS string literal with quoting/escaping handled for us.
    fn js_string(value: &str) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
    }

    /// JavaScript expression resolving to the first matching element or null
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({})", Self::js_string(s)),
            Self::XPath(s) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                Self::js_string(s)
            ),
            Self::Id(id) => format!("document.getElementById({})", Self::js_string(id)),
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({})) ?? null",
                Self::js_string(t)
            ),
            Self::TestId(id) => format!(
                "document.querySelector({})",
                Self::js_string(&format!("[data-testid=\"{id}\"]"))
            ),
        }
    }

    /// JavaScript expression counting matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({}).length", Self::js_string(s)),
            Self::XPath(s) => format!(
                "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
                Self::js_string(s)
            ),
            Self::Id(id) => format!(
                "(document.getElementById({}) === null ? 0 : 1)",
                Self::js_string(id)
            ),
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({})).length",
                Self::js_string(t)
            ),
            Self::TestId(id) => format!(
                "document.querySelectorAll({}).length",
                Self::js_string(&format!("[data-testid=\"{id}\"]"))
            ),
        }
    }

    /// JavaScript expression testing whether the element exists
    #[must_use]
    pub fn to_exists_query(&self) -> String {
        format!("(({}) !== null)", self.to_query())
    }

    /// JavaScript expression testing whether the element is rendered
    #[must_use]
    pub fn to_visible_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el !== null && el.getClientRects().length > 0; }})()",
            self.to_query()
        )
    }

    /// JavaScript expression testing whether the element accepts input
    #[must_use]
    pub fn to_enabled_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el !== null && !el.disabled; }})()",
            self.to_query()
        )
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css `{s}`"),
            Self::XPath(s) => write!(f, "xpath `{s}`"),
            Self::Id(s) => write!(f, "id `{s}`"),
            Self::Text(s) => write!(f, "text `{s}`"),
            Self::TestId(s) => write!(f, "test-id `{s}`"),
        }
    }
}

/// Options controlling how long a locator waits for its element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for the element to become actionable
    pub timeout: Duration,
    /// Polling interval while waiting
    pub poll_interval: Duration,
    /// Whether the element must be rendered, not merely attached
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(timeouts::CONTROL_TIMEOUT_MS),
            poll_interval: Duration::from_millis(timeouts::DEFAULT_POLL_INTERVAL_MS),
            visible: false,
        }
    }
}

/// A selector together with its wait options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator with a CSS selector and default options
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from any selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Set the visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}
