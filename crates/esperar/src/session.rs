//! Browser session control.
//!
//! When compiled with the `browser` feature this module drives a real
//! browser over the Chrome DevTools Protocol via chromiumoxide, either by
//! launching a local binary or by connecting to a remote debugging
//! endpoint. Without the feature it provides an in-memory mock with the
//! same surface so that synchronization logic is unit-testable without a
//! browser.
//!
//! Element location itself is delegated to the page: a [`Selector`]
//! compiles to a JavaScript query that the session evaluates.

use crate::config::SessionConfig;
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};

fn check_binary_path(config: &SessionConfig) -> EsperarResult<()> {
    if let Some(path) = &config.binary_path {
        if !path.exists() {
            return Err(EsperarError::BrowserNotFound);
        }
    }
    Ok(())
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{check_binary_path, SessionConfig, Selector, EsperarError, EsperarResult};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    fn js_string(value: &str) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
    }

    // CDP evaluation fails benignly while a navigation tears the old
    // execution context down; those reads are retried by the poller.
    fn classify_eval_error(message: String) -> EsperarError {
        let lowered = message.to_lowercase();
        if lowered.contains("execution context was destroyed")
            || lowered.contains("cannot find context")
        {
            EsperarError::TransientUnavailable { message }
        } else {
            EsperarError::PageError { message }
        }
    }

    /// An active browser session with a real CDP connection
    #[derive(Debug)]
    pub struct Session {
        config: SessionConfig,
        id: Uuid,
        url: std::sync::Mutex<String>,
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Session {
        /// Launch a local browser honoring the config
        ///
        /// # Errors
        ///
        /// Returns an error if the binary is missing or the browser
        /// cannot be launched
        pub async fn launch(config: SessionConfig) -> EsperarResult<Self> {
            check_binary_path(&config)?;

            let mut builder = CdpConfig::builder();
            if !config.headless {
                builder = builder.with_head();
            }
            if let Some(path) = &config.binary_path {
                builder = builder.chrome_executable(path);
            }
            if config.maximize {
                builder = builder.window_size(1920, 1080);
            }

            let cdp_config = builder
                .build()
                .map_err(|e| EsperarError::SessionStartup { message: e })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| EsperarError::SessionStartup {
                        message: e.to_string(),
                    })?;

            // Drive CDP events until the connection drops
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| EsperarError::PageError {
                    message: e.to_string(),
                })?;

            Ok(Self {
                config,
                id: Uuid::new_v4(),
                url: std::sync::Mutex::new(String::from("about:blank")),
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle,
            })
        }

        /// Connect to a remote debugging endpoint instead of launching
        ///
        /// # Errors
        ///
        /// Returns an error if the config has no endpoint or the
        /// connection fails
        pub async fn connect(config: SessionConfig) -> EsperarResult<Self> {
            let endpoint = config.remote_endpoint.clone().ok_or_else(|| {
                EsperarError::invalid_argument("remote_endpoint is required to connect")
            })?;

            let (browser, mut handler) =
                CdpBrowser::connect(endpoint.as_str())
                    .await
                    .map_err(|e| EsperarError::RemoteConnection {
                        endpoint: endpoint.clone(),
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| EsperarError::PageError {
                    message: e.to_string(),
                })?;

            Ok(Self {
                config,
                id: Uuid::new_v4(),
                url: std::sync::Mutex::new(String::from("about:blank")),
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle,
            })
        }

        /// Get the session configuration
        #[must_use]
        pub const fn config(&self) -> &SessionConfig {
            &self.config
        }

        /// Unique id of this session
        #[must_use]
        pub const fn id(&self) -> Uuid {
            self.id
        }

        /// Get the last navigated URL
        #[must_use]
        pub fn current_url(&self) -> String {
            self.url.lock().map(|url| url.clone()).unwrap_or_default()
        }

        /// Navigate to a URL
        ///
        /// # Errors
        ///
        /// Returns an error if navigation fails
        pub async fn goto(&self, url: &str) -> EsperarResult<()> {
            let page = self.page.lock().await;
            page.goto(url).await.map_err(|e| EsperarError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            drop(page);
            if let Ok(mut current) = self.url.lock() {
                *current = url.to_string();
            }
            Ok(())
        }

        /// Evaluate a JavaScript expression in the page
        ///
        /// # Errors
        ///
        /// Returns a transient error while the execution context is being
        /// replaced, a page error otherwise
        pub async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> EsperarResult<T> {
            let page = self.page.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| classify_eval_error(e.to_string()))?;
            result
                .into_value()
                .map_err(|e| EsperarError::PageError {
                    message: e.to_string(),
                })
        }

        /// Whether `document.readyState` reports a finished load
        pub async fn document_ready(&self) -> EsperarResult<bool> {
            self.eval("document.readyState === \"complete\"").await
        }

        /// Delete all cookies in the browser
        ///
        /// # Errors
        ///
        /// Returns an error if the CDP call fails
        pub async fn clear_cookies(&self) -> EsperarResult<()> {
            let page = self.page.lock().await;
            page.execute(ClearBrowserCookiesParams::default())
                .await
                .map_err(|e| EsperarError::PageError {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Whether an element matching the selector is attached
        pub async fn exists(&self, selector: &Selector) -> EsperarResult<bool> {
            self.eval(&selector.to_exists_query()).await
        }

        /// Whether the element is rendered
        pub async fn is_visible(&self, selector: &Selector) -> EsperarResult<bool> {
            self.eval(&selector.to_visible_query()).await
        }

        /// Whether the element accepts input
        pub async fn is_enabled(&self, selector: &Selector) -> EsperarResult<bool> {
            self.eval(&selector.to_enabled_query()).await
        }

        /// Whether the element is checked
        pub async fn is_checked(&self, selector: &Selector) -> EsperarResult<bool> {
            let expr = format!(
                "(() => {{ const el = {}; return el !== null && el.checked === true; }})()",
                selector.to_query()
            );
            self.eval(&expr).await
        }

        /// Number of elements matching the selector
        pub async fn count(&self, selector: &Selector) -> EsperarResult<u64> {
            self.eval(&selector.to_count_query()).await
        }

        /// Click the element
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub async fn click(&self, selector: &Selector) -> EsperarResult<()> {
            let expr = format!(
                "(() => {{ const el = {}; if (el === null) return false; el.click(); return true; }})()",
                selector.to_query()
            );
            let clicked: bool = self.eval(&expr).await?;
            if clicked {
                Ok(())
            } else {
                Err(EsperarError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }

        /// Append text to the element's value, as keystrokes would
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub async fn send_text(&self, selector: &Selector, text: &str) -> EsperarResult<()> {
            let expr = format!(
                "(() => {{ const el = {}; if (el === null) return false; \
                 el.value = el.value + {}; \
                 el.dispatchEvent(new Event(\"input\", {{ bubbles: true }})); return true; }})()",
                selector.to_query(),
                js_string(text)
            );
            let ok: bool = self.eval(&expr).await?;
            if ok {
                Ok(())
            } else {
                Err(EsperarError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }

        /// Select the option with the given visible text in a drop-down
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when the drop-down is
        /// missing, a page error when the option is
        pub async fn select_option(&self, selector: &Selector, text: &str) -> EsperarResult<()> {
            let expr = format!(
                "(() => {{ const el = {}; if (el === null) return \"no-element\"; \
                 const opt = Array.from(el.options ?? []).find(o => o.textContent.trim() === {}); \
                 if (opt === undefined) return \"no-option\"; \
                 el.value = opt.value; \
                 el.dispatchEvent(new Event(\"change\", {{ bubbles: true }})); return \"ok\"; }})()",
                selector.to_query(),
                js_string(text)
            );
            let status: String = self.eval(&expr).await?;
            match status.as_str() {
                "ok" => Ok(()),
                "no-element" => Err(EsperarError::ElementNotFound {
                    selector: selector.to_string(),
                }),
                _ => Err(EsperarError::PageError {
                    message: format!("option `{text}` not present in {selector}"),
                }),
            }
        }

        /// Text content of the element
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub async fn text_of(&self, selector: &Selector) -> EsperarResult<String> {
            let expr = format!(
                "(() => {{ const el = {}; return el === null ? null : el.textContent; }})()",
                selector.to_query()
            );
            let text: Option<String> = self.eval(&expr).await?;
            text.ok_or_else(|| EsperarError::ElementNotFound {
                selector: selector.to_string(),
            })
        }

        /// Text of every `tbody tr` row inside the element
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub async fn table_row_texts(&self, selector: &Selector) -> EsperarResult<Vec<String>> {
            let expr = format!(
                "(() => {{ const el = {}; if (el === null) return null; \
                 return Array.from(el.querySelectorAll(\"tbody tr\")).map(r => r.textContent.trim()); }})()",
                selector.to_query()
            );
            let rows: Option<Vec<String>> = self.eval(&expr).await?;
            rows.ok_or_else(|| EsperarError::ElementNotFound {
                selector: selector.to_string(),
            })
        }

        /// Serialized HTML of the current document
        pub async fn page_source(&self) -> EsperarResult<String> {
            self.eval("document.documentElement.outerHTML").await
        }

        /// Take a PNG screenshot of the page
        ///
        /// # Errors
        ///
        /// Returns an error if capture or decoding fails
        pub async fn screenshot(&self) -> EsperarResult<Vec<u8>> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let screenshot =
                page.execute(params)
                    .await
                    .map_err(|e| EsperarError::Screenshot {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| EsperarError::Screenshot {
                    message: e.to_string(),
                })
        }

        /// Close the browser session
        ///
        /// # Errors
        ///
        /// Returns an error if shutdown fails
        pub async fn close(self) -> EsperarResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| EsperarError::SessionStartup {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{check_binary_path, SessionConfig, Selector, EsperarError, EsperarResult};
    use std::collections::HashMap;
    use uuid::Uuid;

    /// State of one mock element
    #[derive(Debug, Clone)]
    pub struct MockElement {
        /// Rendered on the page
        pub visible: bool,
        /// Accepts input
        pub enabled: bool,
        /// Checkbox/radio state
        pub checked: bool,
        /// Text content
        pub text: String,
        /// Input value
        pub value: String,
        /// Texts of `tbody tr` rows, for table elements
        pub row_texts: Vec<String>,
    }

    impl Default for MockElement {
        fn default() -> Self {
            Self {
                visible: true,
                enabled: true,
                checked: false,
                text: String::new(),
                value: String::new(),
                row_texts: Vec::new(),
            }
        }
    }

    /// An in-memory browser session (mock when `browser` is disabled)
    #[derive(Debug)]
    pub struct Session {
        config: SessionConfig,
        id: Uuid,
        url: String,
        ready: bool,
        cookie_count: usize,
        source: String,
        screenshot_data: Vec<u8>,
        elements: HashMap<String, MockElement>,
        clicks: Vec<String>,
    }

    impl Session {
        fn empty(config: SessionConfig) -> Self {
            Self {
                config,
                id: Uuid::new_v4(),
                url: String::from("about:blank"),
                ready: false,
                cookie_count: 0,
                source: String::from("<html><head></head><body></body></html>"),
                screenshot_data: vec![0x89, b'P', b'N', b'G'],
                elements: HashMap::new(),
                clicks: Vec::new(),
            }
        }

        /// Launch a session (mock)
        ///
        /// # Errors
        ///
        /// Returns an error if a configured binary path does not exist
        pub fn launch(config: SessionConfig) -> EsperarResult<Self> {
            check_binary_path(&config)?;
            Ok(Self::empty(config))
        }

        /// Connect to a remote endpoint (mock)
        ///
        /// # Errors
        ///
        /// Returns an error if the config has no endpoint
        pub fn connect(config: SessionConfig) -> EsperarResult<Self> {
            if config.remote_endpoint.is_none() {
                return Err(EsperarError::invalid_argument(
                    "remote_endpoint is required to connect",
                ));
            }
            Ok(Self::empty(config))
        }

        /// Get the session configuration
        #[must_use]
        pub const fn config(&self) -> &SessionConfig {
            &self.config
        }

        /// Unique id of this session
        #[must_use]
        pub const fn id(&self) -> Uuid {
            self.id
        }

        /// Get the last navigated URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }

        /// Navigate to a URL; the mock page becomes ready immediately
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub fn goto(&mut self, url: &str) -> EsperarResult<()> {
            self.url = url.to_string();
            self.ready = true;
            Ok(())
        }

        /// Whether the document reports a finished load
        pub fn document_ready(&self) -> EsperarResult<bool> {
            Ok(self.ready)
        }

        /// Delete all cookies
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub fn clear_cookies(&mut self) -> EsperarResult<()> {
            self.cookie_count = 0;
            Ok(())
        }

        /// Whether an element matching the selector is attached
        pub fn exists(&self, selector: &Selector) -> EsperarResult<bool> {
            Ok(self.elements.contains_key(&selector.to_string()))
        }

        /// Whether the element is rendered
        pub fn is_visible(&self, selector: &Selector) -> EsperarResult<bool> {
            Ok(self
                .elements
                .get(&selector.to_string())
                .is_some_and(|el| el.visible))
        }

        /// Whether the element accepts input
        pub fn is_enabled(&self, selector: &Selector) -> EsperarResult<bool> {
            Ok(self
                .elements
                .get(&selector.to_string())
                .is_some_and(|el| el.enabled))
        }

        /// Whether the element is checked
        pub fn is_checked(&self, selector: &Selector) -> EsperarResult<bool> {
            Ok(self
                .elements
                .get(&selector.to_string())
                .is_some_and(|el| el.checked))
        }

        /// Number of elements matching the selector
        pub fn count(&self, selector: &Selector) -> EsperarResult<u64> {
            Ok(u64::from(self.elements.contains_key(&selector.to_string())))
        }

        /// Click the element; toggles checkbox state
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub fn click(&mut self, selector: &Selector) -> EsperarResult<()> {
            let key = selector.to_string();
            let element =
                self.elements
                    .get_mut(&key)
                    .ok_or_else(|| EsperarError::ElementNotFound {
                        selector: key.clone(),
                    })?;
            element.checked = !element.checked;
            self.clicks.push(key);
            Ok(())
        }

        /// Append text to the element's value, as keystrokes would
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub fn send_text(&mut self, selector: &Selector, text: &str) -> EsperarResult<()> {
            let key = selector.to_string();
            let element =
                self.elements
                    .get_mut(&key)
                    .ok_or_else(|| EsperarError::ElementNotFound { selector: key })?;
            element.value.push_str(text);
            Ok(())
        }

        /// Select the option with the given visible text in a drop-down
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub fn select_option(&mut self, selector: &Selector, text: &str) -> EsperarResult<()> {
            let key = selector.to_string();
            let element =
                self.elements
                    .get_mut(&key)
                    .ok_or_else(|| EsperarError::ElementNotFound { selector: key })?;
            element.value = text.to_string();
            Ok(())
        }

        /// Text content of the element
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub fn text_of(&self, selector: &Selector) -> EsperarResult<String> {
            let key = selector.to_string();
            self.elements
                .get(&key)
                .map(|el| el.text.clone())
                .ok_or(EsperarError::ElementNotFound { selector: key })
        }

        /// Text of every `tbody tr` row inside the element
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ElementNotFound`] when nothing matches
        pub fn table_row_texts(&self, selector: &Selector) -> EsperarResult<Vec<String>> {
            let key = selector.to_string();
            self.elements
                .get(&key)
                .map(|el| el.row_texts.clone())
                .ok_or(EsperarError::ElementNotFound { selector: key })
        }

        /// Serialized HTML of the current document
        pub fn page_source(&self) -> EsperarResult<String> {
            Ok(self.source.clone())
        }

        /// Take a screenshot (mock returns canned bytes)
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub fn screenshot(&self) -> EsperarResult<Vec<u8>> {
            Ok(self.screenshot_data.clone())
        }

        /// Close the session
        ///
        /// # Errors
        ///
        /// Never fails in mock mode
        pub fn close(self) -> EsperarResult<()> {
            Ok(())
        }

        // --- mock state hooks, for tests ---

        /// Set the document-ready flag
        pub fn set_ready(&mut self, ready: bool) {
            self.ready = ready;
        }

        /// Insert or replace an element
        pub fn insert_element(&mut self, selector: &Selector, element: MockElement) {
            let _ = self.elements.insert(selector.to_string(), element);
        }

        /// Remove an element
        pub fn remove_element(&mut self, selector: &Selector) {
            let _ = self.elements.remove(&selector.to_string());
        }

        /// Inspect an element
        #[must_use]
        pub fn element(&self, selector: &Selector) -> Option<&MockElement> {
            self.elements.get(&selector.to_string())
        }

        /// Mutate an element
        pub fn element_mut(&mut self, selector: &Selector) -> Option<&mut MockElement> {
            self.elements.get_mut(&selector.to_string())
        }

        /// Set the page source returned by [`Session::page_source`]
        pub fn set_page_source(&mut self, source: impl Into<String>) {
            self.source = source.into();
        }

        /// Set the bytes returned by [`Session::screenshot`]
        pub fn set_screenshot_data(&mut self, data: Vec<u8>) {
            self.screenshot_data = data;
        }

        /// Set the stored cookie count
        pub fn set_cookie_count(&mut self, count: usize) {
            self.cookie_count = count;
        }

        /// Current stored cookie count
        #[must_use]
        pub const fn cookie_count(&self) -> usize {
            self.cookie_count
        }

        /// Selectors clicked so far, in order
        #[must_use]
        pub fn clicks(&self) -> &[String] {
            &self.clicks
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::Session;

#[cfg(not(feature = "browser"))]
pub use mock::{MockElement, Session};

#[cfg(all(test, not(feature = "browser")))]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::launch(SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_launch_rejects_missing_binary_path() {
        let config = SessionConfig::new().with_binary_path("/definitely/not/a/browser");
        let result = Session::launch(config);
        assert!(matches!(result, Err(EsperarError::BrowserNotFound)));
    }

    #[test]
    fn test_connect_requires_endpoint() {
        let result = Session::connect(SessionConfig::default());
        assert!(matches!(result, Err(EsperarError::InvalidArgument { .. })));
    }

    #[test]
    fn test_goto_marks_document_ready() {
        let mut session = session();
        assert!(!session.document_ready().unwrap());
        session.goto("https://example.com").unwrap();
        assert!(session.document_ready().unwrap());
        assert_eq!(session.current_url(), "https://example.com");
    }

    #[test]
    fn test_clear_cookies_resets_count() {
        let mut session = session();
        session.set_cookie_count(4);
        session.clear_cookies().unwrap();
        assert_eq!(session.cookie_count(), 0);
    }

    #[test]
    fn test_element_queries() {
        let mut session = session();
        let selector = Selector::id("save");
        assert!(!session.exists(&selector).unwrap());
        assert!(!session.is_visible(&selector).unwrap());

        session.insert_element(&selector, MockElement::default());
        assert!(session.exists(&selector).unwrap());
        assert!(session.is_visible(&selector).unwrap());
        assert!(session.is_enabled(&selector).unwrap());
        assert_eq!(session.count(&selector).unwrap(), 1);
    }

    #[test]
    fn test_click_missing_element_fails() {
        let mut session = session();
        let result = session.click(&Selector::css("button"));
        assert!(matches!(result, Err(EsperarError::ElementNotFound { .. })));
    }

    #[test]
    fn test_click_records_and_toggles() {
        let mut session = session();
        let selector = Selector::css("input[type='checkbox']");
        session.insert_element(&selector, MockElement::default());
        session.click(&selector).unwrap();
        assert!(session.is_checked(&selector).unwrap());
        assert_eq!(session.clicks().len(), 1);
    }

    #[test]
    fn test_send_text_appends() {
        let mut session = session();
        let selector = Selector::id("user");
        session.insert_element(&selector, MockElement::default());
        session.send_text(&selector, "ad").unwrap();
        session.send_text(&selector, "min").unwrap();
        assert_eq!(session.element(&selector).unwrap().value, "admin");
    }

    #[test]
    fn test_text_of_missing_element_fails() {
        let session = session();
        let result = session.text_of(&Selector::id("missing"));
        assert!(matches!(result, Err(EsperarError::ElementNotFound { .. })));
    }

    #[test]
    fn test_table_rows() {
        let mut session = session();
        let selector = Selector::id("orders");
        session.insert_element(
            &selector,
            MockElement {
                row_texts: vec!["row one".to_string(), "row two".to_string()],
                ..Default::default()
            },
        );
        let rows = session.table_row_texts(&selector).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
