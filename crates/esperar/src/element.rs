//! Synchronized element interaction.
//!
//! Common tasks are processed the same way everywhere: wait for the
//! control to be actionable, perform the action, then let the page
//! settle. A [`Control`] pairs a [`Locator`] with those synchronization
//! steps; the actual DOM work is delegated to the session.

use crate::locator::{Locator, Selector};
use crate::result::{EsperarError, EsperarResult};
use crate::session::Session;
use crate::timeouts;
use crate::wait::WaitOptions;
use tracing::debug;

/// A page control addressed by a locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    locator: Locator,
}

impl Control {
    /// Create a control from a locator
    #[must_use]
    pub fn new(locator: Locator) -> Self {
        Self { locator }
    }

    /// Create a control from a bare selector with default wait options
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
        }
    }

    /// The locator this control resolves through
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    fn wait_options(&self) -> WaitOptions {
        let options = self.locator.options();
        WaitOptions::new()
            .with_timeout(options.timeout.as_millis() as u64)
            .with_poll_interval(options.poll_interval.as_millis() as u64)
    }

    fn ready_options() -> WaitOptions {
        WaitOptions::new().with_timeout(timeouts::DEFAULT_TIMEOUT_MS)
    }
}

#[cfg(not(feature = "browser"))]
mod sync_impl {
    use super::*;
    use crate::wait::Waiter;

    impl Control {
        /// Wait for the element to become visible.
        ///
        /// Returns whether it became visible within the locator's
        /// timeout; an absent element is simply "not visible yet".
        ///
        /// # Errors
        ///
        /// Propagates fatal session errors.
        pub fn wait_visible(&self, session: &Session) -> EsperarResult<bool> {
            let selector = self.locator.selector();
            let outcome = Waiter::new()
                .poll_until(|| session.is_visible(selector), &self.wait_options())?;
            Ok(outcome.satisfied)
        }

        /// Wait for the element to be clickable (visible and enabled).
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::Timeout`] when the element does not
        /// become clickable in time.
        pub fn wait_clickable(&self, session: &Session) -> EsperarResult<()> {
            let selector = self.locator.selector();
            let options = self.wait_options();
            let outcome = Waiter::new().poll_until(
                || Ok(session.is_visible(selector)? && session.is_enabled(selector)?),
                &options,
            )?;
            if outcome.satisfied {
                Ok(())
            } else {
                debug!(%selector, "element never became clickable");
                Err(EsperarError::Timeout {
                    ms: options.timeout_ms,
                })
            }
        }

        fn wait_document_ready(session: &Session) -> EsperarResult<()> {
            let options = Self::ready_options();
            let outcome = Waiter::new().poll_until(|| session.document_ready(), &options)?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::Timeout {
                    ms: options.timeout_ms,
                })
            }
        }

        /// Click the element once it is clickable, then wait for the
        /// page to settle.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable, or
        /// the underlying session error.
        pub fn click(&self, session: &mut Session) -> EsperarResult<()> {
            self.wait_clickable(session)?;
            session.click(self.locator.selector())?;
            Self::wait_document_ready(session)
        }

        /// Type text into the element once it is clickable.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn enter_text(&self, session: &mut Session, value: &str) -> EsperarResult<()> {
            self.wait_clickable(session)?;
            session.send_text(self.locator.selector(), value)
        }

        /// Select the drop-down option with the given visible text.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn select_drop_down(&self, session: &mut Session, value: &str) -> EsperarResult<()> {
            self.wait_clickable(session)?;
            session.select_option(self.locator.selector(), value)
        }

        /// Check the checkbox if it is not already checked.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn select_check_box(&self, session: &mut Session) -> EsperarResult<()> {
            self.wait_clickable(session)?;
            if !session.is_checked(self.locator.selector())? {
                session.click(self.locator.selector())?;
            }
            Ok(())
        }

        /// Uncheck the checkbox if it is currently checked.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn unselect_check_box(&self, session: &mut Session) -> EsperarResult<()> {
            self.wait_clickable(session)?;
            if session.is_checked(self.locator.selector())? {
                session.click(self.locator.selector())?;
            }
            Ok(())
        }

        /// Text content of the element, after the usual settling waits.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn text(&self, session: &Session) -> EsperarResult<String> {
            self.wait_clickable(session)?;
            let _ = self.wait_visible(session)?;
            Self::wait_document_ready(session)?;
            session.text_of(self.locator.selector())
        }

        /// Wait for the element to show, then return its text. Used for
        /// validation messages that appear asynchronously.
        ///
        /// # Errors
        ///
        /// Propagates fatal session errors.
        pub fn text_when_shown(&self, session: &Session) -> EsperarResult<String> {
            let _ = self.wait_visible(session)?;
            session.text_of(self.locator.selector())
        }

        /// Texts of the `tbody tr` rows of a table element.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub fn table_rows(&self, session: &Session) -> EsperarResult<Vec<String>> {
            self.wait_clickable(session)?;
            let _ = self.wait_visible(session)?;
            Self::wait_document_ready(session)?;
            session.table_row_texts(self.locator.selector())
        }
    }
}

#[cfg(feature = "browser")]
mod async_impl {
    use super::*;
    use crate::wait::poll_until_async;

    impl Control {
        /// Wait for the element to become visible.
        ///
        /// # Errors
        ///
        /// Propagates fatal session errors.
        pub async fn wait_visible(&self, session: &Session) -> EsperarResult<bool> {
            let selector = self.locator.selector();
            let outcome =
                poll_until_async(|| session.is_visible(selector), &self.wait_options()).await?;
            Ok(outcome.satisfied)
        }

        /// Wait for the element to be clickable (visible and enabled).
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::Timeout`] when the element does not
        /// become clickable in time.
        pub async fn wait_clickable(&self, session: &Session) -> EsperarResult<()> {
            let selector = self.locator.selector();
            let options = self.wait_options();
            let outcome = poll_until_async(
                || async move {
                    Ok(session.is_visible(selector).await?
                        && session.is_enabled(selector).await?)
                },
                &options,
            )
            .await?;
            if outcome.satisfied {
                Ok(())
            } else {
                debug!(%selector, "element never became clickable");
                Err(EsperarError::Timeout {
                    ms: options.timeout_ms,
                })
            }
        }

        async fn wait_document_ready(session: &Session) -> EsperarResult<()> {
            let options = Self::ready_options();
            let outcome = poll_until_async(|| session.document_ready(), &options).await?;
            if outcome.satisfied {
                Ok(())
            } else {
                Err(EsperarError::Timeout {
                    ms: options.timeout_ms,
                })
            }
        }

        /// Click the element once it is clickable, then wait for the
        /// page to settle.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable, or
        /// the underlying session error.
        pub async fn click(&self, session: &Session) -> EsperarResult<()> {
            self.wait_clickable(session).await?;
            session.click(self.locator.selector()).await?;
            Self::wait_document_ready(session).await
        }

        /// Type text into the element once it is clickable.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn enter_text(&self, session: &Session, value: &str) -> EsperarResult<()> {
            self.wait_clickable(session).await?;
            session.send_text(self.locator.selector(), value).await
        }

        /// Select the drop-down option with the given visible text.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn select_drop_down(
            &self,
            session: &Session,
            value: &str,
        ) -> EsperarResult<()> {
            self.wait_clickable(session).await?;
            session.select_option(self.locator.selector(), value).await
        }

        /// Check the checkbox if it is not already checked.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn select_check_box(&self, session: &Session) -> EsperarResult<()> {
            self.wait_clickable(session).await?;
            if !session.is_checked(self.locator.selector()).await? {
                session.click(self.locator.selector()).await?;
            }
            Ok(())
        }

        /// Uncheck the checkbox if it is currently checked.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn unselect_check_box(&self, session: &Session) -> EsperarResult<()> {
            self.wait_clickable(session).await?;
            if session.is_checked(self.locator.selector()).await? {
                session.click(self.locator.selector()).await?;
            }
            Ok(())
        }

        /// Text content of the element, after the usual settling waits.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn text(&self, session: &Session) -> EsperarResult<String> {
            self.wait_clickable(session).await?;
            let _ = self.wait_visible(session).await?;
            Self::wait_document_ready(session).await?;
            session.text_of(self.locator.selector()).await
        }

        /// Wait for the element to show, then return its text.
        ///
        /// # Errors
        ///
        /// Propagates fatal session errors.
        pub async fn text_when_shown(&self, session: &Session) -> EsperarResult<String> {
            let _ = self.wait_visible(session).await?;
            session.text_of(self.locator.selector()).await
        }

        /// Texts of the `tbody tr` rows of a table element.
        ///
        /// # Errors
        ///
        /// Returns a timeout if the element never becomes clickable.
        pub async fn table_rows(&self, session: &Session) -> EsperarResult<Vec<String>> {
            self.wait_clickable(session).await?;
            let _ = self.wait_visible(session).await?;
            Self::wait_document_ready(session).await?;
            session.table_row_texts(self.locator.selector()).await
        }
    }
}

#[cfg(all(test, not(feature = "browser")))]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::session::MockElement;
    use std::time::Duration;

    fn fast(selector: Selector) -> Control {
        Control::new(
            Locator::from_selector(selector)
                .with_timeout(Duration::from_millis(100))
                .with_poll_interval(Duration::from_millis(10)),
        )
    }

    fn ready_session() -> Session {
        let mut session = Session::launch(SessionConfig::default()).unwrap();
        session.set_ready(true);
        session
    }

    mod wait_tests {
        use super::*;

        #[test]
        fn test_wait_visible_reports_absent_element_as_false() {
            let session = ready_session();
            let control = fast(Selector::id("ghost"));
            assert!(!control.wait_visible(&session).unwrap());
        }

        #[test]
        fn test_wait_clickable_times_out_for_disabled_element() {
            let mut session = ready_session();
            let selector = Selector::id("save");
            session.insert_element(
                &selector,
                MockElement {
                    enabled: false,
                    ..Default::default()
                },
            );
            let control = fast(selector);
            let result = control.wait_clickable(&session);
            assert!(matches!(result, Err(EsperarError::Timeout { .. })));
        }

        #[test]
        fn test_wait_clickable_succeeds_for_enabled_visible_element() {
            let mut session = ready_session();
            let selector = Selector::id("save");
            session.insert_element(&selector, MockElement::default());
            let control = fast(selector);
            assert!(control.wait_clickable(&session).is_ok());
        }
    }

    mod interaction_tests {
        use super::*;

        #[test]
        fn test_click_waits_then_clicks_then_settles() {
            let mut session = ready_session();
            let selector = Selector::css("button.submit");
            session.insert_element(&selector, MockElement::default());
            let control = fast(selector);
            control.click(&mut session).unwrap();
            assert_eq!(session.clicks().len(), 1);
        }

        #[test]
        fn test_click_on_absent_element_times_out() {
            let mut session = ready_session();
            let control = fast(Selector::css("button.submit"));
            let result = control.click(&mut session);
            assert!(matches!(result, Err(EsperarError::Timeout { .. })));
            assert!(session.clicks().is_empty());
        }

        #[test]
        fn test_enter_text_appends_keystrokes() {
            let mut session = ready_session();
            let selector = Selector::id("user");
            session.insert_element(&selector, MockElement::default());
            let control = fast(selector.clone());
            control.enter_text(&mut session, "admin").unwrap();
            assert_eq!(session.element(&selector).unwrap().value, "admin");
        }

        #[test]
        fn test_select_drop_down_sets_value() {
            let mut session = ready_session();
            let selector = Selector::id("country");
            session.insert_element(&selector, MockElement::default());
            let control = fast(selector.clone());
            control.select_drop_down(&mut session, "United Kingdom").unwrap();
            assert_eq!(
                session.element(&selector).unwrap().value,
                "United Kingdom"
            );
        }

        #[test]
        fn test_select_check_box_is_idempotent() {
            let mut session = ready_session();
            let selector = Selector::id("accept");
            session.insert_element(&selector, MockElement::default());
            let control = fast(selector.clone());

            control.select_check_box(&mut session).unwrap();
            assert!(session.element(&selector).unwrap().checked);

            // Already checked: no second click
            control.select_check_box(&mut session).unwrap();
            assert!(session.element(&selector).unwrap().checked);
            assert_eq!(session.clicks().len(), 1);
        }

        #[test]
        fn test_unselect_check_box_only_clicks_when_checked() {
            let mut session = ready_session();
            let selector = Selector::id("accept");
            session.insert_element(
                &selector,
                MockElement {
                    checked: true,
                    ..Default::default()
                },
            );
            let control = fast(selector.clone());

            control.unselect_check_box(&mut session).unwrap();
            assert!(!session.element(&selector).unwrap().checked);

            control.unselect_check_box(&mut session).unwrap();
            assert_eq!(session.clicks().len(), 1);
        }
    }

    mod read_tests {
        use super::*;

        #[test]
        fn test_text_returns_content() {
            let mut session = ready_session();
            let selector = Selector::css("h1");
            session.insert_element(
                &selector,
                MockElement {
                    text: "Welcome".to_string(),
                    ..Default::default()
                },
            );
            let control = fast(selector);
            assert_eq!(control.text(&session).unwrap(), "Welcome");
        }

        #[test]
        fn test_text_when_shown_waits_for_visibility() {
            let mut session = ready_session();
            let selector = Selector::css(".validation");
            session.insert_element(
                &selector,
                MockElement {
                    text: "Required field".to_string(),
                    ..Default::default()
                },
            );
            let control = fast(selector);
            assert_eq!(
                control.text_when_shown(&session).unwrap(),
                "Required field"
            );
        }

        #[test]
        fn test_table_rows_returns_row_texts() {
            let mut session = ready_session();
            let selector = Selector::id("orders");
            session.insert_element(
                &selector,
                MockElement {
                    row_texts: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    ..Default::default()
                },
            );
            let control = fast(selector);
            assert_eq!(control.table_rows(&session).unwrap().len(), 3);
        }
    }
}
