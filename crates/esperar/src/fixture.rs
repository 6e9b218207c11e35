//! Test fixture bootstrap and teardown.
//!
//! [`BrowserFixture`] owns the session for one test: it acquires a
//! browser through the bounded retry loop (local launch or remote
//! connect, per config), runs the retried prepare phase (cookie clearing
//! and the first navigation), and on teardown captures failure artifacts
//! before the session is closed. The session is always closed, whatever
//! the test outcome.

use crate::artifacts::{ArtifactConfig, FailureArtifacts};
use crate::config::SessionConfig;
use crate::result::{EsperarError, EsperarResult};
use crate::session::Session;
use crate::timeouts;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of the test a fixture served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// The test passed; no artifacts are captured
    Passed,
    /// The test failed; artifacts are captured before teardown
    Failed,
}

/// Trait for test fixtures that can be set up and torn down
pub trait Fixture {
    /// Set up the fixture before test execution.
    ///
    /// # Errors
    ///
    /// Returns an error if fixture setup fails.
    fn setup(&mut self) -> EsperarResult<()>;

    /// Tear down the fixture after test execution.
    ///
    /// # Errors
    ///
    /// Returns an error if fixture teardown fails.
    fn teardown(&mut self) -> EsperarResult<()>;

    /// Fixture name for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

// Cosmetic failures during artifact capture must not abort teardown.
// The whitelist is explicit: only screenshot and file-write failures
// qualify.
fn is_cosmetic(err: &EsperarError) -> bool {
    matches!(err, EsperarError::Screenshot { .. } | EsperarError::Io(_))
}

/// Browser-session fixture for a single test
#[derive(Debug)]
pub struct BrowserFixture {
    config: SessionConfig,
    artifacts: ArtifactConfig,
    base_url: String,
    run_id: Uuid,
    session: Option<Session>,
}

impl BrowserFixture {
    /// Create a fixture that will open `base_url` on setup
    #[must_use]
    pub fn new(config: SessionConfig, base_url: impl Into<String>) -> Self {
        Self {
            config,
            artifacts: ArtifactConfig::default(),
            base_url: base_url.into(),
            run_id: Uuid::new_v4(),
            session: None,
        }
    }

    /// Set where failure artifacts are written
    #[must_use]
    pub fn with_artifact_config(mut self, artifacts: ArtifactConfig) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Unique id of this fixture run
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The active session, if setup has run
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Mutable access to the active session
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Take ownership of the active session
    pub fn take_session(&mut self) -> Option<Session> {
        self.session.take()
    }
}

#[cfg(not(feature = "browser"))]
mod sync_impl {
    use super::*;
    use crate::retry;

    impl BrowserFixture {
        /// Acquire a session and navigate to the base URL.
        ///
        /// Both the startup and the prepare phase run under the bounded
        /// retry loop, three attempts each.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ExhaustedRetries`] when either phase
        /// fails on every attempt.
        pub fn setup(&mut self) -> EsperarResult<()> {
            let config = self.config.clone();
            info!(run_id = %self.run_id, browser = %config.browser, "starting browser session");

            let mut session = retry::acquire(timeouts::SESSION_STARTUP_ATTEMPTS, || {
                if config.is_remote() {
                    Session::connect(config.clone())
                } else {
                    Session::launch(config.clone())
                }
            })?;

            let base_url = self.base_url.clone();
            retry::acquire(timeouts::SESSION_STARTUP_ATTEMPTS, || {
                Self::prepare(&mut session, &config, &base_url)
            })?;

            self.session = Some(session);
            Ok(())
        }

        // The prepare phase mirrors startup: it is retried as a unit.
        fn prepare(
            session: &mut Session,
            config: &SessionConfig,
            base_url: &str,
        ) -> EsperarResult<()> {
            if config.clear_cookies {
                session.clear_cookies()?;
            }
            session.goto(base_url)?;
            Ok(())
        }

        /// Capture artifacts on failure, then close the session.
        ///
        /// Cosmetic artifact failures (screenshot capture, file writes)
        /// are logged and swallowed; any other capture error is
        /// surfaced, but the session is closed first either way.
        ///
        /// # Errors
        ///
        /// Returns non-cosmetic artifact errors or a close failure.
        pub fn finish(&mut self, outcome: TestOutcome, test_name: &str) -> EsperarResult<()> {
            let Some(session) = self.session.take() else {
                return Ok(());
            };

            let mut capture_error = None;
            if outcome == TestOutcome::Failed {
                match FailureArtifacts::capture(&session, &self.artifacts, test_name) {
                    Ok(artifacts) => {
                        info!(run_id = %self.run_id, ?artifacts, "failure artifacts captured");
                    }
                    Err(err) if is_cosmetic(&err) => {
                        warn!(run_id = %self.run_id, error = %err, "failure artifacts skipped");
                    }
                    Err(err) => capture_error = Some(err),
                }
            }

            session.close()?;
            match capture_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl Fixture for BrowserFixture {
        fn setup(&mut self) -> EsperarResult<()> {
            BrowserFixture::setup(self)
        }

        fn teardown(&mut self) -> EsperarResult<()> {
            if let Some(session) = self.session.take() {
                session.close().map_err(|e| EsperarError::Fixture {
                    message: format!("session close failed during teardown: {e}"),
                })?;
            }
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
mod async_impl {
    use super::*;
    use crate::retry;

    impl BrowserFixture {
        /// Acquire a session and navigate to the base URL.
        ///
        /// Both the startup and the prepare phase run under the bounded
        /// retry loop, three attempts each.
        ///
        /// # Errors
        ///
        /// Returns [`EsperarError::ExhaustedRetries`] when either phase
        /// fails on every attempt.
        pub async fn setup(&mut self) -> EsperarResult<()> {
            let config = self.config.clone();
            info!(run_id = %self.run_id, browser = %config.browser, "starting browser session");

            let session = retry::acquire_async(timeouts::SESSION_STARTUP_ATTEMPTS, || {
                let config = config.clone();
                async move {
                    if config.is_remote() {
                        Session::connect(config).await
                    } else {
                        Session::launch(config).await
                    }
                }
            })
            .await?;

            let base_url = self.base_url.clone();
            retry::acquire_async(timeouts::SESSION_STARTUP_ATTEMPTS, || {
                Self::prepare(&session, &config, &base_url)
            })
            .await?;

            self.session = Some(session);
            Ok(())
        }

        // The prepare phase mirrors startup: it is retried as a unit.
        async fn prepare(
            session: &Session,
            config: &SessionConfig,
            base_url: &str,
        ) -> EsperarResult<()> {
            if config.clear_cookies {
                session.clear_cookies().await?;
            }
            session.goto(base_url).await?;
            Ok(())
        }

        /// Capture artifacts on failure, then close the session.
        ///
        /// Cosmetic artifact failures (screenshot capture, file writes)
        /// are logged and swallowed; any other capture error is
        /// surfaced, but the session is closed first either way.
        ///
        /// # Errors
        ///
        /// Returns non-cosmetic artifact errors or a close failure.
        pub async fn finish(
            &mut self,
            outcome: TestOutcome,
            test_name: &str,
        ) -> EsperarResult<()> {
            let Some(session) = self.session.take() else {
                return Ok(());
            };

            let mut capture_error = None;
            if outcome == TestOutcome::Failed {
                match FailureArtifacts::capture(&session, &self.artifacts, test_name).await {
                    Ok(artifacts) => {
                        info!(run_id = %self.run_id, ?artifacts, "failure artifacts captured");
                    }
                    Err(err) if is_cosmetic(&err) => {
                        warn!(run_id = %self.run_id, error = %err, "failure artifacts skipped");
                    }
                    Err(err) => capture_error = Some(err),
                }
            }

            session.close().await?;
            match capture_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}

#[cfg(all(test, not(feature = "browser")))]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::BrowserKind;

    fn fixture_with(temp: &tempfile::TempDir) -> BrowserFixture {
        BrowserFixture::new(SessionConfig::default(), "https://example.com/login")
            .with_artifact_config(ArtifactConfig::new().with_root_dir(temp.path()))
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_outcome_equality() {
            assert_eq!(TestOutcome::Passed, TestOutcome::Passed);
            assert_ne!(TestOutcome::Passed, TestOutcome::Failed);
        }
    }

    mod setup_tests {
        use super::*;

        #[test]
        fn test_setup_navigates_to_base_url() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            fixture.setup().unwrap();

            let session = fixture.session().unwrap();
            assert_eq!(session.current_url(), "https://example.com/login");
            assert!(session.document_ready().unwrap());
        }

        #[test]
        fn test_setup_clears_cookies_when_flagged() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            fixture.setup().unwrap();
            assert_eq!(fixture.session().unwrap().cookie_count(), 0);
        }

        #[test]
        fn test_setup_exhausts_retries_for_missing_binary() {
            let config = SessionConfig::new()
                .with_browser(BrowserKind::Chrome)
                .with_binary_path("/definitely/not/a/browser");
            let mut fixture = BrowserFixture::new(config, "https://example.com");
            let result = fixture.setup();

            match result {
                Err(EsperarError::ExhaustedRetries { attempts, history }) => {
                    assert_eq!(attempts, timeouts::SESSION_STARTUP_ATTEMPTS);
                    assert!(history.contains("attempt 1:"));
                    assert!(history.contains("attempt 3:"));
                }
                other => panic!("expected ExhaustedRetries, got {other:?}"),
            }
            assert!(fixture.session().is_none());
        }

        #[test]
        fn test_setup_uses_remote_connect_when_endpoint_set() {
            let config = SessionConfig::new().with_remote_endpoint("ws://grid:9222");
            let mut fixture = BrowserFixture::new(config, "https://example.com");
            fixture.setup().unwrap();
            assert!(fixture.session().unwrap().config().is_remote());
        }
    }

    mod finish_tests {
        use super::*;

        #[test]
        fn test_finish_on_pass_writes_no_artifacts() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            fixture.setup().unwrap();
            fixture.finish(TestOutcome::Passed, "login_works").unwrap();

            assert!(fixture.session().is_none());
            let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
            assert!(entries.is_empty());
        }

        #[test]
        fn test_finish_on_failure_captures_artifacts_and_closes() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            fixture.setup().unwrap();
            fixture
                .session_mut()
                .unwrap()
                .set_page_source("<html><body>failure state</body></html>");

            fixture.finish(TestOutcome::Failed, "login_fails").unwrap();
            assert!(fixture.session().is_none());

            // One per-day directory containing the source and screenshot
            let day_dir = std::fs::read_dir(temp.path())
                .unwrap()
                .next()
                .unwrap()
                .unwrap()
                .path();
            let names: Vec<String> = std::fs::read_dir(&day_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            assert!(names.iter().any(|n| n.ends_with("_source.html")));
            assert!(names.iter().any(|n| n.ends_with("_screenshot.png")));
            assert!(names.iter().all(|n| n.starts_with("error_login_fails_")));
        }

        #[test]
        fn test_finish_without_setup_is_a_no_op() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            assert!(fixture.finish(TestOutcome::Failed, "never_started").is_ok());
        }
    }

    mod fixture_trait_tests {
        use super::*;

        #[test]
        fn test_trait_setup_and_teardown() {
            let temp = tempfile::tempdir().unwrap();
            let mut fixture = fixture_with(&temp);
            Fixture::setup(&mut fixture).unwrap();
            assert!(fixture.session().is_some());
            Fixture::teardown(&mut fixture).unwrap();
            assert!(fixture.session().is_none());
        }

        #[test]
        fn test_default_name_mentions_type() {
            let temp = tempfile::tempdir().unwrap();
            let fixture = fixture_with(&temp);
            assert!(fixture.name().contains("BrowserFixture"));
        }
    }
}
