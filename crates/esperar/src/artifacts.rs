//! Failure artifacts.
//!
//! When a test fails the fixture writes the page source and a screenshot
//! into a per-day directory so the failure can be inspected after the
//! session is gone.

use crate::result::EsperarResult;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Where failure artifacts are written
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    /// Root directory; a `yyyymmdd` subdirectory is created per day
    pub root_dir: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("screenshot_results"),
        }
    }
}

impl ArtifactConfig {
    /// Create a config with the default root directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root directory
    #[must_use]
    pub fn with_root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root_dir = dir.into();
        self
    }
}

// Test names land in file names; anything unsafe becomes '_'.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Paths of the artifacts written for one failure
#[derive(Debug, Clone, Default)]
pub struct FailureArtifacts {
    /// Page source HTML, if written
    pub page_source: Option<PathBuf>,
    /// Screenshot PNG, if written
    pub screenshot: Option<PathBuf>,
}

#[cfg(not(feature = "browser"))]
mod sync_impl {
    use super::*;
    use crate::session::Session;

    impl FailureArtifacts {
        /// Capture the page source and a screenshot for a failed test.
        ///
        /// Files are written to `<root>/<yyyymmdd>/` with an
        /// `error_<test>_<timestamp>` stem. A screenshot backend that
        /// returns no bytes simply produces no PNG file.
        ///
        /// # Errors
        ///
        /// Returns session errors from reading the page, or I/O errors
        /// from writing the files.
        pub fn capture(
            session: &Session,
            config: &ArtifactConfig,
            test_name: &str,
        ) -> EsperarResult<Self> {
            let now = Local::now();
            let dir = config.root_dir.join(now.format("%Y%m%d").to_string());
            fs::create_dir_all(&dir)?;
            let stem = format!(
                "error_{}_{}",
                sanitize(test_name),
                now.format("%Y%m%d_%H%M%S")
            );

            let source_path = dir.join(format!("{stem}_source.html"));
            fs::write(&source_path, session.page_source()?)?;
            info!(path = %source_path.display(), "page source written");

            let image = session.screenshot()?;
            let mut screenshot = None;
            if !image.is_empty() {
                let path = dir.join(format!("{stem}_screenshot.png"));
                fs::write(&path, &image)?;
                info!(path = %path.display(), "screenshot written");
                screenshot = Some(path);
            }

            Ok(Self {
                page_source: Some(source_path),
                screenshot,
            })
        }
    }
}

#[cfg(feature = "browser")]
mod async_impl {
    use super::*;
    use crate::session::Session;

    impl FailureArtifacts {
        /// Capture the page source and a screenshot for a failed test.
        ///
        /// Files are written to `<root>/<yyyymmdd>/` with an
        /// `error_<test>_<timestamp>` stem.
        ///
        /// # Errors
        ///
        /// Returns session errors from reading the page, or I/O errors
        /// from writing the files.
        pub async fn capture(
            session: &Session,
            config: &ArtifactConfig,
            test_name: &str,
        ) -> EsperarResult<Self> {
            let now = Local::now();
            let dir = config.root_dir.join(now.format("%Y%m%d").to_string());
            fs::create_dir_all(&dir)?;
            let stem = format!(
                "error_{}_{}",
                sanitize(test_name),
                now.format("%Y%m%d_%H%M%S")
            );

            let source_path = dir.join(format!("{stem}_source.html"));
            fs::write(&source_path, session.page_source().await?)?;
            info!(path = %source_path.display(), "page source written");

            let image = session.screenshot().await?;
            let mut screenshot = None;
            if !image.is_empty() {
                let path = dir.join(format!("{stem}_screenshot.png"));
                fs::write(&path, &image)?;
                info!(path = %path.display(), "screenshot written");
                screenshot = Some(path);
            }

            Ok(Self {
                page_source: Some(source_path),
                screenshot,
            })
        }
    }
}

#[cfg(all(test, not(feature = "browser")))]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::session::Session;

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize("Suite.login_test (chrome)"), "Suite_login_test__chrome_");
        assert_eq!(sanitize("plain-name_1"), "plain-name_1");
    }

    #[test]
    fn test_capture_writes_source_and_screenshot() {
        let temp = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new().with_root_dir(temp.path());
        let mut session = Session::launch(SessionConfig::default()).unwrap();
        session.set_page_source("<html><body>broken</body></html>");

        let artifacts = FailureArtifacts::capture(&session, &config, "login test").unwrap();

        let source = artifacts.page_source.unwrap();
        assert!(source.exists());
        let written = fs::read_to_string(&source).unwrap();
        assert!(written.contains("broken"));
        let name = source.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("error_login_test_"));
        assert!(name.ends_with("_source.html"));

        let screenshot = artifacts.screenshot.unwrap();
        assert!(screenshot.exists());

        // Both live in a per-day directory under the root
        assert_eq!(
            source.parent().unwrap().parent().unwrap(),
            temp.path()
        );
    }

    #[test]
    fn test_capture_skips_png_when_backend_returns_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::new().with_root_dir(temp.path());
        let mut session = Session::launch(SessionConfig::default()).unwrap();
        session.set_screenshot_data(Vec::new());

        let artifacts = FailureArtifacts::capture(&session, &config, "t").unwrap();
        assert!(artifacts.page_source.is_some());
        assert!(artifacts.screenshot.is_none());
    }
}
