//! Esperar: Rust-Native Helpers for Browser-Driven Tests
//!
//! Esperar (Spanish: "to wait") is a thin helper layer for UI test
//! suites that drive a real browser. It packages the plumbing every
//! suite ends up rewriting:
//!
//! - bounded-retry session startup with an aggregated failure history
//!   ([`acquire`], [`RetryPolicy`])
//! - blocking condition polling with a transient/fatal error split
//!   ([`Waiter`], [`WaitOptions`], [`CancelToken`])
//! - synchronized element interaction ([`Control`], [`Locator`])
//! - composition-based page objects ([`Page`], [`PageObject`])
//! - fixtures that capture failure artifacts and always tear the
//!   session down ([`BrowserFixture`], [`FailureArtifacts`])
//!
//! Element location, clicking and screenshots are delegated to the
//! browser-automation backend; with the `browser` feature enabled the
//! session drives a real Chromium over CDP, without it an in-memory
//! mock with the same surface keeps everything unit-testable.
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Test +     │──►│ Fixture /    │──►│ Session      │
//! │ PageObject │   │ retry + wait │   │ (CDP | mock) │
//! └────────────┘   └──────────────┘   └──────────────┘
//! ```

#![warn(missing_docs)]

mod artifacts;
mod config;
mod element;
mod fixture;
mod locator;
/// Tracing setup for test runs
pub mod logging;
mod page;
mod result;
mod retry;
mod session;
/// Timeout values used during testing
pub mod timeouts;
mod wait;

pub use artifacts::{ArtifactConfig, FailureArtifacts};
pub use config::{BrowserKind, SessionConfig};
pub use element::Control;
pub use fixture::{BrowserFixture, Fixture, TestOutcome};
pub use locator::{Locator, LocatorOptions, Selector};
pub use page::{Page, PageObject};
pub use result::{EsperarError, EsperarResult};
#[cfg(feature = "browser")]
pub use retry::acquire_async;
pub use retry::{acquire, AttemptFailure, RetryPolicy};
pub use session::Session;
#[cfg(not(feature = "browser"))]
pub use session::MockElement;
#[cfg(feature = "browser")]
pub use wait::poll_until_async;
pub use wait::{
    wait_until, CancelToken, PollOutcome, WaitOptions, Waiter, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
