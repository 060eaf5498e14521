//! Error types for the browser layer

use thiserror::Error;

/// Errors raised while opening a session or interacting with page elements.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser session could not be opened at all. The only terminal
    /// failure of a fill run.
    #[error("failed to open browser session: {0}")]
    SessionOpen(String),

    /// An element did not become interactable within its wait bound.
    #[error("timed out waiting for element '{locator}'")]
    Timeout {
        /// The locator that never became interactable.
        locator: String,
    },

    /// A select held no option matching the value or its visible text.
    #[error("no option matching '{value}' in select '{locator}'")]
    NoMatchingOption {
        /// The select's locator.
        locator: String,
        /// The value that matched nothing.
        value: String,
    },

    /// Any other WebDriver-level failure.
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
}
