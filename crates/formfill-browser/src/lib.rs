//! formfill Browser Layer
//!
//! Drives a live browser through WebDriver to write the fill table into the
//! target form. The fill loop is generic over the [`BrowserSession`] trait so
//! it can run against a scripted mock in tests; `WebDriverSession` is the real
//! implementation on top of thirtyfour.
//!
//! The filler never submits the form: the session is handed back to the
//! caller still open, as an explicit suspension point for manual review.

#![warn(missing_docs)]

pub mod error;
pub mod fill;
pub mod session;
pub mod webdriver;

pub use error::BrowserError;
pub use fill::{fill_form, FillReport, SkipReason, SkippedField};
pub use session::{BrowserSession, FieldKind};
pub use webdriver::WebDriverSession;
