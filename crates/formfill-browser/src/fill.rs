//! The fill loop: applies a fill table to a live form, field by field.

use std::time::Duration;

use formfill_domain::{FillTable, FormMapping};
use tracing::{info, warn};

use crate::error::BrowserError;
use crate::session::{BrowserSession, FieldKind};

/// Upper bound on waiting for the page (or its first mapped field) to load.
const PAGE_READY_TIMEOUT: Duration = Duration::from_secs(20);
/// Upper bound on waiting for a field to become visible.
const FIELD_VISIBLE_TIMEOUT: Duration = Duration::from_secs(5);
/// Additional bound on waiting for a visible field to become clickable.
const FIELD_CLICKABLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a mapped field was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The fill table held no value for this locator.
    NoValue,
    /// The element never became visible and clickable within its wait bound.
    Timeout,
    /// The element is a control kind the filler does not write to.
    Unsupported {
        /// Tag name of the element found.
        tag: String,
        /// Its `type` attribute, if any.
        input_type: Option<String>,
    },
    /// A select had no option matching the value or its visible text.
    NoMatchingOption,
    /// Any other per-element failure.
    Failed(String),
}

/// One mapped field the loop skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// The field's CSS locator.
    pub locator: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of one fill pass over a form.
#[derive(Debug, Default)]
pub struct FillReport {
    /// Locators written, in fill order.
    pub filled: Vec<String>,
    /// Mapped fields left untouched.
    pub skipped: Vec<SkippedField>,
}

impl FillReport {
    fn skip(&mut self, locator: &str, reason: SkipReason) {
        self.skipped.push(SkippedField {
            locator: locator.to_string(),
            reason,
        });
    }
}

/// Navigate to the form and write every fill-table value into its element.
///
/// Per-field problems are recorded in the report and never abort the pass;
/// only failing to reach the page at all is fatal. The form is never
/// submitted and the session is left open when this returns.
pub async fn fill_form<S: BrowserSession>(
    session: &mut S,
    mapping: &FormMapping,
    fill: &FillTable,
) -> Result<FillReport, BrowserError> {
    session.navigate(mapping.url()).await?;

    if let Err(err) = session
        .await_ready(mapping.first_locator(), PAGE_READY_TIMEOUT)
        .await
    {
        // The first field may still appear late; each field gets its own
        // wait below.
        warn!(url = mapping.url(), %err, "page did not signal ready, continuing");
    }

    let mut report = FillReport::default();
    for locator in mapping.fields().keys() {
        let value = match fill.get(locator) {
            Some(v) if !v.is_empty() => v,
            _ => {
                report.skip(locator, SkipReason::NoValue);
                continue;
            }
        };
        match fill_one(session, locator, value).await {
            Ok(()) => {
                info!(locator, "filled form field");
                report.filled.push(locator.clone());
            }
            Err(err) => {
                let reason = match err {
                    FieldError::Timeout => SkipReason::Timeout,
                    FieldError::Unsupported { tag, input_type } => {
                        SkipReason::Unsupported { tag, input_type }
                    }
                    FieldError::NoMatchingOption => SkipReason::NoMatchingOption,
                    FieldError::Other(msg) => SkipReason::Failed(msg),
                };
                warn!(locator, ?reason, "skipping form field");
                report.skip(locator, reason);
            }
        }
    }

    info!(
        filled = report.filled.len(),
        skipped = report.skipped.len(),
        "fill pass complete"
    );
    Ok(report)
}

enum FieldError {
    Timeout,
    Unsupported {
        tag: String,
        input_type: Option<String>,
    },
    NoMatchingOption,
    Other(String),
}

impl From<BrowserError> for FieldError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::Timeout { .. } => FieldError::Timeout,
            BrowserError::NoMatchingOption { .. } => FieldError::NoMatchingOption,
            other => FieldError::Other(other.to_string()),
        }
    }
}

async fn fill_one<S: BrowserSession>(
    session: &mut S,
    locator: &str,
    value: &str,
) -> Result<(), FieldError> {
    let kind = session
        .probe_field(locator, FIELD_VISIBLE_TIMEOUT, FIELD_CLICKABLE_TIMEOUT)
        .await?;
    match kind {
        FieldKind::Text | FieldKind::TextArea => {
            session.clear_and_type(locator, value).await?;
        }
        // Typing into a date input fights the browser's picker widget.
        FieldKind::Date => {
            session.set_value_with_event(locator, value).await?;
        }
        FieldKind::Select => {
            if !session.select_by_value(locator, value).await? {
                session.select_by_visible_text(locator, value).await?;
            }
        }
        FieldKind::Unsupported { tag, input_type } => {
            return Err(FieldError::Unsupported { tag, input_type });
        }
    }
    Ok(())
}
