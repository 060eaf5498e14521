//! Browser session abstraction.
//!
//! [`BrowserSession`] is the seam between the fill loop and the live browser.
//! It exposes exactly the operations the loop needs, so tests can swap in a
//! scripted session and assert on what would have been typed.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BrowserError;

/// What kind of control a locator resolved to, after probing the live page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain text-like `<input>` (text, password, email, tel, number).
    Text,
    /// An `<input type="date">`; written via script so the browser's own
    /// picker widget does not swallow the keystrokes.
    Date,
    /// A `<textarea>`.
    TextArea,
    /// A `<select>` dropdown.
    Select,
    /// Anything else. The fill loop skips these with a warning.
    Unsupported {
        /// Tag name of the element found.
        tag: String,
        /// The `type` attribute, if the element carried one.
        input_type: Option<String>,
    },
}

/// Input types treated as plain text fields.
const TEXT_INPUT_TYPES: &[&str] = &["text", "password", "email", "tel", "number"];

/// Map a probed element's tag and `type` attribute to a [`FieldKind`].
///
/// An `<input>` with no `type` attribute defaults to `text`, per HTML.
pub fn classify(tag: &str, input_type: Option<&str>) -> FieldKind {
    let tag = tag.to_ascii_lowercase();
    match tag.as_str() {
        "textarea" => FieldKind::TextArea,
        "select" => FieldKind::Select,
        "input" => {
            let ty = input_type.unwrap_or("text").to_ascii_lowercase();
            if ty == "date" {
                FieldKind::Date
            } else if TEXT_INPUT_TYPES.contains(&ty.as_str()) {
                FieldKind::Text
            } else {
                FieldKind::Unsupported {
                    tag,
                    input_type: Some(ty),
                }
            }
        }
        _ => FieldKind::Unsupported {
            tag,
            input_type: input_type.map(str::to_owned),
        },
    }
}

/// The operations the fill loop performs against a page.
///
/// Every locator is a CSS selector. Implementations are expected to wait
/// internally up to the given bounds and surface [`BrowserError::Timeout`]
/// when an element never becomes interactable.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to the form's URL.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Wait for the page to be usable. When a locator is given, waits for
    /// that element to be present; otherwise waits for document readiness.
    async fn await_ready(
        &mut self,
        locator: Option<&str>,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// Wait for the element to be visible, then clickable, and report what
    /// kind of control it is.
    async fn probe_field(
        &mut self,
        locator: &str,
        visible: Duration,
        clickable: Duration,
    ) -> Result<FieldKind, BrowserError>;

    /// Clear the element and type the value into it.
    async fn clear_and_type(&mut self, locator: &str, value: &str) -> Result<(), BrowserError>;

    /// Set the element's value through script and fire an `input` event, for
    /// controls that intercept keystrokes.
    async fn set_value_with_event(
        &mut self,
        locator: &str,
        value: &str,
    ) -> Result<(), BrowserError>;

    /// Choose the option whose `value` attribute matches. Returns `false`
    /// when no option matched, without failing the session.
    async fn select_by_value(&mut self, locator: &str, value: &str)
        -> Result<bool, BrowserError>;

    /// Choose the option whose visible text matches.
    async fn select_by_visible_text(
        &mut self,
        locator: &str,
        text: &str,
    ) -> Result<(), BrowserError>;

    /// End the session, releasing any external resources it holds. The
    /// default is a no-op for sessions that hold none.
    async fn close(self) -> Result<(), BrowserError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_input_is_text() {
        assert_eq!(classify("input", None), FieldKind::Text);
        assert_eq!(classify("INPUT", Some("Email")), FieldKind::Text);
    }

    #[test]
    fn test_classify_date_and_structured_controls() {
        assert_eq!(classify("input", Some("date")), FieldKind::Date);
        assert_eq!(classify("textarea", None), FieldKind::TextArea);
        assert_eq!(classify("select", None), FieldKind::Select);
    }

    #[test]
    fn test_classify_rejects_checkbox_and_foreign_tags() {
        assert_eq!(
            classify("input", Some("checkbox")),
            FieldKind::Unsupported {
                tag: "input".to_string(),
                input_type: Some("checkbox".to_string()),
            }
        );
        assert_eq!(
            classify("div", None),
            FieldKind::Unsupported {
                tag: "div".to_string(),
                input_type: None,
            }
        );
    }
}
