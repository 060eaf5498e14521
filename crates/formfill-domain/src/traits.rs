//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline logic and the
//! external backends. Infrastructure implementations live in other crates.

use crate::pages::PageRange;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Trait for turning a scanned document into plain text.
///
/// Implemented by the infrastructure layer (formfill-ocr).
///
/// Backend failures degrade to an empty string at this boundary: an empty
/// return means "insufficient data" and callers skip the document. Only the
/// absence of the OCR executables is surfaced as an error, and only through
/// the implementation's own startup probe.
pub trait TextRecognizer: Send + Sync {
    /// Extract text from the given document, optionally restricted to a page
    /// range. Pages are concatenated with `[--- Page N ---]` markers in page
    /// order. Returns an empty string when nothing usable could be read.
    fn extract_text(&self, document: &Path, pages: Option<PageRange>) -> String;
}

/// Errors reported by a generative backend call.
///
/// Every variant is treated as transient by the retry driver; classification
/// only affects logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend refused to answer (safety filter or similar).
    #[error("response blocked by backend: {reason}")]
    Blocked {
        /// Backend-reported block reason, or "unspecified".
        reason: String,
    },

    /// The backend answered with no usable text.
    #[error("backend returned an empty response")]
    Empty,

    /// Network or HTTP-level failure.
    #[error("backend communication failed: {0}")]
    Transport(String),

    /// The response envelope could not be decoded.
    #[error("unusable backend response: {0}")]
    Invalid(String),
}

/// Trait for generative model calls.
///
/// Implemented by the infrastructure layer (formfill-llm). One prompt in, raw
/// response text out; retry policy and response parsing are the caller's
/// concern.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Send a prompt and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}
