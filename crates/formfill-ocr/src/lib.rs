//! formfill OCR Layer
//!
//! Converts scanned documents into plain text by shelling out to the poppler
//! `pdftoppm` rasterizer and the `tesseract` recognizer, one page at a time.
//!
//! # Behavior
//!
//! - Pages render at a fixed 300 DPI and are recognized individually.
//! - Page texts are concatenated with `[--- Page N ---]` markers in page order.
//! - All backend failures degrade to an empty string with a logged cause;
//!   nothing propagates past [`TextRecognizer::extract_text`].
//! - Missing executables are detected by [`TesseractOcr::ensure_available`],
//!   which callers run once at startup and treat as fatal.
//!
//! [`TextRecognizer::extract_text`]: formfill_domain::TextRecognizer::extract_text

#![warn(missing_docs)]

pub mod error;
mod tesseract;

pub use error::OcrError;
pub use tesseract::TesseractOcr;
