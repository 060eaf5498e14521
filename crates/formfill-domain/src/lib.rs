//! formfill Domain Layer
//!
//! Core data model for the document-to-form pipeline and the trait seams
//! through which the infrastructure crates plug in.
//!
//! ## Key Concepts
//!
//! - **DocumentRecord**: structured data extracted from one scanned document
//! - **ExtractionBatch**: ordered, append-only collection of per-document records
//! - **ConsolidatedRecord**: one flattened profile merged across all documents
//!   by the generative backend; its key namespace is the only one authoritative
//!   for form mapping lookups
//! - **FormMapping / FillTable**: locator-to-data-key configuration and the
//!   derived locator-to-value table applied to a live page
//!
//! ## Architecture
//!
//! Infrastructure implementations (OCR subprocesses, the generative HTTP
//! client, the WebDriver session) live in other crates and implement the
//! traits defined in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mapping;
pub mod pages;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use mapping::{FillTable, FormMapping, FormMappingSet, MappingError};
pub use pages::PageRange;
pub use record::{ConsolidatedRecord, DocumentRecord, ExtractionBatch};
pub use traits::{BackendError, GenerativeBackend, TextRecognizer};
