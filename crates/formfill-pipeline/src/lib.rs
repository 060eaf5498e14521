//! formfill Pipeline Layer
//!
//! The document-to-form data pipeline: per-document structured extraction,
//! cross-document consolidation, and the pure field-mapping step that turns a
//! consolidated record plus a form mapping into a fill table.
//!
//! Both generative calls share one retry driver (fixed delay, bounded
//! attempts) and one response parser (markdown fence stripping + JSON object
//! validation). Per-document failures skip the document and the loop carries
//! on; a consolidation failure fails the whole run.

#![warn(missing_docs)]

pub mod consolidate;
pub mod error;
pub mod extract;
pub mod mapper;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod retry;

pub use consolidate::consolidate_batch;
pub use error::PipelineError;
pub use extract::extract_document;
pub use mapper::build_fill_table;
pub use pipeline::{DocumentPipeline, PipelineConfig};
pub use prompts::PromptSet;
pub use retry::{generate_with_retry, RetryPolicy};
