//! Error types for the pipeline

use formfill_domain::BackendError;
use thiserror::Error;

/// Errors raised by the extraction and consolidation clients.
///
/// These are explicit outcomes, not sentinels: the caller decides whether a
/// failure skips one document or aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every backend attempt failed; carries the final failure.
    #[error("generative backend gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts performed.
        attempts: u32,
        /// The error from the final attempt.
        last: BackendError,
    },

    /// The backend responded, but not with the expected JSON shape.
    #[error("malformed backend response: {0}")]
    Malformed(String),

    /// No document produced a usable record, so there is nothing to
    /// consolidate.
    #[error("no data was extracted from any document")]
    EmptyBatch,

    /// Prompt or pipeline configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization failure while preparing a prompt.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
