//! Error types for the OCR layer

use thiserror::Error;

/// Errors raised while rendering or recognizing document pages.
///
/// These stay internal to the adapter except for [`OcrError::MissingExecutable`],
/// which the startup probe surfaces so the process can fail fast.
#[derive(Debug, Error)]
pub enum OcrError {
    /// A required executable is not installed or not on PATH.
    #[error("required executable '{0}' was not found on PATH")]
    MissingExecutable(&'static str),

    /// The rasterizer rejected or failed on the source document.
    #[error("page rendering failed: {0}")]
    Render(String),

    /// The recognizer failed on a rendered page image.
    #[error("text recognition failed: {0}")]
    Recognize(String),

    /// Filesystem or subprocess I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
