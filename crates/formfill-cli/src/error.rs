//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Gemini API key is not set
    #[error("GOOGLE_API_KEY environment variable is not set")]
    MissingApiKey,

    /// OCR tooling error
    #[error("OCR error: {0}")]
    Ocr(#[from] formfill_ocr::OcrError),

    /// Pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] formfill_pipeline::PipelineError),

    /// Form mapping error
    #[error("Form mapping error: {0}")]
    Mapping(#[from] formfill_domain::MappingError),

    /// Browser error
    #[error("Browser error: {0}")]
    Browser(#[from] formfill_browser::BrowserError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
