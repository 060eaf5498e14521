//! Instruction templates for the two generative calls.

use crate::error::PipelineError;
use serde::Deserialize;

/// The instruction texts the pipeline sends ahead of document text and batch
/// data. Loaded from the prompts configuration file; both keys are required
/// and their absence is fatal at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptSet {
    /// Instruction for per-document classification and extraction.
    pub initial_extraction: String,

    /// Instruction for merging all per-document results into one profile.
    pub consolidation: String,
}

impl PromptSet {
    /// Parse a TOML prompts file.
    pub fn from_toml_str(contents: &str) -> Result<Self, PipelineError> {
        toml::from_str(contents)
            .map_err(|e| PipelineError::Config(format!("invalid prompts file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_prompts_load() {
        let prompts = PromptSet::from_toml_str(
            r#"
initial_extraction = "Classify this document."
consolidation = "Merge these records."
"#,
        )
        .unwrap();
        assert_eq!(prompts.initial_extraction, "Classify this document.");
        assert_eq!(prompts.consolidation, "Merge these records.");
    }

    #[test]
    fn test_missing_consolidation_key_is_config_error() {
        let err = PromptSet::from_toml_str(r#"initial_extraction = "Classify.""#)
            .unwrap_err();
        match err {
            PipelineError::Config(message) => assert!(message.contains("consolidation")),
            other => panic!("expected Config error, got {other}"),
        }
    }

    #[test]
    fn test_missing_extraction_key_is_config_error() {
        let err =
            PromptSet::from_toml_str(r#"consolidation = "Merge.""#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
