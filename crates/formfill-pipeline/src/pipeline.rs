//! The sequential document loop.
//!
//! One document at a time: OCR, length gate, structured extraction. Failures
//! at any of those steps skip the document and the loop carries on; only an
//! empty batch or a consolidation failure fails the run.

use crate::consolidate::consolidate_batch;
use crate::error::PipelineError;
use crate::extract::extract_document;
use crate::prompts::PromptSet;
use crate::retry::RetryPolicy;
use formfill_domain::{
    ConsolidatedRecord, ExtractionBatch, GenerativeBackend, TextRecognizer,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Minimum trimmed OCR text length for a document to be worth sending to the
/// backend.
pub const MIN_TEXT_CHARS: usize = 50;

/// Tunables for the document loop.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retry bounds shared by both generative calls.
    pub retry: RetryPolicy,
    /// Minimum trimmed OCR text length.
    pub min_text_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            min_text_chars: MIN_TEXT_CHARS,
        }
    }
}

/// The extraction-to-consolidation pipeline over injected backends.
pub struct DocumentPipeline<R, B> {
    recognizer: R,
    backend: B,
    prompts: PromptSet,
    config: PipelineConfig,
}

impl<R, B> DocumentPipeline<R, B>
where
    R: TextRecognizer,
    B: GenerativeBackend,
{
    /// Create a pipeline with default retry bounds.
    pub fn new(recognizer: R, backend: B, prompts: PromptSet) -> Self {
        Self {
            recognizer,
            backend,
            prompts,
            config: PipelineConfig::default(),
        }
    }

    /// Override the loop configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run OCR and structured extraction over every document.
    ///
    /// Per-document failures are logged and skipped; the batch holds whatever
    /// succeeded, in input order.
    pub async fn collect_batch(&self, documents: &[PathBuf]) -> ExtractionBatch {
        info!(count = documents.len(), "processing documents");
        let mut batch = ExtractionBatch::new();

        for path in documents {
            if !path.exists() {
                warn!(document = %path.display(), "document not found, skipping");
                continue;
            }

            info!(document = %path.display(), "running OCR");
            let text = self.recognizer.extract_text(path, None);
            if text.trim().chars().count() < self.config.min_text_chars {
                warn!(
                    document = %path.display(),
                    "could not get enough text via OCR, skipping extraction for this document"
                );
                continue;
            }

            let source_id = path.display().to_string();
            match extract_document(
                &self.backend,
                &source_id,
                &text,
                &self.prompts.initial_extraction,
                &self.config.retry,
            )
            .await
            {
                Ok(record) => batch.push(record),
                Err(e) => {
                    warn!(
                        document = %path.display(),
                        error = %e,
                        "structured extraction failed, skipping document"
                    );
                }
            }
        }

        batch
    }

    /// Merge a collected batch into one consolidated record.
    pub async fn consolidate(
        &self,
        batch: &ExtractionBatch,
    ) -> Result<ConsolidatedRecord, PipelineError> {
        consolidate_batch(
            &self.backend,
            batch,
            &self.prompts.consolidation,
            &self.config.retry,
        )
        .await
    }

    /// Full run: collect the batch, then consolidate it.
    ///
    /// [`PipelineError::EmptyBatch`] when no document yielded a usable record.
    pub async fn run(&self, documents: &[PathBuf]) -> Result<ConsolidatedRecord, PipelineError> {
        let batch = self.collect_batch(documents).await;
        if batch.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }
        info!(records = batch.len(), "consolidating extracted data");
        self.consolidate(&batch).await
    }
}
