//! Consolidation Client
//!
//! One generative call merges all per-document records into a single flat
//! profile. The consolidated schema is open-ended, driven entirely by the
//! instruction text; the only requirement is that the response parses to a
//! JSON object.

use crate::error::PipelineError;
use crate::parser::parse_json_object;
use crate::retry::{generate_with_retry, RetryPolicy};
use formfill_domain::{ConsolidatedRecord, ExtractionBatch, GenerativeBackend};
use tracing::info;

/// Merge an extraction batch into one consolidated record.
pub async fn consolidate_batch<B>(
    backend: &B,
    batch: &ExtractionBatch,
    instruction: &str,
    retry: &RetryPolicy,
) -> Result<ConsolidatedRecord, PipelineError>
where
    B: GenerativeBackend + ?Sized,
{
    let serialized = serde_json::to_string_pretty(batch)?;
    let prompt = format!("{instruction}\n\nExtracted Data from Documents:\n{serialized}");

    let raw = generate_with_retry(backend, &prompt, retry).await?;
    let object = parse_json_object(&raw)?;

    info!(keys = object.len(), "consolidation succeeded");
    Ok(ConsolidatedRecord::from(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::DocumentRecord;
    use formfill_llm::MockBackend;
    use indexmap::IndexMap;
    use serde_json::{json, Value};

    fn sample_batch() -> ExtractionBatch {
        let mut fields = IndexMap::new();
        fields.insert("total".to_string(), json!("42.00"));
        vec![
            DocumentRecord::new("a.pdf", Some("invoice".into()), fields.clone()),
            DocumentRecord::new("b.pdf", Some("invoice".into()), fields),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_object_response_becomes_record() {
        let backend =
            MockBackend::with_default(r#"{"amount": "42.00", "currency": null}"#);
        let record = consolidate_batch(
            &backend,
            &sample_batch(),
            "Merge these.",
            &RetryPolicy::immediate(3),
        )
        .await
        .unwrap();

        assert_eq!(record.get("amount"), Some(&json!("42.00")));
        assert_eq!(record.get("currency"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_no_required_keys_in_consolidated_schema() {
        // Unlike extraction, any object shape is acceptable here.
        let backend = MockBackend::with_default(r#"{"whatever": 1}"#);
        let record = consolidate_batch(
            &backend,
            &sample_batch(),
            "Merge these.",
            &RetryPolicy::immediate(3),
        )
        .await
        .unwrap();
        assert_eq!(record.get("whatever"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_array_response_is_malformed() {
        let backend = MockBackend::with_default(r#"[{"amount": "42.00"}]"#);
        let err = consolidate_batch(
            &backend,
            &sample_batch(),
            "Merge these.",
            &RetryPolicy::immediate(3),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::Malformed(_)));
    }
}
