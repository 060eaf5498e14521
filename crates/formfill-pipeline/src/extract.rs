//! Structured Extraction Client
//!
//! One generative call per document: classification plus initial data
//! extraction. The response must be a JSON object carrying a `document_type`
//! key and an object-typed `data` key; anything else is malformed and never
//! propagates past this client.

use crate::error::PipelineError;
use crate::parser::parse_json_object;
use crate::retry::{generate_with_retry, RetryPolicy};
use formfill_domain::{DocumentRecord, GenerativeBackend};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::info;

/// Extract a structured record from one document's OCR text.
pub async fn extract_document<B>(
    backend: &B,
    source_id: &str,
    document_text: &str,
    instruction: &str,
    retry: &RetryPolicy,
) -> Result<DocumentRecord, PipelineError>
where
    B: GenerativeBackend + ?Sized,
{
    let prompt = format!("{instruction}\n\nDocument Text:\n{document_text}");
    let raw = generate_with_retry(backend, &prompt, retry).await?;
    let mut object = parse_json_object(&raw)?;

    let document_type = match object.get("document_type") {
        Some(Value::String(kind)) => Some(kind.clone()),
        Some(Value::Null) => None,
        Some(_) => {
            return Err(PipelineError::Malformed(
                "document_type is not a string".to_string(),
            ))
        }
        None => {
            return Err(PipelineError::Malformed(
                "response has no document_type key".to_string(),
            ))
        }
    };

    let fields: IndexMap<String, Value> = match object.shift_remove("data") {
        Some(Value::Object(map)) => map.into_iter().collect(),
        Some(_) => {
            return Err(PipelineError::Malformed(
                "data is not an object".to_string(),
            ))
        }
        None => {
            return Err(PipelineError::Malformed(
                "response has no data key".to_string(),
            ))
        }
    };

    info!(
        source = source_id,
        document_type = document_type.as_deref().unwrap_or("unknown"),
        fields = fields.len(),
        "structured extraction succeeded"
    );

    Ok(DocumentRecord::new(source_id, document_type, fields))
}
