//! Per-document records and the consolidated profile.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured data extracted from a single source document.
///
/// Created once per processed input document and immutable afterwards; the
/// batch consumes it wholesale during consolidation and nothing persists it.
/// Serialized field names match the shape the consolidation prompt embeds:
/// `{"source": ..., "document_type": ..., "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Identifier of the source document (its path, in practice).
    #[serde(rename = "source")]
    source_id: String,

    /// Document classification reported by the backend, if any.
    document_type: Option<String>,

    /// Extracted key/value data. Each document's key namespace is independent;
    /// only the consolidated record's keys drive form mapping lookups.
    #[serde(rename = "data")]
    fields: IndexMap<String, Value>,
}

impl DocumentRecord {
    /// Create a new record.
    pub fn new(
        source_id: impl Into<String>,
        document_type: Option<String>,
        fields: IndexMap<String, Value>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            document_type,
            fields,
        }
    }

    /// Identifier of the source document.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Document classification reported by the backend.
    pub fn document_type(&self) -> Option<&str> {
        self.document_type.as_deref()
    }

    /// Extracted key/value data.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

/// Ordered sequence of [`DocumentRecord`]s, insertion order = input order.
///
/// Built incrementally by the document loop and consumed wholesale by
/// consolidation. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionBatch(Vec<DocumentRecord>);

impl ExtractionBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving input order.
    pub fn push(&mut self, record: DocumentRecord) {
        self.0.push(record);
    }

    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[DocumentRecord] {
        &self.0
    }
}

impl FromIterator<DocumentRecord> for ExtractionBatch {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One flattened profile merged across all documents by the generative
/// backend.
///
/// The keys are whatever the model chose to emit; no fixed schema is enforced
/// on this side. This is the only key namespace form mappings resolve against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRecord(IndexMap<String, Value>);

impl ConsolidatedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a data key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a key/value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<IndexMap<String, Value>> for ConsolidatedRecord {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ConsolidatedRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
