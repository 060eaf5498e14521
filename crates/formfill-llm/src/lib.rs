//! formfill Generative Backend Layer
//!
//! Implementations of the `GenerativeBackend` trait from `formfill-domain`.
//!
//! # Backends
//!
//! - `MockBackend`: deterministic scripted mock for testing
//! - `GeminiClient`: Google Generative Language API over HTTP
//!
//! # Examples
//!
//! ```
//! use formfill_llm::MockBackend;
//! use formfill_domain::GenerativeBackend;
//!
//! let backend = MockBackend::with_default("Hello from the model");
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let result = rt.block_on(backend.generate("any prompt")).unwrap();
//! assert_eq!(result, "Hello from the model");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use formfill_domain::{BackendError, GenerativeBackend};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub use gemini::GeminiClient;

/// Scripted generative backend for deterministic testing.
///
/// Responses queued with [`MockBackend::push_ok`] / [`MockBackend::push_err`]
/// are consumed in order; once the script runs dry the backend falls back to
/// its default response, or reports an empty response when no default is set.
///
/// Clones share the same script and call counter.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<VecDeque<Result<String, BackendError>>>>,
    default_response: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockBackend {
    /// Create an empty-scripted backend with no default response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend returning the same response for every prompt.
    pub fn with_default(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Queue a successful response.
    pub fn push_ok(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
    }

    /// Queue a failure.
    pub fn push_err(&self, error: BackendError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of times `generate` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return scripted;
        }
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(BackendError::Empty),
        }
    }
}
