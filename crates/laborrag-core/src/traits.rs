use std::path::Path;

use crate::types::Segment;
use crate::Result;

/// Turns a batch of texts into fixed-dimension vectors, one per input, in order.
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `openai:text-embedding-3-small`).
    fn embedder_id(&self) -> &str;
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// A single chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

pub trait Completer: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Returns the full text of a source document.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Splits raw document text into ordered segments.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Segment>;
    fn name(&self) -> &str;
}
