//! laborrag-hybrid
//!
//! Query-time pipeline: hybrid (semantic + keyword) retrieval over an
//! immutable [`RagContext`], then grounded answer synthesis.

pub mod answer;
pub mod bootstrap;
pub mod context;
pub mod prompt;
pub mod retriever;

pub use answer::{AnswerSynthesizer, NOT_FOUND_ANSWER};
pub use bootstrap::{build_context, build_context_with};
pub use context::RagContext;
pub use retriever::{HybridRetriever, RetrievedChunk};
