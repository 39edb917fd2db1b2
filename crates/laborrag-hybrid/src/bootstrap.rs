use std::sync::Arc;
use std::time::Instant;

use laborrag_core::config::Settings;
use laborrag_core::data_processor::{resolve_document_paths, DataProcessor};
use laborrag_core::traits::{Completer, Embedder};
use laborrag_core::Result;
use laborrag_llm::{get_default_completer, get_default_embedder};

use crate::context::RagContext;

/// Ingests the configured documents and builds a context with the configured
/// model clients.
pub fn build_context(settings: Settings) -> Result<RagContext> {
    let embedder = get_default_embedder(&settings.embedding)?;
    let completer = get_default_completer(&settings.generation)?;
    build_context_with(settings, embedder, completer)
}

/// Like [`build_context`] with caller-supplied model clients.
pub fn build_context_with(
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    completer: Arc<dyn Completer>,
) -> Result<RagContext> {
    let start = Instant::now();
    let paths = resolve_document_paths(&settings)?;
    tracing::info!(documents = paths.len(), "extracting and segmenting documents");
    let corpus = DataProcessor::from_settings(&settings).process_paths(&paths)?;

    tracing::info!(chunks = corpus.len(), embedder = embedder.embedder_id(), "building search index");
    let context = RagContext::build(corpus, embedder, completer, settings)?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "context ready");
    Ok(context)
}
