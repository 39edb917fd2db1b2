use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use laborrag_core::traits::Embedder;
use laborrag_core::types::Corpus;
use laborrag_core::{Error, Result};

use crate::index::FlatL2Index;

/// Embeds every chunk of `corpus` in order and indexes the raw vectors.
///
/// An empty corpus yields an empty index without calling the embedder. Each
/// batch must come back with one vector per input, all of one dimension.
pub fn build_index(corpus: &Corpus, embedder: &dyn Embedder, batch_size: usize) -> Result<FlatL2Index> {
    let mut index = FlatL2Index::new();
    if corpus.is_empty() {
        tracing::warn!("corpus is empty; built an empty index");
        return Ok(index);
    }

    let start = Instant::now();
    let texts = corpus.texts();
    let batch_size = batch_size.max(1);
    let batches = texts.len().div_ceil(batch_size);

    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for (i, batch) in texts.chunks(batch_size).enumerate() {
        pb.set_message(format!("batch {}/{}", i + 1, batches));
        let vectors = embedder.embed_batch(batch)?;
        if vectors.len() != batch.len() {
            pb.abandon();
            return Err(Error::EmbeddingCountMismatch { expected: batch.len(), actual: vectors.len() });
        }
        if let Err(e) = index.add(vectors) {
            pb.abandon();
            return Err(match e {
                Error::DimensionMismatch { expected, actual } => Error::EmbeddingService(format!(
                    "embedder {} returned vectors of mixed dimension ({expected} and {actual})",
                    embedder.embedder_id()
                )),
                other => other,
            });
        }
        pb.inc(batch.len() as u64);
    }
    pb.finish_with_message("embedded");

    tracing::info!(
        vectors = index.len(),
        dim = index.dim(),
        embedder = embedder.embedder_id(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built vector index"
    );
    Ok(index)
}
