use std::collections::HashMap;

use serde::Serialize;

use laborrag_core::config::RetrievalSettings;
use laborrag_core::traits::Embedder;
use laborrag_core::types::{Chunk, Corpus};
use laborrag_core::{Error, Result};
use laborrag_text::KeywordSearcher;
use laborrag_vector::FlatL2Index;

/// One retrieval result with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    /// Corpus position (index row).
    pub position: usize,
    pub chunk: Chunk,
    /// Squared L2 distance to the query, when the chunk was a semantic
    /// candidate.
    pub distance: Option<f32>,
    pub keyword_match: bool,
}

pub struct HybridRetriever<'a> {
    corpus: &'a Corpus,
    index: &'a FlatL2Index,
    embedder: &'a dyn Embedder,
    keywords: &'a KeywordSearcher,
    settings: &'a RetrievalSettings,
}

impl<'a> HybridRetriever<'a> {
    pub fn new(
        corpus: &'a Corpus,
        index: &'a FlatL2Index,
        embedder: &'a dyn Embedder,
        keywords: &'a KeywordSearcher,
        settings: &'a RetrievalSettings,
    ) -> Self {
        Self { corpus, index, embedder, keywords, settings }
    }

    /// Up to `top_k` chunks for `query`: keyword matches first, then semantic
    /// candidates in rank order, with distant semantic-only hits dropped.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if self.corpus.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embed_query(query)?;
        let candidates = top_k.saturating_mul(self.settings.candidate_multiplier.max(1));
        let semantic = self.index.search(&query_vector, candidates)?;
        let keyword = self.keywords.search(query, self.corpus, top_k);

        let distances: HashMap<usize, f32> = semantic.iter().map(|&(d, pos)| (pos, d)).collect();
        let mut merged: Vec<usize> = keyword.clone();
        for &(_, pos) in &semantic {
            if !merged.contains(&pos) {
                merged.push(pos);
            }
        }
        merged.truncate(top_k);

        let results: Vec<RetrievedChunk> = merged
            .into_iter()
            .filter_map(|position| {
                let chunk = self.corpus.get(position)?.clone();
                Some(RetrievedChunk {
                    position,
                    chunk,
                    distance: distances.get(&position).copied(),
                    keyword_match: keyword.contains(&position),
                })
            })
            .filter(|r| self.is_relevant(r))
            .collect();

        tracing::debug!(
            semantic = semantic.len(),
            keyword = keyword.len(),
            returned = results.len(),
            "hybrid retrieval"
        );
        Ok(results)
    }

    fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embedder.embed_batch(&[query.to_string()])?;
        if vectors.len() != 1 {
            return Err(Error::EmbeddingCountMismatch { expected: 1, actual: vectors.len() });
        }
        Ok(vectors.remove(0))
    }

    fn is_relevant(&self, r: &RetrievedChunk) -> bool {
        if r.keyword_match && self.settings.keyword_bypass_threshold {
            return true;
        }
        r.distance.is_some_and(|d| d <= self.settings.distance_threshold)
    }
}
