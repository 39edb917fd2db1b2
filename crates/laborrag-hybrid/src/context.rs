use std::sync::Arc;

use laborrag_core::config::Settings;
use laborrag_core::traits::{Completer, Embedder};
use laborrag_core::types::Corpus;
use laborrag_core::{Error, Result};
use laborrag_text::KeywordSearcher;
use laborrag_vector::{build_index, FlatL2Index};

use crate::answer::AnswerSynthesizer;
use crate::retriever::{HybridRetriever, RetrievedChunk};

/// Everything a query needs, assembled once at startup and read-only
/// afterwards. Share it behind an `Arc`.
pub struct RagContext {
    corpus: Corpus,
    index: FlatL2Index,
    keywords: KeywordSearcher,
    embedder: Arc<dyn Embedder>,
    completer: Arc<dyn Completer>,
    settings: Settings,
}

impl RagContext {
    /// Embeds `corpus` and wraps it with the model clients.
    pub fn build(
        corpus: Corpus,
        embedder: Arc<dyn Embedder>,
        completer: Arc<dyn Completer>,
        settings: Settings,
    ) -> Result<Self> {
        let index = build_index(&corpus, embedder.as_ref(), settings.embedding.batch_size)?;
        Self::from_parts(corpus, index, embedder, completer, settings)
    }

    /// Assembles a context from a prebuilt index, which must hold one row per
    /// chunk.
    pub fn from_parts(
        corpus: Corpus,
        index: FlatL2Index,
        embedder: Arc<dyn Embedder>,
        completer: Arc<dyn Completer>,
        settings: Settings,
    ) -> Result<Self> {
        if index.len() != corpus.len() {
            return Err(Error::EmbeddingCountMismatch { expected: corpus.len(), actual: index.len() });
        }
        let keywords = KeywordSearcher::from_settings(&settings.retrieval);
        Ok(Self { corpus, index, keywords, embedder, completer, settings })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn retriever(&self) -> HybridRetriever<'_> {
        HybridRetriever::new(
            &self.corpus,
            &self.index,
            self.embedder.as_ref(),
            &self.keywords,
            &self.settings.retrieval,
        )
    }

    pub fn synthesizer(&self) -> AnswerSynthesizer<'_> {
        AnswerSynthesizer::new(self.completer.as_ref(), self.settings.generation.temperature)
    }

    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        self.retriever().retrieve(query, top_k)
    }

    /// Retrieve, then answer from what was retrieved.
    pub fn ask(&self, query: &str, top_k: usize) -> Result<String> {
        let retrieved = self.retrieve(query, top_k)?;
        self.synthesizer().answer(query, &retrieved)
    }
}
