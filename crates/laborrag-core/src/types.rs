//! Domain types shared by segmentation, indexing and retrieval.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::segment::SegmentStrategy;

/// Label used wherever a chunk has no identifiable article.
pub const UNKNOWN_ARTICLE: &str = "unknown";

/// A chunk as produced by a segmenter, before it is attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub chunk_id: usize,
    pub text: String,
    pub article: Option<String>,
}

/// The atomic retrievable unit.
///
/// - `doc_id`: 1-based, assigned in ingestion order
/// - `source`: display name of the document (file name)
/// - `chunk_id`: position of the chunk within its document
/// - `article`: structural tag such as `제50조(근로시간)`, if one was found
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub doc_id: usize,
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
    #[serde(default)]
    pub article: Option<String>,
}

impl Chunk {
    pub fn from_segment(doc_id: usize, source: &str, segment: Segment) -> Self {
        Self {
            doc_id,
            source: source.to_string(),
            chunk_id: segment.chunk_id,
            text: segment.text,
            article: segment.article,
        }
    }

    /// The article tag, or `"unknown"`.
    pub fn article_label(&self) -> &str {
        self.article.as_deref().unwrap_or(UNKNOWN_ARTICLE)
    }
}

/// One ingested document and the segmentation strategy chosen for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub doc_id: usize,
    pub source: String,
    pub path: PathBuf,
    pub strategy: SegmentStrategy,
}

/// Ordered chunks across all documents. A chunk's position in `chunks` is the
/// row id used by the vector index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
    chunks: Vec<Chunk>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document and its segments, assigning the next `doc_id`.
    /// Returns the assigned id.
    pub fn push_document(
        &mut self,
        source: &str,
        path: PathBuf,
        strategy: SegmentStrategy,
        segments: Vec<Segment>,
    ) -> usize {
        let doc_id = self.documents.len() + 1;
        self.documents.push(Document { doc_id, source: source.to_string(), path, strategy });
        self.chunks
            .extend(segments.into_iter().map(|s| Chunk::from_segment(doc_id, source, s)));
        doc_id
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Chunk> {
        self.chunks.get(position)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn chunks_for(&self, doc_id: usize) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(move |c| c.doc_id == doc_id)
    }

    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }
}
