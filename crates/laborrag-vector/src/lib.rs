//! laborrag-vector
//!
//! In-memory exact nearest-neighbour index over chunk embeddings and the
//! one-shot builder that embeds a corpus into it.

pub mod build;
pub mod index;

pub use build::build_index;
pub use index::FlatL2Index;
