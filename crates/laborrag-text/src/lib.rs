//! laborrag-text
//!
//! Exact lexical matching over the corpus: article references (`제50조`) and a
//! configured list of domain keywords. Matching is plain substring containment,
//! which holds up for Korean text without a tokenizer.

pub mod refs;
pub mod search;

pub use refs::article_refs;
pub use search::KeywordSearcher;
