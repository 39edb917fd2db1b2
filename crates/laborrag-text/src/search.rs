use laborrag_core::config::RetrievalSettings;
use laborrag_core::types::Corpus;

use crate::refs::article_refs;

/// Keyword pass of hybrid retrieval. Returns corpus positions.
#[derive(Debug, Clone)]
pub struct KeywordSearcher {
    keywords: Vec<String>,
    per_keyword_cap: usize,
}

impl Default for KeywordSearcher {
    fn default() -> Self {
        Self::from_settings(&RetrievalSettings::default())
    }
}

impl KeywordSearcher {
    pub fn new(keywords: Vec<String>, per_keyword_cap: usize) -> Self {
        Self { keywords, per_keyword_cap }
    }

    pub fn from_settings(settings: &RetrievalSettings) -> Self {
        Self::new(settings.keywords.clone(), settings.keyword_cap)
    }

    /// Positions of chunks matching the query lexically, ordered and
    /// duplicate-free.
    ///
    /// Article references in the query come first: every chunk containing the
    /// exact reference, in corpus order, `top_k` at most per reference. Then,
    /// for each configured keyword the query contains, the first
    /// `per_keyword_cap` chunks containing that keyword.
    pub fn search(&self, query: &str, corpus: &Corpus, top_k: usize) -> Vec<usize> {
        let mut hits: Vec<usize> = Vec::new();

        for reference in article_refs(query) {
            let matches = positions_containing(corpus, &reference).take(top_k);
            extend_unique(&mut hits, matches);
        }

        for keyword in self.keywords.iter().filter(|k| !k.is_empty() && query.contains(k.as_str())) {
            let matches = positions_containing(corpus, keyword).take(self.per_keyword_cap);
            extend_unique(&mut hits, matches);
        }

        tracing::debug!(hits = hits.len(), "keyword pass");
        hits
    }
}

fn positions_containing<'a>(corpus: &'a Corpus, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    corpus
        .chunks()
        .iter()
        .enumerate()
        .filter(move |(_, c)| c.text.contains(needle))
        .map(|(pos, _)| pos)
}

fn extend_unique(hits: &mut Vec<usize>, positions: impl Iterator<Item = usize>) {
    for pos in positions {
        if !hits.contains(&pos) {
            hits.push(pos);
        }
    }
}
