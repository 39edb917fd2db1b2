use std::collections::HashSet;

use laborrag_core::traits::{CompletionRequest, Completer};
use laborrag_core::Result;

use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::retriever::RetrievedChunk;

/// Returned without calling the model when nothing was retrieved.
pub const NOT_FOUND_ANSWER: &str = "죄송합니다. 제공된 문서에서 관련 정보를 찾을 수 없습니다.";

pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

pub struct AnswerSynthesizer<'a> {
    completer: &'a dyn Completer,
    temperature: f32,
}

impl<'a> AnswerSynthesizer<'a> {
    pub fn new(completer: &'a dyn Completer, temperature: f32) -> Self {
        Self { completer, temperature }
    }

    pub fn answer(&self, query: &str, retrieved: &[RetrievedChunk]) -> Result<String> {
        if retrieved.is_empty() {
            tracing::info!("no relevant chunks; answering with the not-found message");
            return Ok(NOT_FOUND_ANSWER.to_string());
        }
        let request = self.request(query, retrieved);
        let answer = self.completer.complete(&request)?;
        Ok(answer.trim().to_string())
    }

    /// The completion request that `answer` would send.
    pub fn request(&self, query: &str, retrieved: &[RetrievedChunk]) -> CompletionRequest {
        CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: user_prompt(&build_context(retrieved), query),
            temperature: self.temperature,
        }
    }
}

/// Chunk texts joined by [`CONTEXT_SEPARATOR`]; byte-identical texts appear
/// once, at their first position.
pub fn build_context(retrieved: &[RetrievedChunk]) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    retrieved
        .iter()
        .map(|r| r.chunk.text.as_str())
        .filter(|text| seen.insert(*text))
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
