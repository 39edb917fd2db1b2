#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use laborrag_core::config::Settings;
use laborrag_core::data_processor::DataProcessor;
use laborrag_core::traits::{CompletionRequest, Completer, Embedder};
use laborrag_core::types::Corpus;
use laborrag_core::{Error, Result};
use laborrag_hybrid::RagContext;

/// Two-dimensional embedder: texts containing `먼` point away from
/// everything else (squared distance 4), all other texts coincide.
#[derive(Default)]
pub struct ScriptedEmbedder {
    pub calls: AtomicUsize,
}

impl ScriptedEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for ScriptedEmbedder {
    fn embedder_id(&self) -> &str {
        "scripted"
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| if t.contains('먼') { vec![-1.0, 0.0] } else { vec![1.0, 0.0] })
            .collect())
    }
}

/// Replies with a fixed answer and keeps every request it saw.
pub struct RecordingCompleter {
    reply: String,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingCompleter {
    pub fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), requests: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> CompletionRequest {
        self.requests.lock().unwrap().last().cloned().expect("at least one request")
    }
}

impl Completer for RecordingCompleter {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

pub struct FailingCompleter;

impl Completer for FailingCompleter {
    fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(Error::GenerationService("upstream returned 503".to_string()))
    }
}

/// Corpus with one document per `(file name, text)` pair, segmented the way
/// ingestion would segment it.
pub fn corpus_from(docs: &[(&str, &str)]) -> Corpus {
    let processor = DataProcessor::default();
    let mut corpus = Corpus::new();
    for (name, text) in docs {
        processor.ingest_text(&mut corpus, Path::new(name), text);
    }
    corpus
}

pub fn context_with(
    corpus: Corpus,
    settings: Settings,
) -> (RagContext, Arc<ScriptedEmbedder>, Arc<RecordingCompleter>) {
    let embedder = Arc::new(ScriptedEmbedder::default());
    let completer = Arc::new(RecordingCompleter::new("  제50조에 따르면 1주 근로시간은 40시간을 초과할 수 없습니다.\n"));
    let context = RagContext::build(corpus, embedder.clone(), completer.clone(), settings).expect("context");
    (context, embedder, completer)
}
