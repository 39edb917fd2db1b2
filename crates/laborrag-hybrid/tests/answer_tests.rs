mod common;

use std::fs;
use std::sync::Arc;

use laborrag_core::config::Settings;
use laborrag_core::types::Corpus;
use laborrag_core::Error;
use laborrag_hybrid::answer::{build_context, CONTEXT_SEPARATOR};
use laborrag_hybrid::prompt::SYSTEM_PROMPT;
use laborrag_hybrid::{build_context_with, RagContext, NOT_FOUND_ANSWER};
use laborrag_llm::FakeEmbedder;
use laborrag_vector::FlatL2Index;

use common::{context_with, corpus_from, FailingCompleter, RecordingCompleter, ScriptedEmbedder};

#[test]
fn ask_grounds_the_model_on_retrieved_text() {
    let corpus = corpus_from(&[("근로기준법.pdf", "제50조(근로시간) 1주 40시간을 초과할 수 없다.")]);
    let (ctx, _, completer) = context_with(corpus, Settings::default());

    let answer = ctx.ask("제50조가 뭐야?", 8).unwrap();

    assert_eq!(answer, "제50조에 따르면 1주 근로시간은 40시간을 초과할 수 없습니다.");
    assert_eq!(completer.calls(), 1);
    let request = completer.last();
    assert_eq!(request.system, SYSTEM_PROMPT);
    assert_eq!(request.temperature, 0.0);
    assert!(request.user.contains("【제50조(근로시간)】\n제50조(근로시간) 1주 40시간을 초과할 수 없다."));
    assert!(request.user.contains("**질문**: 제50조가 뭐야?"));
}

#[test]
fn empty_corpus_answers_not_found_without_model_calls() {
    let (ctx, embedder, completer) = context_with(Corpus::new(), Settings::default());

    let answer = ctx.ask("퇴직금은 어떻게 계산하나요?", 5).unwrap();

    assert_eq!(answer, NOT_FOUND_ANSWER);
    assert_eq!(embedder.calls(), 0);
    assert_eq!(completer.calls(), 0);
}

#[test]
fn identical_chunks_appear_once_in_context() {
    let shared = "근로계약을 체결할 때에 사용자는 근로자에게 임금과 소정근로시간을 명시하여야 한다.";
    let corpus = corpus_from(&[("a.txt", shared), ("b.txt", shared), ("c.txt", "임금은 매월 1회 이상 일정한 날짜를 정하여 지급하여야 한다.")]);
    let (ctx, _, completer) = context_with(corpus, Settings::default());

    let retrieved = ctx.retrieve("임금 명시 의무", 5).unwrap();
    assert_eq!(retrieved.iter().filter(|r| r.chunk.text == shared).count(), 2);

    ctx.synthesizer().answer("임금 명시 의무", &retrieved).unwrap();
    let user = completer.last().user;
    assert_eq!(user.matches(shared).count(), 1);

    let context = build_context(&retrieved);
    assert_eq!(context.split(CONTEXT_SEPARATOR).count(), 2);
}

#[test]
fn generation_failure_propagates() {
    let corpus = corpus_from(&[("a.txt", "임금 지급 원칙")]);
    let ctx = RagContext::build(
        corpus,
        Arc::new(ScriptedEmbedder::default()),
        Arc::new(FailingCompleter),
        Settings::default(),
    )
    .unwrap();

    let err = ctx.ask("임금 지급", 5).unwrap_err();
    assert!(matches!(err, Error::GenerationService(_)));
    assert!(err.is_retryable());
}

#[test]
fn prebuilt_index_must_cover_the_corpus() {
    let corpus = corpus_from(&[("a.txt", "임금 지급 원칙")]);
    let result = RagContext::from_parts(
        corpus,
        FlatL2Index::new(),
        Arc::new(ScriptedEmbedder::default()),
        Arc::new(RecordingCompleter::new("ok")),
        Settings::default(),
    );
    assert!(matches!(result, Err(Error::EmbeddingCountMismatch { expected: 1, actual: 0 })));
}

#[test]
fn bootstrap_ingests_configured_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("근로기준법.txt"),
        "제50조(근로시간) ① 1주 간의 근로시간은 휴게시간을 제외하고 40시간을 초과할 수 없다.\n\
         제60조(연차 유급휴가) ① 사용자는 1년간 80퍼센트 이상 출근한 근로자에게 15일의 유급휴가를 주어야 한다.\n",
    )
    .unwrap();
    fs::write(tmp.path().join("안내.txt"), "휴일 근로에 대한 가산 수당 안내").unwrap();

    let mut settings = Settings::default();
    settings.documents.dir = Some(tmp.path().to_string_lossy().to_string());
    let completer = Arc::new(RecordingCompleter::new("답변"));
    let ctx = build_context_with(settings, Arc::new(FakeEmbedder::new(64)), completer.clone()).unwrap();

    assert_eq!(ctx.corpus().documents().len(), 2);
    assert_eq!(ctx.index().len(), ctx.corpus().len());
    let hits = ctx.retrieve("제60조 연차", 3).unwrap();
    assert_eq!(hits[0].chunk.article.as_deref(), Some("제60조(연차 유급휴가)"));
    assert_eq!(ctx.ask("제60조 연차", 3).unwrap(), "답변");
}
