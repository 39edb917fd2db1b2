mod common;

use laborrag_core::config::Settings;
use laborrag_core::Error;

use common::{context_with, corpus_from};

const ARTICLE_50: &str = "제50조(근로시간) 1주 40시간을 초과할 수 없다.";

#[test]
fn article_query_is_found_by_keyword_despite_distance() {
    // the query embeds far from the chunk (squared distance 4 > 1.5)
    let text = format!("{ARTICLE_50} 먼");
    let corpus = corpus_from(&[("근로기준법.pdf", text.as_str())]);
    let (ctx, _, _) = context_with(corpus, Settings::default());

    let hits = ctx.retrieve("제50조가 뭐야?", 8).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk.article.as_deref(), Some("제50조(근로시간)"));
    assert!(hits[0].keyword_match);
    assert_eq!(hits[0].distance, Some(4.0));
}

#[test]
fn strict_filtering_drops_distant_keyword_hits() {
    let text = format!("{ARTICLE_50} 먼");
    let corpus = corpus_from(&[("근로기준법.pdf", text.as_str())]);
    let mut settings = Settings::default();
    settings.retrieval.keyword_bypass_threshold = false;
    let (ctx, _, _) = context_with(corpus, settings);

    assert!(ctx.retrieve("제50조가 뭐야?", 8).unwrap().is_empty());
}

#[test]
fn distant_semantic_only_hits_are_dropped() {
    let corpus = corpus_from(&[
        ("a.txt", "가까운 설명 A"),
        ("b.txt", "먼 설명 B"),
        ("c.txt", "가까운 설명 C"),
        ("d.txt", "먼 설명 D"),
    ]);
    let (ctx, _, _) = context_with(corpus, Settings::default());
    let threshold = ctx.settings().retrieval.distance_threshold;

    let hits = ctx.retrieve("가까운 조항 찾기", 4).unwrap();

    let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
    assert_eq!(positions, vec![0, 2]);
    for h in &hits {
        assert!(!h.keyword_match);
        assert!(h.distance.is_some_and(|d| d <= threshold));
    }
}

#[test]
fn keyword_hits_come_first_and_results_are_truncated() {
    let corpus = corpus_from(&[
        ("a.txt", "가까운 설명"),
        ("b.txt", "휴가 규정 본문 먼"),
        ("c.txt", "가까운 다른 설명"),
    ]);
    let (ctx, _, _) = context_with(corpus, Settings::default());

    let hits = ctx.retrieve("휴가 규정", 2).unwrap();

    let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
    assert_eq!(positions, vec![1, 0]);
    assert!(hits[0].keyword_match);
    assert!(!hits[1].keyword_match);
    assert_eq!(hits[1].distance, Some(0.0));
}

#[test]
fn retrieval_is_idempotent() {
    let corpus = corpus_from(&[
        ("근로기준법.pdf", "제60조(연차 유급휴가) 사용자는 1년간 80퍼센트 이상 출근한 근로자에게 15일의 유급휴가를 주어야 한다."),
        ("notes.txt", "휴가 사용 안내와 임금 지급일 안내"),
    ]);
    let (ctx, _, _) = context_with(corpus, Settings::default());

    let first = ctx.retrieve("연차 휴가는 며칠인가요?", 5).unwrap();
    let second = ctx.retrieve("연차 휴가는 며칠인가요?", 5).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn empty_corpus_retrieves_nothing_without_embedding() {
    let (ctx, embedder, _) = context_with(corpus_from(&[]), Settings::default());

    assert!(ctx.retrieve("임금은 언제 지급하나요?", 5).unwrap().is_empty());
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn blank_query_is_rejected() {
    let (ctx, _, _) = context_with(corpus_from(&[("a.txt", "임금 지급")]), Settings::default());
    assert!(matches!(ctx.retrieve("   ", 5), Err(Error::EmptyQuery)));
}
