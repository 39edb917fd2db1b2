use laborrag_core::config::{EmbeddingSettings, GenerationSettings};
use laborrag_core::traits::Embedder;
use laborrag_core::Error;
use laborrag_llm::{get_default_completer, get_default_embedder, resolve_api_key, FakeEmbedder, OpenAiEmbedder};

fn l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[test]
fn fake_embedder_is_deterministic_and_normalized() {
    let e = FakeEmbedder::new(64);
    let texts = vec!["근로시간 40시간".to_string(), "연차 유급휴가 15일".to_string(), String::new()];
    let a = e.embed_batch(&texts).unwrap();
    let b = e.embed_batch(&texts).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    assert!(a.iter().all(|v| v.len() == 64));
    let norm: f32 = a[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4);
    assert!(a[2].iter().all(|x| *x == 0.0), "empty text embeds to the zero vector");
}

#[test]
fn shared_tokens_embed_closer() {
    let e = FakeEmbedder::new(256);
    let q = e.embed_text("제50조 근로시간 한도");
    let near = e.embed_text("제50조 근로시간 한도는 40시간");
    let far = e.embed_text("퇴직금 중간정산 사유");
    assert!(l2(&q, &near) < l2(&q, &far));
}

#[test]
fn fake_provider_is_selected_from_settings() {
    let settings = EmbeddingSettings { provider: "fake".into(), fake_dim: 32, ..EmbeddingSettings::default() };
    let embedder = get_default_embedder(&settings).unwrap();
    assert_eq!(embedder.embedder_id(), "fake:32");
    assert_eq!(embedder.embed_batch(&["x".to_string()]).unwrap()[0].len(), 32);
}

#[test]
fn unknown_provider_is_a_config_error() {
    let settings = EmbeddingSettings { provider: "carrier-pigeon".into(), ..EmbeddingSettings::default() };
    if std::env::var("APP_USE_FAKE_EMBEDDINGS").is_ok() {
        return;
    }
    assert!(matches!(get_default_embedder(&settings), Err(Error::InvalidConfig(_))));
}

#[test]
fn configured_key_wins_and_blank_key_is_rejected() {
    assert_eq!(resolve_api_key(Some("sk-test")).unwrap(), "sk-test");
    let generation = GenerationSettings { api_key: Some("sk-test".into()), ..GenerationSettings::default() };
    assert!(get_default_completer(&generation).is_ok());
    if std::env::var("OPENAI_API_KEY").is_err() {
        assert!(resolve_api_key(None).is_err());
        assert!(resolve_api_key(Some("  ")).is_err());
    }
}

#[test]
fn unreachable_endpoint_is_a_retryable_service_error() {
    let embedder = OpenAiEmbedder::new(
        "sk-test",
        "http://127.0.0.1:9/v1",
        "text-embedding-3-small",
        None,
        std::time::Duration::from_millis(200),
        1,
        16,
    )
    .unwrap();
    let err = embedder.embed_batch(&["임금".to_string()]).unwrap_err();
    assert!(matches!(err, Error::EmbeddingService(_)));
    assert!(err.is_retryable());
    assert_eq!(embedder.embedder_id(), "openai:text-embedding-3-small");
}
