//! laborrag-llm
//!
//! Clients for an OpenAI-compatible inference API (embeddings and chat
//! completions) plus a deterministic offline embedder for tests and demos.

use std::sync::Arc;

use laborrag_core::config::{EmbeddingSettings, GenerationSettings};
use laborrag_core::traits::{Completer, Embedder};
use laborrag_core::{Error, Result};

pub mod chat;
pub mod embed;
pub mod fake;
mod http;

pub use chat::OpenAiChat;
pub use embed::OpenAiEmbedder;
pub use fake::FakeEmbedder;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Embedder selected by configuration. `APP_USE_FAKE_EMBEDDINGS=1` forces the
/// offline [`FakeEmbedder`] regardless of the configured provider.
pub fn get_default_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake || settings.provider.eq_ignore_ascii_case("fake") {
        tracing::info!(dim = settings.fake_dim, "using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(settings.fake_dim)));
    }
    match settings.provider.to_ascii_lowercase().as_str() {
        "openai" => {
            let api_key = resolve_api_key(settings.api_key.as_deref())?;
            Ok(Arc::new(OpenAiEmbedder::from_settings(api_key, settings)?))
        }
        other => Err(Error::InvalidConfig(format!("unknown embedding provider '{other}'"))),
    }
}

pub fn get_default_completer(settings: &GenerationSettings) -> Result<Arc<dyn Completer>> {
    let api_key = resolve_api_key(settings.api_key.as_deref())?;
    Ok(Arc::new(OpenAiChat::from_settings(api_key, settings)?))
}

/// The configured key, falling back to `OPENAI_API_KEY`.
pub fn resolve_api_key(configured: Option<&str>) -> Result<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| Error::InvalidConfig(format!("missing API key: set {API_KEY_ENV} or api_key in config")))
}
