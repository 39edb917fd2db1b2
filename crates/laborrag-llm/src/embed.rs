//! OpenAI-compatible embeddings client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use laborrag_core::config::EmbeddingSettings;
use laborrag_core::traits::Embedder;
use laborrag_core::{Error, Result};

use crate::http;

/// Blocking embeddings client (`POST {base_url}/embeddings`).
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    id: String,
    dimensions: Option<usize>,
    max_retries: usize,
    batch_size: usize,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        dimensions: Option<usize>,
        timeout: Duration,
        max_retries: usize,
        batch_size: usize,
    ) -> Result<Self> {
        if model.trim().is_empty() {
            return Err(Error::InvalidConfig("missing embedding model name".into()));
        }
        let client = http::build_client(api_key, timeout).map_err(|e| Error::InvalidConfig(format!("{e:#}")))?;
        Ok(Self {
            client,
            endpoint: http::endpoint(base_url, "embeddings"),
            model: model.to_string(),
            id: format!("openai:{model}"),
            dimensions,
            max_retries,
            batch_size: batch_size.max(1),
        })
    }

    pub fn from_settings(api_key: String, settings: &EmbeddingSettings) -> Result<Self> {
        Self::new(
            &api_key,
            &settings.base_url,
            &settings.model,
            settings.dimensions,
            Duration::from_secs(settings.timeout_secs),
            settings.max_retries,
            settings.batch_size,
        )
    }

    fn embed_request(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest { model: &self.model, input: inputs, dimensions: self.dimensions };
        let mut parsed: EmbeddingResponse = http::post_json(&self.client, &self.endpoint, &request, self.max_retries)
            .map_err(|e| Error::EmbeddingService(format!("{e:#}")))?;
        if parsed.data.len() != inputs.len() {
            return Err(Error::EmbeddingCountMismatch { expected: inputs.len(), actual: parsed.data.len() });
        }
        parsed.data.sort_by_key(|entry| entry.index);
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

impl Embedder for OpenAiEmbedder {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    /// Inputs larger than the configured batch size are sent in several
    /// requests; the output order always matches the input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            out.extend(self.embed_request(batch)?);
        }
        Ok(out)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
