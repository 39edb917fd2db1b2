//! OpenAI-compatible chat completions client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use laborrag_core::config::GenerationSettings;
use laborrag_core::traits::{CompletionRequest, Completer};
use laborrag_core::{Error, Result};

use crate::http;

/// Blocking chat client (`POST {base_url}/chat/completions`).
pub struct OpenAiChat {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: Option<u32>,
    max_retries: usize,
}

impl OpenAiChat {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        max_tokens: Option<u32>,
        timeout: Duration,
        max_retries: usize,
    ) -> Result<Self> {
        if model.trim().is_empty() {
            return Err(Error::InvalidConfig("missing generation model name".into()));
        }
        let client = http::build_client(api_key, timeout).map_err(|e| Error::InvalidConfig(format!("{e:#}")))?;
        Ok(Self {
            client,
            endpoint: http::endpoint(base_url, "chat/completions"),
            model: model.to_string(),
            max_tokens,
            max_retries,
        })
    }

    pub fn from_settings(api_key: String, settings: &GenerationSettings) -> Result<Self> {
        Self::new(
            &api_key,
            &settings.base_url,
            &settings.model,
            settings.max_tokens,
            Duration::from_secs(settings.timeout_secs),
            settings.max_retries,
        )
    }
}

impl Completer for OpenAiChat {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            temperature: request.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage { role: "system", content: &request.system },
                ChatMessage { role: "user", content: &request.user },
            ],
        };
        let parsed: ChatResponse = http::post_json(&self.client, &self.endpoint, &body, self.max_retries)
            .map_err(|e| Error::GenerationService(format!("{e:#}")))?;
        first_content(parsed)
            .ok_or_else(|| Error::GenerationService("completion response contained no message content".into()))
    }
}

fn first_content(response: ChatResponse) -> Option<String> {
    response.choices.into_iter().find_map(|choice| choice.message.content)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_max_tokens() {
        let body = ChatRequest {
            model: "gpt-4.1-mini",
            temperature: 0.0,
            max_tokens: None,
            messages: vec![ChatMessage { role: "user", content: "질문" }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["messages"][0]["content"], "질문");
    }

    #[test]
    fn picks_first_choice_with_content() {
        let raw = r#"{"choices":[{"message":{"content":null}},{"message":{"content":"답변"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_content(parsed).as_deref(), Some("답변"));
    }
}
