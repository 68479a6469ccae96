use super::InferenceBackend;
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Non-streaming client for Ollama's `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    system_prompt: Option<String>,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            system_prompt: None,
        }
    }

    pub fn from_config(config: &ChatConfig) -> ChatResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ChatError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            system: self.system_prompt.as_deref(),
            stream: false,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Extracts the reply text from a successful `/api/generate` body.
pub fn parse_generate_body(body: &str) -> ChatResult<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| ChatError::network(format!("undecodable response body: {err}")))?;
    Ok(parsed.response.unwrap_or_default())
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn generate(&self, prompt: &str) -> ChatResult<String> {
        tracing::info!(endpoint = %self.endpoint, model = %self.model, "sending prompt");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(prompt))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            parse_generate_body(&body)
        } else {
            Err(ChatError::network(format!("Ollama error {status}: {body}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_is_non_streaming() {
        let client = OllamaClient::new("http://localhost:11434/api/generate", "llama3.2");
        let body = serde_json::to_value(client.request("hi")).expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({ "model": "llama3.2", "prompt": "hi", "stream": false })
        );
    }

    #[test]
    fn system_prompt_is_sent_when_set() {
        let client = OllamaClient::new("http://localhost:11434/api/generate", "llama3.2")
            .with_system_prompt("Be brief.");
        let body = serde_json::to_value(client.request("hi")).expect("serialize");
        assert_eq!(body["system"], "Be brief.");
    }

    #[test]
    fn config_settings_reach_request_body() {
        let config = ChatConfig {
            model: "mistral".to_string(),
            system_prompt: Some("Answer in French.".to_string()),
            ..ChatConfig::default()
        };
        let client = OllamaClient::from_config(&config).expect("client");
        let body = serde_json::to_value(client.request("bonjour")).expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "model": "mistral",
                "prompt": "bonjour",
                "system": "Answer in French.",
                "stream": false
            })
        );
    }

    #[test]
    fn parses_response_field() {
        let body = r#"{"model":"llama3.2","response":"Hello!","done":true}"#;
        assert_eq!(parse_generate_body(body), Ok("Hello!".to_string()));
    }

    #[test]
    fn missing_response_is_empty() {
        assert_eq!(parse_generate_body(r#"{"done":true}"#), Ok(String::new()));
    }

    #[test]
    fn garbage_body_is_a_network_error() {
        let err = parse_generate_body("<html>").expect_err("not json");
        assert!(err.is_network());
    }
}
