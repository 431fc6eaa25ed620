use crate::error::{DriverError, Result};
use crate::provider::{GenerateRequest, LlmProvider, StreamChunk};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// OpenAI-style chat-completions backend
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    api_base: String,
    api_key: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, api_key)
    }

    pub fn with_api_base(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_base)
    }

    fn payload(request: &GenerateRequest, stream: bool) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        json!({
            "model": request.model,
            "messages": messages,
            "stream": stream,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        log::debug!("POST {} (blocking)", self.url());
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&Self::payload(request, false))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DriverError::protocol("chat completion missing message content"))
    }

    async fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk>>> {
        log::debug!("POST {} (streaming)", self.url());
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&Self::payload(request, true))
            .send()
            .await?
            .error_for_status()?;

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(item) = stream.next().await {
                let bytes = match item {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        let _ = tx.send(Err(err.into())).await;
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    let Some(chunk) = parse_sse_line(&line) else {
                        continue;
                    };
                    let done = chunk.done;
                    if tx.send(Ok(chunk)).await.is_err() || done {
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}

/// Parse one SSE line; `None` for keep-alives and non-data lines
fn parse_sse_line(line: &str) -> Option<StreamChunk> {
    let data = line.strip_prefix("data:")?.trim();
    if data == "[DONE]" {
        return Some(StreamChunk::finished(""));
    }

    let value: Value = serde_json::from_str(data).ok()?;
    let delta = value["choices"][0]["delta"]["content"]
        .as_str()
        .unwrap_or_default();
    Some(StreamChunk::partial(delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_includes_system_message_first() {
        let request = GenerateRequest {
            model: "gpt-3.5-turbo-16k".to_string(),
            prompt: "question".to_string(),
            system: Some("preamble".to_string()),
        };

        let body = OpenAiProvider::payload(&request, false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "preamble");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "question");
    }

    #[test]
    fn test_payload_without_system_has_single_message() {
        let request = GenerateRequest {
            model: "gpt-3.5-turbo-16k".to_string(),
            prompt: "question".to_string(),
            system: None,
        };

        let body = OpenAiProvider::payload(&request, true);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["stream"], true);
    }

    #[test]
    fn test_parse_sse_line() {
        let chunk =
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(chunk, StreamChunk::partial("hi"));

        let done = parse_sse_line("data: [DONE]").unwrap();
        assert!(done.done);

        assert!(parse_sse_line(": keep-alive").is_none());
        assert!(parse_sse_line("").is_none());
    }

    #[test]
    fn test_api_base_trailing_slash_is_trimmed() {
        let provider = OpenAiProvider::with_api_base("http://localhost:8080/", "key");
        assert_eq!(provider.url(), "http://localhost:8080/v1/chat/completions");
    }
}
