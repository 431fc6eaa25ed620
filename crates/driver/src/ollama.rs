use crate::error::{DriverError, Result};
use crate::provider::{GenerateRequest, LlmProvider, StreamChunk};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

/// Local generate-API backend (Ollama wire format)
#[derive(Clone, Debug)]
pub struct OllamaProvider {
    endpoint: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn payload(request: &GenerateRequest, stream: bool) -> Value {
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": stream,
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        body
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        log::debug!("POST {} (blocking)", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&Self::payload(request, false))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        body["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DriverError::protocol("local response missing 'response' field"))
    }

    async fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk>>> {
        log::debug!("POST {} (streaming)", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
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

                // The local API emits one JSON object per line
                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);
                    if line.is_empty() {
                        continue;
                    }
                    if tx.send(parse_stream_line(&line)).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}

fn parse_stream_line(line: &str) -> Result<StreamChunk> {
    let value: Value = serde_json::from_str(line)
        .map_err(|err| DriverError::protocol(format!("bad stream line: {err}")))?;
    let response = value["response"].as_str().unwrap_or_default().to_string();
    let done = value["done"].as_bool().unwrap_or(false);
    Ok(StreamChunk { response, done })
}
