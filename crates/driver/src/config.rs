use serde::{Deserialize, Serialize};

/// Configuration for LLM dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Model name sent to the local backend
    pub llm_model: String,

    /// Endpoint of the local generate API
    pub llm_base_url: String,

    /// Model name sent to the OpenAI-style backend
    pub openai_model: String,

    /// Bearer token for the OpenAI-style backend
    pub openai_token: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            llm_model: "llama3".to_string(),
            llm_base_url: "http://localhost:11434/api/generate".to_string(),
            openai_model: "gpt-3.5-turbo-16k".to_string(),
            openai_token: None,
        }
    }
}
