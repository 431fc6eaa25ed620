use crate::config::DriverConfig;
use crate::error::{DriverError, Result};
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;
use crate::provider::{GenerateRequest, LlmProvider, StreamChunk};
use crate::template::Template;
use tokio::sync::mpsc;

/// Which backend a query is dispatched to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Local generate API
    #[default]
    Local,
    /// OpenAI-style chat completions
    OpenAi,
}

/// One query to dispatch.
///
/// A raw prompt wins over a template; when only a template is given, its
/// system and prompt parts are rendered with the supplied variables.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    prompt: Option<String>,
    template: Option<Template>,
    vars: Vec<(String, String)>,
    backend: Backend,
}

impl QueryRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: raw prompt, bypassing any template
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Builder: template to render when no raw prompt is set
    #[must_use]
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Builder: one template variable
    #[must_use]
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((name.into(), value.into()));
        self
    }

    /// Builder: backend selection
    #[must_use]
    pub const fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Resolve to (prompt, system) strings
    fn render(&self) -> (String, Option<String>) {
        let vars: Vec<(&str, &str)> = self
            .vars
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        if let Some(prompt) = &self.prompt {
            return (prompt.clone(), None);
        }

        match &self.template {
            Some(template) => (
                template.render_prompt(&vars),
                template
                    .has_system()
                    .then(|| template.render_system(&vars)),
            ),
            None => (String::new(), None),
        }
    }
}

/// Dispatches rendered prompts to a configured LLM backend
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    #[must_use]
    pub const fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Send a query and wait for the full completion
    pub async fn query(&self, request: &QueryRequest) -> Result<StreamChunk> {
        let (provider, generate) = self.prepare(request)?;
        log::info!("Querying {} backend", provider.name());
        let response = provider.generate(&generate).await?;
        Ok(StreamChunk::finished(response))
    }

    /// Send a query and receive the completion incrementally
    pub async fn query_stream(
        &self,
        request: &QueryRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk>>> {
        let (provider, generate) = self.prepare(request)?;
        log::info!("Streaming from {} backend", provider.name());
        provider.generate_stream(&generate).await
    }

    fn prepare(&self, request: &QueryRequest) -> Result<(Box<dyn LlmProvider>, GenerateRequest)> {
        let (prompt, system) = request.render();

        let (provider, model): (Box<dyn LlmProvider>, &str) = match request.backend {
            Backend::Local => (
                Box::new(OllamaProvider::new(&self.config.llm_base_url)),
                &self.config.llm_model,
            ),
            Backend::OpenAi => {
                let token = self
                    .config
                    .openai_token
                    .as_deref()
                    .ok_or(DriverError::MissingToken)?;
                (
                    Box::new(OpenAiProvider::new(token)),
                    &self.config.openai_model,
                )
            }
        };

        Ok((
            provider,
            GenerateRequest {
                model: model.to_string(),
                prompt,
                system,
            },
        ))
    }
}
