/// Remote text-generation seam.
///
/// The service treats the language model as an opaque function: prompt in, text out, or a
/// `GenerationError`. `TextGenerator` is the trait the composer and enhancer depend on;
/// `ChatCompletionGenerator` is the production implementation over any OpenAI-compatible
/// endpoint (Groq by default).
use async_trait::async_trait;
use scheme_common::openai::{ChatCompletionRequest, Message, OpenAiClient};
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::error::{AppError, GenerationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name, e.g. "groq".
    fn provider(&self) -> &str;

    fn model(&self) -> &str;

    /// Sampling settings used for single-scheme answers.
    fn default_settings(&self) -> GenerationSettings;

    async fn generate(
        &self,
        prompt: &Prompt,
        settings: GenerationSettings,
    ) -> Result<String, GenerationError>;

    /// Cheap round trip proving the provider answers.
    async fn ping(&self, prompt: &Prompt) -> Result<(), GenerationError> {
        let settings = GenerationSettings {
            temperature: 0.3,
            max_tokens: 50,
            top_p: None,
        };
        let reply = self.generate(prompt, settings).await?;
        let sample: String = reply.chars().take(50).collect();
        info!(provider = self.provider(), sample = %sample, "provider liveness check succeeded");
        Ok(())
    }
}

pub struct ChatCompletionGenerator {
    name: String,
    model: String,
    settings: GenerationSettings,
    client: OpenAiClient,
}

impl ChatCompletionGenerator {
    pub fn new(config: &ProviderConfig) -> Result<Self, AppError> {
        let client = OpenAiClient::new(config.client_config())?;
        Ok(Self {
            name: config.name.clone(),
            model: config.model.clone(),
            settings: GenerationSettings {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
                top_p: Some(0.9),
            },
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionGenerator {
    fn provider(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn default_settings(&self) -> GenerationSettings {
        self.settings
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        settings: GenerationSettings,
    ) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(prompt.system.as_str()),
                Message::user(prompt.user.as_str()),
            ],
            temperature: Some(settings.temperature),
            max_tokens: Some(settings.max_tokens),
            top_p: settings.top_p,
        };

        let response = self
            .client
            .chat_completions(request, None)
            .await
            .inspect_err(|e| warn!(provider = %self.name, error = %e, "chat completion failed"))?;

        let text = response
            .first_content()
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
