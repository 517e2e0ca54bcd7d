/*!
 * Provider-agnostic LLM invocation.
 *
 * Services describe what they want (system prompt, user prompt, schema,
 * optional media) and the client translates that into whichever request
 * shape the configured provider speaks.
 */

use std::path::{Path, PathBuf};
use serde_json::Value;
use log::{debug, warn};

use crate::app_config::{LlmConfig, LlmProvider};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::gemini::{Gemini, GeminiGenerationConfig, GeminiPart, GeminiRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// A single provider-agnostic LLM invocation
#[derive(Debug, Clone, Default)]
pub struct LlmInvocation {
    /// System prompt
    pub system_prompt: String,

    /// User prompt
    pub user_prompt: String,

    /// Temperature for generation
    pub temperature: Option<f32>,

    /// JSON schema constraining the response
    pub json_schema: Option<Value>,

    /// Media file to attach when the provider supports it
    pub media_path: Option<PathBuf>,
}

impl LlmInvocation {
    /// Create an invocation from the two prompts
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            ..Default::default()
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Constrain the response to a JSON schema
    pub fn json_schema(mut self, schema: Value) -> Self {
        self.json_schema = Some(schema);
        self
    }

    /// Attach a media file
    pub fn media(mut self, path: impl AsRef<Path>) -> Self {
        self.media_path = Some(path.as_ref().to_path_buf());
        self
    }
}

/// The concrete client behind the facade
#[derive(Debug)]
enum ClientKind {
    OpenAI(OpenAI),
    Gemini(Gemini),
    Mock(MockProvider),
}

/// Provider-agnostic LLM client
#[derive(Debug)]
pub struct LlmClient {
    kind: ClientKind,
    model: String,
    max_output_tokens: u32,
}

impl LlmClient {
    /// Build a client for the provider selected in the configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        let api_key = config.get_api_key();
        if api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(format!(
                "No API key configured for the {} provider",
                config.provider.display_name()
            )));
        }

        let model = config.get_model();
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        let kind = match config.provider {
            LlmProvider::OpenAI => ClientKind::OpenAI(OpenAI::new(api_key, endpoint, timeout_secs)),
            LlmProvider::Gemini => {
                ClientKind::Gemini(Gemini::new(api_key, endpoint, &model, timeout_secs))
            }
        };

        Ok(Self {
            kind,
            model,
            max_output_tokens: config.get_max_output_tokens(),
        })
    }

    /// Build a client backed by a mock provider (tests)
    pub fn from_mock(provider: MockProvider) -> Self {
        Self {
            kind: ClientKind::Mock(provider),
            model: "mock".to_string(),
            max_output_tokens: 4096,
        }
    }

    /// Model identifier the client was built with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the underlying provider accepts attached media
    pub fn supports_media(&self) -> bool {
        matches!(self.kind, ClientKind::Gemini(_))
    }

    /// Invoke the configured provider and return the raw response text
    pub async fn invoke(&self, invocation: LlmInvocation) -> Result<String, ProviderError> {
        debug!(
            "LLM invoke: model={} system_len={} user_len={} schema={} media={}",
            self.model,
            invocation.system_prompt.len(),
            invocation.user_prompt.len(),
            invocation.json_schema.is_some(),
            invocation.media_path.is_some(),
        );

        match &self.kind {
            ClientKind::OpenAI(client) => self.invoke_openai(client, invocation).await,
            ClientKind::Gemini(client) => self.invoke_gemini(client, invocation).await,
            ClientKind::Mock(client) => {
                let request = MockRequest {
                    system_prompt: invocation.system_prompt,
                    user_prompt: invocation.user_prompt,
                    has_media: invocation.media_path.is_some(),
                };
                let response = client.complete(request).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.kind {
            ClientKind::OpenAI(client) => client.test_connection().await,
            ClientKind::Gemini(client) => client.test_connection().await,
            ClientKind::Mock(client) => client.test_connection().await,
        }
    }

    async fn invoke_openai(
        &self,
        client: &OpenAI,
        invocation: LlmInvocation,
    ) -> Result<String, ProviderError> {
        if invocation.media_path.is_some() {
            warn!("The OpenAI provider cannot attach media; sending prompts only");
        }

        let mut request = OpenAIRequest::new(&self.model)
            .max_tokens(self.max_output_tokens)
            .add_message("system", invocation.system_prompt)
            .add_message("user", invocation.user_prompt);

        if let Some(temperature) = invocation.temperature {
            request = request.temperature(temperature);
        }
        if let Some(schema) = invocation.json_schema {
            request = request.json_schema(schema);
        }

        let response = client.complete(request).await?;
        Ok(OpenAI::extract_text(&response))
    }

    async fn invoke_gemini(
        &self,
        client: &Gemini,
        invocation: LlmInvocation,
    ) -> Result<String, ProviderError> {
        let mut parts = vec![GeminiPart::text(invocation.user_prompt)];
        if let Some(media_path) = &invocation.media_path {
            let bytes = tokio::fs::read(media_path).await.map_err(|e| {
                ProviderError::RequestFailed(format!(
                    "Failed to read media file {}: {}",
                    media_path.display(),
                    e
                ))
            })?;
            parts.push(GeminiPart::media("video/mp4", &bytes));
        }

        let request = GeminiRequest::new()
            .system(invocation.system_prompt)
            .user_parts(parts)
            .generation_config(GeminiGenerationConfig {
                temperature: invocation.temperature,
                max_output_tokens: Some(self.max_output_tokens),
                response_mime_type: invocation
                    .json_schema
                    .as_ref()
                    .map(|_| "application/json".to_string()),
                response_schema: invocation.json_schema,
            });

        let response = client.complete(request).await?;
        Ok(Gemini::extract_text(&response))
    }
}
