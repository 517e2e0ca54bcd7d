use std::time::Duration;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for interacting with the generateContent API
///
/// Unlike the OpenAI provider, Gemini requests can carry the video itself
/// as inline media, letting scene extraction look at the actual footage.
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model identifier, part of the request path
    model: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// System prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,

    /// Conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// A content block (role + parts)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiContent {
    /// Role of the content producer (user, model); absent for system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    pub parts: Vec<GeminiPart>,
}

/// A single part of a content block: text or inline media
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline media content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Create an inline media part from raw bytes
    pub fn media(mime_type: impl Into<String>, data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(GeminiInlineData {
                mime_type: mime_type.into(),
                data: BASE64.encode(data),
            }),
        }
    }
}

/// Base64-encoded inline media
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    /// Media MIME type (e.g. video/mp4)
    pub mime_type: String,

    /// Base64-encoded payload
    pub data: String,
}

/// Generation parameters
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Response MIME type (application/json for schema-constrained output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// Response schema constraining JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// Token usage information
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Number of generated tokens
    #[serde(default)]
    pub candidates_token_count: u32,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The generated content
    pub content: GeminiContent,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage information
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsage>,
}

impl Default for GeminiRequest {
    fn default() -> Self {
        Self {
            system_instruction: None,
            contents: Vec::new(),
            generation_config: None,
        }
    }
}

impl GeminiRequest {
    /// Create a new empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system instruction
    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart::text(text)],
        });
        self
    }

    /// Add a user turn made of the given parts
    pub fn user_parts(mut self, parts: Vec<GeminiPart>) -> Self {
        self.contents.push(GeminiContent {
            role: Some("user".to_string()),
            parts,
        });
        self
    }

    /// Add a plain-text user turn
    pub fn user_text(self, text: impl Into<String>) -> Self {
        self.user_parts(vec![GeminiPart::text(text)])
    }

    /// Set the generation config
    pub fn generation_config(mut self, config: GeminiGenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com/v1beta".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        format!("{}/models/{}:generateContent", base, self.model)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    /// Complete a generateContent request
    async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self.client.post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(
                format!("Failed to send request to Gemini API: {}", e)
            ))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse Gemini API response: {}", e)
            ))
    }

    /// Test the connection to the Gemini API
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new()
            .user_text("Hello")
            .generation_config(GeminiGenerationConfig {
                max_output_tokens: Some(10),
                ..Default::default()
            });

        self.complete(request).await?;
        Ok(())
    }

    /// Extract text from a Gemini response, joining all text parts
    fn extract_text(response: &GeminiResponse) -> String {
        response.candidates.first()
            .map(|candidate| {
                candidate.content.parts.iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}
