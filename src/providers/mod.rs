/*!
 * Provider implementations for different LLM services.
 *
 * This module contains client implementations for the LLM providers used
 * for scene extraction and segment translation:
 * - OpenAI: chat completions with strict JSON-schema responses
 * - Gemini: generateContent with inline video media
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers.
///
/// Each provider speaks its own request/response shapes (the associated
/// types); the trait pins down the lifecycle every client must support so
/// the LLM facade can drive them interchangeably.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Send a request to the provider and await its response
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Cheap connectivity probe, used before starting an expensive pipeline
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Pull the plain response text out of a provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod openai;
pub mod gemini;
pub mod mock;
