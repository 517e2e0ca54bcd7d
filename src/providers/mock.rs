/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working(response)` - Always succeeds with the scripted text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Returns an empty response
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// System prompt
    pub system_prompt: String,
    /// User prompt
    pub user_prompt: String,
    /// Whether media was attached
    pub has_media: bool,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The scripted response text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the scripted response
    Working {
        /// Text returned for every request
        response: String
    },
    /// Fails intermittently (every Nth request)
    Intermittent {
        /// Text returned on succeeding requests
        response: String,
        /// Every Nth request fails
        fail_every: usize
    },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing LLM-dependent services without the network
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always returns `response`
    pub fn working(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Working { response: response.into() })
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(response: impl Into<String>, fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            response: response.into(),
            fail_every,
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of requests this mock has served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, _request: MockRequest) -> Result<MockResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match &self.behavior {
            MockBehavior::Working { response } => Ok(MockResponse { text: response.clone() }),
            MockBehavior::Intermittent { response, fail_every } => {
                if *fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(
                        format!("Simulated intermittent failure on request {}", count)
                    ))
                } else {
                    Ok(MockResponse { text: response.clone() })
                }
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated provider failure".to_string()
            )),
            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated connection failure".to_string()
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
