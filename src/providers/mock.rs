/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, echoing the user text
 * - `MockProvider::failing()` - Always fails with an HTTP error
 * - `MockProvider::failing_when_contains(..)` - Fails for matching prompts
 * - `MockProvider::empty()` - Succeeds with an empty completion
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{ChatProvider, ChatRequest};

/// Behavior mode for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds, returning the user text unchanged
    Working,
    /// Always fails with a simulated HTTP error
    Failing,
    /// Fails whenever the user or system prompt contains the needle
    FailingWhenContains(String),
    /// Succeeds with an empty completion
    Empty,
}

/// Mock provider for testing orchestration behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of completion requests received
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&ChatRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for prompts containing the needle
    pub fn failing_when_contains(needle: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailingWhenContains(needle.into()))
    }

    /// Create a mock that returns empty completions
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ChatRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of completion requests this mock has received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the request counter, for asserting after the
    /// provider has been moved into the orchestrator
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => {}
            MockBehavior::Failing => {
                return Err(ProviderError::Http {
                    status: 500,
                    message: "mock provider failure".to_string(),
                });
            }
            MockBehavior::FailingWhenContains(needle) => {
                if request.user.contains(needle.as_str()) || request.system.contains(needle.as_str())
                {
                    return Err(ProviderError::Http {
                        status: 500,
                        message: format!("mock provider failure for '{}'", needle),
                    });
                }
            }
            MockBehavior::Empty => return Ok(String::new()),
        }

        if let Some(generator) = self.custom_response {
            return Ok(generator(&request));
        }
        Ok(request.user)
    }
}
