/*!
 * Provider implementations for different translation backends.
 *
 * This module contains client implementations for the supported inference
 * servers:
 * - Ollama: Local LLM server
 * - OpenAI: OpenAI API and OpenAI-compatible servers (LM Studio)
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Retry settings shared by the HTTP providers
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Number of additional attempts after the first one
    pub max_retries: u32,
    /// Base backoff in milliseconds, doubled on each retry
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Send every request exactly once
    pub fn none() -> Self {
        Self { max_retries: 0, backoff_base_ms: 0 }
    }

    /// Backoff before the given retry attempt (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << (attempt.saturating_sub(1)).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the retries are used up
    pub async fn run<T, F, Fut>(&self, provider_name: &str, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!("{} request failed: {} - retry {}/{}", provider_name, e, attempt, self.max_retries);
                    tokio::time::sleep(self.backoff(attempt)).await;
                },
                Err(e) => return Err(e),
            }
        }
    }
}

/// Map a transport error from reqwest to a provider error
pub(crate) fn map_transport_error(provider_name: &str, error: reqwest::Error) -> ProviderError {
    if error.is_connect() {
        ProviderError::ConnectionError(format!("Failed to connect to {}: {}", provider_name, error))
    } else {
        ProviderError::RequestFailed(format!("Failed to send request to {}: {}", provider_name, error))
    }
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn map_status_error(status: reqwest::StatusCode, message: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        code => ProviderError::ApiError { status_code: code, message },
    }
}

pub mod ollama;
pub mod openai;
