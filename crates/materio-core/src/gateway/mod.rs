//! Gateway interface to external generation services.
//!
//! This module defines the [`Gateway`] trait that the pipeline calls for
//! text and image generation, plus [`GenerateOptions`] and the single-kind
//! [`GatewayError`]. The production adapter lives in [`openai`].

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Failure from a generation call: transport, authentication, rate limit,
/// or a malformed service payload, collapsed into one kind with a
/// human-readable message.
///
/// The gateway performs no retries; if a retry policy is ever reinstated it
/// belongs to the orchestrator, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generation service error: {message}")]
pub struct GatewayError {
    message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Tuning knobs for a text-generation call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Backend model variant.
    pub model: String,
    /// Truncation ceiling for response length.
    pub max_tokens: u32,
    /// Sampling randomness in `[0, 1]`.
    pub temperature: f32,
}

/// Uniform interface to a text-generation and image-generation service.
///
/// One outbound network call per invocation, no internal retry. The trait
/// is object-safe so the pipeline can hold `Arc<dyn Gateway>` and tests can
/// substitute scripted fakes.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Generate text for a prompt. Returns the raw completion verbatim.
    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GatewayError>;

    /// Generate an illustrative image for a prompt. Returns the image URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError>;
}

// Compile-time assertion: Gateway must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Gateway) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopGateway;

    #[async_trait]
    impl Gateway for NoopGateway {
        async fn generate_text(
            &self,
            _prompt: &str,
            _options: &GenerateOptions,
        ) -> Result<String, GatewayError> {
            Ok(String::new())
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::new("no image backend"))
        }
    }

    #[test]
    fn gateway_is_object_safe() {
        let gw: Box<dyn Gateway> = Box::new(NoopGateway);
        let _ = &gw;
    }

    #[tokio::test]
    async fn gateway_error_displays_message() {
        let gw = NoopGateway;
        let err = gw.generate_image("steel").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "generation service error: no image backend"
        );
        assert_eq!(err.message(), "no image backend");
    }
}
