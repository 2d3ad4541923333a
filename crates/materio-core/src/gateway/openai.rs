//! OpenAI-compatible gateway adapter.
//!
//! Talks to a chat-completions endpoint for text and an image-generations
//! endpoint for illustrations. All credentials and endpoints come from an
//! explicit [`GatewayConfig`] passed to the constructor; there is no
//! process-wide credential state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Gateway, GatewayError, GenerateOptions};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Model used for image generation.
const IMAGE_MODEL: &str = "image-alpha-001";

/// Size requested for illustrative images.
const IMAGE_SIZE: &str = "256x256";

/// Explicit connection settings for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer token for the service.
    pub api_key: String,
    /// Service root, without a trailing slash. Overridable for tests.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Production [`Gateway`] backed by `reqwest`.
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl std::fmt::Debug for OpenAiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Skip the api_key so it never lands in logs.
        f.debug_struct("OpenAiGateway")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl OpenAiGateway {
    /// Build a gateway from explicit configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GatewayError> {
        let url = format!("{}{path}", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::new(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::new(format!("failed reading {path} response: {e}")))?;

        if !status.is_success() {
            return Err(GatewayError::new(format!(
                "{path} returned {status}: {}",
                String::from_utf8_lossy(&bytes)
            )));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::new(format!("malformed {path} payload: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

// ---------------------------------------------------------------------------
// Gateway impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Gateway for OpenAiGateway {
    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &options.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response: ChatResponse = self.post_json("/v1/chat/completions", &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GatewayError::new("chat completion returned no choices"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            response_format: "url",
        };

        let response: ImageResponse = self.post_json("/v1/images/generations", &request).await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| GatewayError::new("image generation returned no URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_for(server: &mockito::ServerGuard) -> OpenAiGateway {
        let config = GatewayConfig::new("test-key").with_base_url(server.url());
        OpenAiGateway::new(config).unwrap()
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 100,
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn generate_text_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"One sentence."}}]}"#,
            )
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let text = gw.generate_text("summarize this", &options()).await.unwrap();
        assert_eq!(text, "One sentence.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_text_maps_http_error_to_gateway_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"rate limited"}}"#)
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let err = gw.generate_text("p", &options()).await.unwrap_err();
        assert!(
            err.message().contains("429"),
            "expected status in message, got: {err}"
        );
    }

    #[tokio::test]
    async fn generate_text_rejects_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let err = gw.generate_text("p", &options()).await.unwrap_err();
        assert!(err.message().contains("no choices"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_text_rejects_malformed_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let err = gw.generate_text("p", &options()).await.unwrap_err();
        assert!(err.message().contains("malformed"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_image_returns_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/images/generations")
            .with_status(200)
            .with_body(r#"{"data":[{"url":"https://img.example/steel.png"}]}"#)
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let url = gw.generate_image("Steel").await.unwrap();
        assert_eq!(url, "https://img.example/steel.png");
    }

    #[tokio::test]
    async fn generate_image_without_url_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/images/generations")
            .with_status(200)
            .with_body(r#"{"data":[{}]}"#)
            .create_async()
            .await;

        let gw = gateway_for(&server);
        let err = gw.generate_image("Steel").await.unwrap_err();
        assert!(err.message().contains("no URL"), "got: {err}");
    }
}
