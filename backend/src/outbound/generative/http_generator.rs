//! Reqwest-backed generative text adapter.
//!
//! Owns transport details only: request serialisation, bearer auth, timeout
//! and status mapping, and decoding the first generated choice.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use super::dto::{
    ChatMessageDto, ChatRequestDto, ChatResponseDto, GenerateRequestDto, GenerateResponseDto,
};
use crate::domain::ports::{GenerationRequest, TextGenerationError, TextGenerator};
use crate::outbound::http_support::body_preview;

/// Request and response shape spoken by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerativeFlavor {
    /// `{model, prompt, max_tokens}` answered by `{generations: [{text}]}`.
    #[default]
    Generate,
    /// `{model, messages, max_tokens}` answered by `{choices: [...]}`.
    ChatCompletions,
}

/// Flavor name not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown generative flavor `{0}`; expected `generate` or `chat`")]
pub struct UnknownFlavor(pub String);

impl FromStr for GenerativeFlavor {
    type Err = UnknownFlavor;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "generate" => Ok(Self::Generate),
            "chat" | "chat-completions" => Ok(Self::ChatCompletions),
            other => Err(UnknownFlavor(other.to_owned())),
        }
    }
}

/// Generative backend adapter that POSTs to one endpoint.
pub struct HttpTextGenerator {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    flavor: GenerativeFlavor,
}

impl HttpTextGenerator {
    /// Build an adapter whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
        flavor: GenerativeFlavor,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
            flavor,
        })
    }

    fn request_body(&self, request: &GenerationRequest) -> Result<Vec<u8>, TextGenerationError> {
        let encoded = match self.flavor {
            GenerativeFlavor::Generate => serde_json::to_vec(&GenerateRequestDto {
                model: &self.model,
                prompt: &request.prompt,
                max_tokens: request.max_tokens,
            }),
            GenerativeFlavor::ChatCompletions => serde_json::to_vec(&ChatRequestDto {
                model: &self.model,
                messages: [ChatMessageDto {
                    role: "user",
                    content: &request.prompt,
                }],
                max_tokens: request.max_tokens,
            }),
        };
        encoded.map_err(|err| TextGenerationError::transport(format!("encode request: {err}")))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TextGenerationError> {
        let body = self.request_body(request)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let payload = response.bytes().await.map_err(map_transport_error)?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, payload.as_ref()));
        }

        parse_first_text(self.flavor, payload.as_ref())
    }
}

fn parse_first_text(
    flavor: GenerativeFlavor,
    body: &[u8],
) -> Result<String, TextGenerationError> {
    let decode = |err: serde_json::Error| {
        TextGenerationError::decode(format!("invalid generation payload: {err}"))
    };
    let first = match flavor {
        GenerativeFlavor::Generate => serde_json::from_slice::<GenerateResponseDto>(body)
            .map_err(decode)?
            .into_first_text(),
        GenerativeFlavor::ChatCompletions => serde_json::from_slice::<ChatResponseDto>(body)
            .map_err(decode)?
            .into_first_text(),
    };
    first.ok_or_else(TextGenerationError::empty)
}

fn map_transport_error(error: reqwest::Error) -> TextGenerationError {
    let error = error.without_url();
    if error.is_timeout() {
        TextGenerationError::timeout(error.to_string())
    } else {
        TextGenerationError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGenerationError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TextGenerationError::timeout(format!("status {}", status.as_u16()))
        }
        _ => TextGenerationError::status(status.as_u16(), body_preview(body)),
    }
}
