//! Port abstraction for the generative text backend used as a conversational
//! fallback.
use async_trait::async_trait;

use super::define_port_error;

/// Prompt and limits sent to the generative backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Full prompt text.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

define_port_error! {
    /// Errors raised by text generation adapters.
    pub enum TextGenerationError {
        /// The request could not be sent or the response body not read.
        Transport { message: String } => "generation transport failed: {message}",
        /// The backend did not answer within the configured timeout.
        Timeout { message: String } => "generation timed out: {message}",
        /// The backend answered with a non-success status.
        Status { status: u16, body: String } => "generation backend returned {status}: {body}",
        /// The response body did not have the expected shape.
        Decode { message: String } => "generation response could not be decoded: {message}",
        /// The response carried no generated choices.
        Empty => "generation backend returned no choices",
    }
}

/// Produces free-text completions for a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the first generated choice verbatim.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TextGenerationError>;
}
