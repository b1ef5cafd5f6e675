//! Conversational fallback for messages that are not stock commands.

use std::sync::Arc;

use tracing::warn;

use super::ports::{GenerationRequest, TextGenerator};
use super::replies;

/// Default token budget for fallback replies.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Wrap the user's message in the assistant persona prompt.
///
/// # Examples
/// ```
/// use stock_assistant::domain::fallback_prompt;
///
/// assert!(fallback_prompt("hola").starts_with("El usuario dice: 'hola'."));
/// ```
pub fn fallback_prompt(message: &str) -> String {
    format!(
        "El usuario dice: '{message}'. Responde como un bot que le maneja un stock de \
         productos unico a ese usuario especifico. Debes dar respuestas cortas y concisas"
    )
}

/// Answers free-form messages through a [`TextGenerator`].
pub struct FallbackResponder {
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl FallbackResponder {
    /// Build a responder with the given token budget.
    pub fn new(generator: Arc<dyn TextGenerator>, max_tokens: u32) -> Self {
        Self {
            generator,
            max_tokens,
        }
    }

    /// Reply text for `message`. Never fails; backend errors become fixed
    /// user-facing texts.
    ///
    /// The first choice is returned verbatim unless it is blank: Telegram's
    /// `sendMessage` rejects empty or whitespace-only text, so a blank
    /// generation is answered with [`replies::NO_RESPONSE`] instead.
    pub async fn respond(&self, message: &str) -> String {
        let request = GenerationRequest {
            prompt: fallback_prompt(message),
            max_tokens: self.max_tokens,
        };
        match self.generator.generate(&request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("generative backend returned blank text");
                replies::NO_RESPONSE.to_owned()
            }
            Ok(text) => text,
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "generative fallback failed");
                replies::for_generation_error(&error).to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTextGenerator, TextGenerationError};
    use rstest::rstest;

    fn responder(result: Result<String, TextGenerationError>) -> FallbackResponder {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .withf(|request| {
                request.max_tokens == 40 && request.prompt.contains("El usuario dice: 'hola'.")
            })
            .return_once(move |_| result);
        FallbackResponder::new(Arc::new(generator), 40)
    }

    #[tokio::test]
    async fn first_choice_is_returned_verbatim() {
        let reply = responder(Ok("  ¡Hola! ¿Qué agregamos?".to_owned()))
            .respond("hola")
            .await;
        assert_eq!(reply, "  ¡Hola! ¿Qué agregamos?");
    }

    #[rstest]
    #[case(Err(TextGenerationError::empty()), replies::NO_RESPONSE)]
    #[case(Ok("   ".to_owned()), replies::NO_RESPONSE)]
    #[case(Ok(String::new()), replies::NO_RESPONSE)]
    #[case(Ok("\n\t".to_owned()), replies::NO_RESPONSE)]
    #[case(Err(TextGenerationError::timeout("60s elapsed")), replies::REQUEST_FAILED)]
    #[case(Err(TextGenerationError::status(401_u16, "bad key")), replies::REQUEST_FAILED)]
    #[tokio::test]
    async fn failures_map_to_fixed_replies(
        #[case] result: Result<String, TextGenerationError>,
        #[case] expected: &str,
    ) {
        assert_eq!(responder(result).respond("hola").await, expected);
    }

    #[rstest]
    fn prompt_embeds_the_message_verbatim() {
        assert_eq!(
            fallback_prompt("¿qué hay?"),
            "El usuario dice: '¿qué hay?'. Responde como un bot que le maneja un stock de \
             productos unico a ese usuario especifico. Debes dar respuestas cortas y concisas"
        );
    }
}
