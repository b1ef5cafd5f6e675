//! Wire shapes for the generative backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) prompt: &'a str,
    pub(super) max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponseDto {
    #[serde(default)]
    pub(super) generations: Vec<GenerationDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerationDto {
    pub(super) text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 1],
    pub(super) max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChatChoiceDto>,
}

// Providers disagree on where the text lives; accept either shape.
#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceDto {
    pub(super) text: Option<String>,
    pub(super) message: Option<ChatChoiceMessageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceMessageDto {
    pub(super) content: Option<String>,
}

impl GenerateResponseDto {
    pub(super) fn into_first_text(self) -> Option<String> {
        self.generations.into_iter().next().map(|g| g.text)
    }
}

impl ChatResponseDto {
    pub(super) fn into_first_text(self) -> Option<String> {
        let choice = self.choices.into_iter().next()?;
        choice
            .message
            .and_then(|message| message.content)
            .or(choice.text)
    }
}
