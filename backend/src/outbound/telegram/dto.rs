//! Bot API wire shapes.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatId, InboundMessage, UserId};

/// Every Bot API answer is wrapped in this envelope.
#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<T> {
    pub(super) ok: bool,
    pub(super) result: Option<T>,
    pub(super) description: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct GetUpdatesDto<'a> {
    pub(super) offset: i64,
    pub(super) timeout: u64,
    pub(super) allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(super) struct SendMessageDto<'a> {
    pub(super) chat_id: i64,
    pub(super) text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateDto {
    pub(super) update_id: i64,
    pub(super) message: Option<MessageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageDto {
    pub(super) chat: ChatDto,
    pub(super) from: Option<UserDto>,
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatDto {
    pub(super) id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: i64,
}

impl UpdateDto {
    /// Text message carried by this update, if any. Service messages,
    /// stickers, and anonymous channel posts yield `None`.
    pub(super) fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message?;
        let sender = message.from?;
        let text = message.text?;
        Some(InboundMessage::new(
            UserId::new(sender.id),
            ChatId::new(message.chat.id),
            text,
        ))
    }
}
