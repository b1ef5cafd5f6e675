//! Messages exchanged with the chat platform.

use super::stock::{ChatId, UserId};

/// Text message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender; scopes every stock operation the message triggers.
    pub user_id: UserId,
    /// Conversation the reply goes back to.
    pub chat_id: ChatId,
    /// Raw message text.
    pub text: String,
}

impl InboundMessage {
    /// Build an inbound message.
    pub fn new(user_id: UserId, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            text: text.into(),
        }
    }
}

/// File payload uploaded alongside a reply.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Name shown to the recipient.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

// Payloads can be large binaries; log the size instead.
impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
