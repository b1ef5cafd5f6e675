//! Port abstraction for the chat platform: inbound updates and outbound
//! replies.
use async_trait::async_trait;

use crate::domain::{Attachment, ChatId, InboundMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by chat transport adapters.
    pub enum ChatTransportError {
        /// The platform could not be reached.
        Transport { message: String } => "chat transport failed: {message}",
        /// The platform did not answer in time.
        Timeout { message: String } => "chat transport timed out: {message}",
        /// The platform answered but refused the call.
        Rejected { message: String } => "chat platform rejected the call: {message}",
        /// The platform answer could not be decoded.
        Decode { message: String } => "chat platform response could not be decoded: {message}",
    }
}

/// Bidirectional channel to the chat platform.
///
/// [`ChatTransport::poll`] must never yield the same update twice once it
/// has returned successfully.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Wait for the next batch of text messages. May return an empty batch.
    async fn poll(&self) -> Result<Vec<InboundMessage>, ChatTransportError>;

    /// Send a plain text reply.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), ChatTransportError>;

    /// Upload a file as a document.
    async fn send_document(
        &self,
        chat_id: ChatId,
        attachment: &Attachment,
    ) -> Result<(), ChatTransportError>;

    /// Upload an image as a photo.
    async fn send_photo(
        &self,
        chat_id: ChatId,
        attachment: &Attachment,
    ) -> Result<(), ChatTransportError>;
}
