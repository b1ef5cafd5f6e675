//! Message handler that asks the assistant and delivers its reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use super::lanes::MessageHandler;
use crate::domain::ports::ChatTransport;
use crate::domain::{ChatId, ExportedReport, InboundMessage, Reply, StockAssistant, replies};

/// Bridges [`StockAssistant`] replies onto a [`ChatTransport`].
pub struct ReplyingHandler {
    assistant: Arc<StockAssistant>,
    transport: Arc<dyn ChatTransport>,
}

impl ReplyingHandler {
    /// Build a handler.
    pub fn new(assistant: Arc<StockAssistant>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            assistant,
            transport,
        }
    }

    async fn deliver(&self, chat_id: ChatId, reply: Reply) {
        match reply {
            Reply::Text(text) => self.send_text(chat_id, &text).await,
            Reply::Document(report) => self.deliver_report(chat_id, report).await,
            Reply::Photo(image) => {
                if let Err(err) = self.transport.send_photo(chat_id, &image).await {
                    error!(chat_id = chat_id.get(), kind = err.kind(), error = %err, "photo upload failed");
                    self.send_text(chat_id, replies::IMAGE_DELIVERY_FAILED).await;
                }
            }
        }
    }

    // The artifact is removed whether or not the upload succeeded.
    async fn deliver_report(&self, chat_id: ChatId, report: ExportedReport) {
        let uploaded = self
            .transport
            .send_document(chat_id, &report.attachment)
            .await;
        if let Err(err) = self.assistant.exporter().discard(&report).await {
            warn!(
                file_name = report.handle.file_name(),
                error = %err,
                "report cleanup failed"
            );
        }
        if let Err(err) = uploaded {
            error!(chat_id = chat_id.get(), kind = err.kind(), error = %err, "report upload failed");
            self.send_text(chat_id, replies::DOCUMENT_DELIVERY_FAILED)
                .await;
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) {
        if let Err(err) = self.transport.send_text(chat_id, text).await {
            error!(chat_id = chat_id.get(), kind = err.kind(), error = %err, "reply delivery failed");
        }
    }
}

#[async_trait]
impl MessageHandler for ReplyingHandler {
    async fn handle(&self, message: InboundMessage) {
        let reply = self.assistant.respond(&message).await;
        self.deliver(message.chat_id, reply).await;
    }
}
