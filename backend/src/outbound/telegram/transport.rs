//! Reqwest-backed Telegram transport.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{EnvelopeDto, GetUpdatesDto, SendMessageDto, UpdateDto};
use crate::domain::ports::{ChatTransport, ChatTransportError};
use crate::domain::{Attachment, ChatId, InboundMessage};
use crate::outbound::http_support::body_preview;

/// Public Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

const ALLOWED_UPDATES: &[&str] = &["message"];
// Extra time on top of the long-poll window before the HTTP call gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Bot API client holding the polling offset.
pub struct TelegramTransport {
    client: Client,
    api_base: String,
    token: String,
    poll_timeout: Duration,
    offset: AtomicI64,
}

impl TelegramTransport {
    /// Build a transport for the bot identified by `token`.
    ///
    /// `poll_timeout` is the long-poll window requested from the platform.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        poll_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            token: token.into(),
            poll_timeout,
            offset: AtomicI64::new(0),
        })
    }

    fn method(&self, name: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/bot{}/{name}", self.api_base, self.token))
    }

    async fn upload(
        &self,
        method: &str,
        field: &'static str,
        chat_id: ChatId,
        attachment: &Attachment,
    ) -> Result<(), ChatTransportError> {
        let part = Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
        let form = Form::new()
            .text("chat_id", chat_id.get().to_string())
            .part(field, part);
        let request = self.method(method).multipart(form).timeout(UPLOAD_TIMEOUT);
        call::<serde_json::Value>(request).await.map(|_| ())
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn poll(&self) -> Result<Vec<InboundMessage>, ChatTransportError> {
        let offset = self.offset.load(Ordering::Acquire);
        let request = self
            .method("getUpdates")
            .json(&GetUpdatesDto {
                offset,
                timeout: self.poll_timeout.as_secs(),
                allowed_updates: ALLOWED_UPDATES,
            })
            .timeout(self.poll_timeout + POLL_GRACE);

        let updates: Vec<UpdateDto> = call(request).await?;
        let (messages, next_offset) = accept_updates(updates);
        if let Some(next) = next_offset {
            self.offset.fetch_max(next, Ordering::AcqRel);
        }
        debug!(count = messages.len(), offset, "updates polled");
        Ok(messages)
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), ChatTransportError> {
        let request = self.method("sendMessage").json(&SendMessageDto {
            chat_id: chat_id.get(),
            text,
        });
        call::<serde_json::Value>(request).await.map(|_| ())
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        attachment: &Attachment,
    ) -> Result<(), ChatTransportError> {
        self.upload("sendDocument", "document", chat_id, attachment)
            .await
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        attachment: &Attachment,
    ) -> Result<(), ChatTransportError> {
        self.upload("sendPhoto", "photo", chat_id, attachment).await
    }
}

/// Text messages in `updates` plus the offset that acknowledges all of them.
fn accept_updates(updates: Vec<UpdateDto>) -> (Vec<InboundMessage>, Option<i64>) {
    let next_offset = updates.iter().map(|update| update.update_id + 1).max();
    let messages = updates
        .into_iter()
        .filter_map(UpdateDto::into_inbound)
        .collect();
    (messages, next_offset)
}

async fn call<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ChatTransportError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    decode_envelope(status.as_u16(), body.as_ref())
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ChatTransportError> {
    let envelope: EnvelopeDto<T> = serde_json::from_slice(body).map_err(|err| {
        if (200..300).contains(&status) {
            ChatTransportError::decode(err.to_string())
        } else {
            ChatTransportError::rejected(format!("status {status}: {}", body_preview(body)))
        }
    })?;
    if !envelope.ok {
        let description = envelope
            .description
            .unwrap_or_else(|| format!("status {status}"));
        return Err(ChatTransportError::rejected(description));
    }
    envelope
        .result
        .ok_or_else(|| ChatTransportError::decode("envelope is missing `result`"))
}

// The request URL embeds the bot token; strip it before the error is logged.
fn map_transport_error(error: reqwest::Error) -> ChatTransportError {
    let error = error.without_url();
    if error.is_timeout() {
        ChatTransportError::timeout(error.to_string())
    } else {
        ChatTransportError::transport(error.to_string())
    }
}
