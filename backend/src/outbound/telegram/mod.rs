//! Telegram Bot API adapter for the `ChatTransport` port.
//!
//! Inbound updates arrive by long polling `getUpdates`; replies go out via
//! `sendMessage`, `sendDocument`, and `sendPhoto`.

mod dto;
mod transport;

pub use transport::{DEFAULT_API_BASE, TelegramTransport};
