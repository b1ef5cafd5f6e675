//! Message dispatch: decides how each inbound message is answered.
//!
//! Precedence is fixed. Literal commands are checked first, then the
//! rule-based interpreter, and only messages with no action keyword reach the
//! generative fallback. A message is handled by exactly one of these paths.

use std::sync::Arc;
use std::time::Duration;

use stock_intent::{ActionKind, Command, IntentParser};
use tracing::{debug, error, info, warn};

use super::exporter::{ExportedReport, StockExporter};
use super::fallback::{DEFAULT_MAX_TOKENS, FallbackResponder};
use super::literal_commands::{LiteralCommand, LiteralCommands};
use super::ports::{ImageSource, ReportArchive, StockLedger, TextGenerator};
use super::timed_ledger::TimedStockLedger;
use super::{Attachment, InboundMessage, UpsertKind, UserId, replies};

/// Default bound on a single ledger call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// What to send back for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text.
    Text(String),
    /// Stored stock report to upload, then discard.
    Document(ExportedReport),
    /// Image to upload.
    Photo(Attachment),
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Driven ports the assistant needs.
#[derive(Clone)]
pub struct AssistantPorts {
    /// Durable stock store.
    pub ledger: Arc<dyn StockLedger>,
    /// Storage for exported reports.
    pub archive: Arc<dyn ReportArchive>,
    /// Easter-egg image.
    pub images: Arc<dyn ImageSource>,
    /// Generative backend for the fallback.
    pub generator: Arc<dyn TextGenerator>,
}

/// Tunables for [`StockAssistant`].
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Exact-phrase commands.
    pub commands: LiteralCommands,
    /// Token budget for fallback replies.
    pub max_tokens: u32,
    /// Bound on each ledger call.
    pub storage_timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            commands: LiteralCommands::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

/// Per-message decision engine.
///
/// Stateless between messages; all state lives behind the ports. One
/// instance is shared by every user lane.
pub struct StockAssistant {
    parser: IntentParser,
    commands: LiteralCommands,
    ledger: Arc<dyn StockLedger>,
    exporter: StockExporter,
    images: Arc<dyn ImageSource>,
    fallback: FallbackResponder,
}

impl StockAssistant {
    /// Assemble the assistant. Ledger calls are wrapped in
    /// [`TimedStockLedger`] using `config.storage_timeout`.
    pub fn new(parser: IntentParser, ports: AssistantPorts, config: AssistantConfig) -> Self {
        let ledger: Arc<dyn StockLedger> = Arc::new(TimedStockLedger::new(
            ports.ledger,
            config.storage_timeout,
        ));
        Self {
            parser,
            commands: config.commands,
            exporter: StockExporter::new(Arc::clone(&ledger), ports.archive),
            ledger,
            images: ports.images,
            fallback: FallbackResponder::new(ports.generator, config.max_tokens),
        }
    }

    /// Exporter used for report commands; also discards delivered reports.
    pub const fn exporter(&self) -> &StockExporter {
        &self.exporter
    }

    /// Decide the reply for `message`.
    pub async fn respond(&self, message: &InboundMessage) -> Reply {
        let user_id = message.user_id;

        if let Some(command) = self.commands.recognise(&message.text) {
            debug!(user_id = user_id.get(), ?command, "literal command");
            return match command {
                LiteralCommand::ExportStock => self.export(user_id).await,
                LiteralCommand::EasterEgg => self.easter_egg().await,
            };
        }

        match self.parser.parse_command(&message.text) {
            Ok(Some(command)) => self.apply(user_id, command, &message.text).await,
            Ok(None) => Reply::Text(self.fallback.respond(&message.text).await),
            Err(err) => {
                debug!(user_id = user_id.get(), error = %err, "unusable quantity");
                Reply::text(replies::INVALID_QUANTITY)
            }
        }
    }

    async fn apply(&self, user_id: UserId, command: Command, text: &str) -> Reply {
        match command.action {
            ActionKind::Add => self.add(user_id, &command.product, command.quantity).await,
            ActionKind::Remove => {
                info!(
                    user_id = user_id.get(),
                    product = %command.product,
                    "remove command ignored"
                );
                Reply::text(replies::REMOVE_UNSUPPORTED)
            }
            // A keyword always resolves to a canonical action; an unknown one
            // means the synonym table is misconfigured.
            ActionKind::Other => {
                warn!(user_id = user_id.get(), "keyword without a known action");
                Reply::Text(self.fallback.respond(text).await)
            }
        }
    }

    async fn add(&self, user_id: UserId, product: &str, quantity: u32) -> Reply {
        match self.ledger.upsert(user_id, product, quantity).await {
            Ok(outcome) => {
                let event = match outcome.kind {
                    UpsertKind::Inserted => "stock row created",
                    UpsertKind::Incremented => "stock row incremented",
                };
                info!(
                    user_id = user_id.get(),
                    product,
                    delta = quantity,
                    quantity = outcome.quantity,
                    "{event}"
                );
                Reply::text(replies::stock_added(quantity, product))
            }
            Err(err) => {
                error!(
                    user_id = user_id.get(),
                    kind = err.kind(),
                    error = %err,
                    "stock upsert failed"
                );
                Reply::text(replies::STOCK_WRITE_FAILED)
            }
        }
    }

    async fn export(&self, user_id: UserId) -> Reply {
        match self.exporter.export(user_id).await {
            Ok(Some(report)) => Reply::Document(report),
            Ok(None) => Reply::text(replies::STOCK_EMPTY),
            Err(err) => {
                error!(user_id = user_id.get(), error = %err, "stock export failed");
                Reply::text(replies::EXPORT_FAILED)
            }
        }
    }

    async fn easter_egg(&self) -> Reply {
        match self.images.load().await {
            Ok(image) => Reply::Photo(image),
            Err(err) => {
                error!(kind = err.kind(), error = %err, "easter egg image unavailable");
                Reply::text(replies::IMAGE_DELIVERY_FAILED)
            }
        }
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
