//! Domain types, services, and ports.
//!
//! Purpose: decide how each chat message is answered and describe the
//! driven ports (ledger, generative backend, chat platform, file storage)
//! that the decision needs. Nothing in this module performs I/O directly.
//!
//! Public surface:
//! - [`StockAssistant`]: per-message dispatch returning a [`Reply`].
//! - [`StockExporter`]: renders and stores a user's stock report.
//! - [`FallbackResponder`]: generative answer for non-command messages.
//! - [`LiteralCommands`]: exact-phrase command matcher.
//! - [`TimedStockLedger`]: timeout decorator for any ledger.

pub mod ports;

mod assistant;
mod conversation;
mod exporter;
mod fallback;
mod literal_commands;
pub mod replies;
mod stock;
mod timed_ledger;

pub use self::assistant::{
    AssistantConfig, AssistantPorts, DEFAULT_STORAGE_TIMEOUT, Reply, StockAssistant,
};
pub use self::conversation::{Attachment, InboundMessage};
pub use self::exporter::{
    ExportError, ExportedReport, StockExporter, render_report, report_file_name,
};
pub use self::fallback::{DEFAULT_MAX_TOKENS, FallbackResponder, fallback_prompt};
pub use self::literal_commands::{
    DEFAULT_EXPORT_PHRASE, DEFAULT_IMAGE_TRIGGER, LiteralCommand, LiteralCommands,
};
pub use self::stock::{ChatId, StockLine, UpsertKind, UpsertOutcome, UserId};
pub use self::timed_ledger::TimedStockLedger;
