//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod chat_transport;
mod image_source;
mod report_archive;
mod stock_ledger;
mod text_generator;

#[cfg(test)]
pub use chat_transport::MockChatTransport;
pub use chat_transport::{ChatTransport, ChatTransportError};
#[cfg(test)]
pub use image_source::MockImageSource;
pub use image_source::ImageSource;
#[cfg(test)]
pub use report_archive::MockReportArchive;
pub use report_archive::{AttachmentError, ReportArchive, ReportHandle};
#[cfg(test)]
pub use stock_ledger::MockStockLedger;
pub use stock_ledger::{StockLedger, StockLedgerError};
#[cfg(test)]
pub use text_generator::MockTextGenerator;
pub use text_generator::{GenerationRequest, TextGenerationError, TextGenerator};
