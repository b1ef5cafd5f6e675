//! Renders a user's stock into a downloadable text report.
//!
//! The report holds exactly one `product: quantity` line per row, in ledger
//! order, and nothing else. Each user has exactly one artifact name,
//! `stock_<user_id>.txt`, so a new export replaces the previous one.

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::ports::{AttachmentError, ReportArchive, ReportHandle, StockLedger, StockLedgerError};
use super::{Attachment, StockLine, UserId};

/// Errors raised while producing a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Reading the user's rows failed.
    #[error(transparent)]
    Ledger(#[from] StockLedgerError),
    /// Writing the artifact failed.
    #[error(transparent)]
    Archive(#[from] AttachmentError),
}

/// Report stored and ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// Receipt used to discard the artifact after delivery.
    pub handle: ReportHandle,
    /// Upload payload.
    pub attachment: Attachment,
}

/// Artifact name for a user's report.
pub fn report_file_name(user_id: UserId) -> String {
    format!("stock_{user_id}.txt")
}

/// Render report text for `lines`.
///
/// # Examples
/// ```
/// use stock_assistant::domain::{StockLine, render_report};
///
/// let text = render_report(&[StockLine::new("pan", 5), StockLine::new("leche", 2)]);
/// assert_eq!(text, "pan: 5\nleche: 2\n");
/// ```
pub fn render_report(lines: &[StockLine]) -> String {
    let mut text = String::new();
    for line in lines {
        // Writing into a String cannot fail.
        let _ = writeln!(text, "{}: {}", line.product, line.quantity);
    }
    text
}

/// Reads the ledger and stores the rendered report.
pub struct StockExporter {
    ledger: Arc<dyn StockLedger>,
    archive: Arc<dyn ReportArchive>,
}

impl StockExporter {
    /// Build an exporter over the given ports.
    pub fn new(ledger: Arc<dyn StockLedger>, archive: Arc<dyn ReportArchive>) -> Self {
        Self { ledger, archive }
    }

    /// Export the user's stock.
    ///
    /// Returns `Ok(None)` when the user has no rows; nothing is written in
    /// that case.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Ledger`] when the rows cannot be read and
    /// [`ExportError::Archive`] when the artifact cannot be written.
    pub async fn export(&self, user_id: UserId) -> Result<Option<ExportedReport>, ExportError> {
        let lines = self.ledger.list(user_id).await?;
        if lines.is_empty() {
            debug!(user_id = user_id.get(), "stock empty; skipping export");
            return Ok(None);
        }

        let file_name = report_file_name(user_id);
        let body = render_report(&lines).into_bytes();
        let handle = self.archive.store(&file_name, &body).await?;
        info!(
            user_id = user_id.get(),
            rows = lines.len(),
            file_name = %file_name,
            "stock report exported"
        );

        Ok(Some(ExportedReport {
            handle,
            attachment: Attachment::new(file_name, body),
        }))
    }

    /// Remove a delivered report from the archive.
    ///
    /// # Errors
    ///
    /// Propagates the archive's [`AttachmentError`].
    pub async fn discard(&self, report: &ExportedReport) -> Result<(), AttachmentError> {
        self.archive.discard(&report.handle).await
    }
}
