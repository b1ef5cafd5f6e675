//! Port abstraction for the storage that holds exported stock reports
//! between rendering and delivery.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while storing, reading, or removing attachment files.
    pub enum AttachmentError {
        /// Underlying filesystem operation failed.
        Io { message: String } => "attachment i/o failed: {message}",
        /// The requested file name is not a plain file name.
        InvalidName { name: String } => "attachment name is not allowed: {name}",
        /// The file does not exist.
        Missing { name: String } => "attachment not found: {name}",
    }
}

/// Receipt for a stored report; pass it back to discard the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandle {
    file_name: String,
}

impl ReportHandle {
    /// Wrap the name under which a report was stored.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Stored file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Writable location for report artifacts.
///
/// Storing under an existing name replaces the old file wholesale; readers
/// never observe a partially written report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportArchive: Send + Sync {
    /// Persist `bytes` under `file_name`.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<ReportHandle, AttachmentError>;

    /// Remove a stored report. Removing a file that is already gone succeeds.
    async fn discard(&self, handle: &ReportHandle) -> Result<(), AttachmentError>;
}
