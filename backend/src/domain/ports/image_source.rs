//! Port abstraction for the static image sent by the easter-egg command.
use async_trait::async_trait;

use crate::domain::Attachment;

use super::AttachmentError;

/// Provides the image payload on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Load the image.
    async fn load(&self) -> Result<Attachment, AttachmentError>;
}
