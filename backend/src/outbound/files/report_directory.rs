//! Report archive backed by a local directory.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_write::{io_error, plain_file_name, write_atomic};
use crate::domain::ports::{AttachmentError, ReportArchive, ReportHandle};

/// [`ReportArchive`] that keeps reports as files in one directory.
#[derive(Clone)]
pub struct DirectoryReportArchive {
    dir: Arc<Dir>,
}

impl DirectoryReportArchive {
    /// Open `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(path)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

async fn on_blocking_pool<T, F>(task: F) -> Result<T, AttachmentError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AttachmentError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AttachmentError::io(format!("file task failed: {err}")))?
}

#[async_trait]
impl ReportArchive for DirectoryReportArchive {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<ReportHandle, AttachmentError> {
        let name = plain_file_name(file_name)?.to_owned();
        let contents = bytes.to_vec();
        let dir = Arc::clone(&self.dir);
        let stored = name.clone();
        on_blocking_pool(move || write_atomic(&dir, &stored, &contents)).await?;
        debug!(file_name = %name, "report stored");
        Ok(ReportHandle::new(name))
    }

    async fn discard(&self, handle: &ReportHandle) -> Result<(), AttachmentError> {
        let name = plain_file_name(handle.file_name())?.to_owned();
        let dir = Arc::clone(&self.dir);
        on_blocking_pool(move || match dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&name, &err)),
        })
        .await
    }
}
