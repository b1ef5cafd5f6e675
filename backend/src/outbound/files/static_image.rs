//! Image source reading one file from disk on every request.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::atomic_write::io_error;
use crate::domain::Attachment;
use crate::domain::ports::{AttachmentError, ImageSource};

/// [`ImageSource`] serving a fixed file.
///
/// The file is read on each call, so replacing it on disk takes effect
/// without a restart.
#[derive(Debug, Clone)]
pub struct StaticImageFile {
    path: PathBuf,
}

impl StaticImageFile {
    /// Serve the image at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn read_image(path: &Path) -> Result<Attachment, AttachmentError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AttachmentError::invalid_name(path.display().to_string()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let bytes = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read(&file_name))
        .map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                AttachmentError::missing(path.display().to_string())
            } else {
                io_error(&file_name, &err)
            }
        })?;
    Ok(Attachment::new(file_name, bytes))
}

#[async_trait]
impl ImageSource for StaticImageFile {
    async fn load(&self) -> Result<Attachment, AttachmentError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_image(&path))
            .await
            .map_err(|err| AttachmentError::io(format!("image task failed: {err}")))?
    }
}
