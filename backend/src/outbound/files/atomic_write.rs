//! Temp-file-and-rename writes inside a capability directory.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Component, Path};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::AttachmentError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Accept only a single normal path component that is not hidden.
pub(super) fn plain_file_name(name: &str) -> Result<&str, AttachmentError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None)
            if file == OsStr::new(name) && !name.starts_with('.') =>
        {
            Ok(name)
        }
        _ => Err(AttachmentError::invalid_name(name)),
    }
}

/// Replace `name` in `dir` with `contents` so readers only ever see the old
/// or the new file in full.
pub(super) fn write_atomic(dir: &Dir, name: &str, contents: &[u8]) -> Result<(), AttachmentError> {
    let file_name = plain_file_name(name)?;
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(io_error(&tmp_name, &err));
    }
    if let Err(err) = dir.rename(&tmp_name, dir, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(io_error(file_name, &err));
    }
    Ok(())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

pub(super) fn io_error(name: &str, err: &io::Error) -> AttachmentError {
    AttachmentError::io(format!("{name}: {err}"))
}
