//! Filesystem adapters built on capability-scoped `cap-std` directories.
//!
//! Each adapter holds a [`cap_std::fs::Dir`] and can only touch entries
//! inside it. Blocking filesystem calls run on the blocking thread pool.

mod atomic_write;
mod report_directory;
mod static_image;

pub use report_directory::DirectoryReportArchive;
pub use static_image::StaticImageFile;
