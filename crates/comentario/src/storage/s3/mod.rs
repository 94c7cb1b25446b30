//! S3 archive backend.

mod archive;
mod error;

pub use archive::S3ArchiveStore;
