//! In-memory storage backend.

mod archive;
mod table;

pub use archive::InMemoryArchiveStore;
pub use table::InMemoryCommentTable;
