mod error;
mod outcome;
mod traits;

pub use error::{Result, StoreError};
pub use outcome::{ArchiveReceipt, TableReceipt, WriteOutcome};
pub use traits::{ArchiveStore, CommentTable};
