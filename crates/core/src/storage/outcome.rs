//! Outcomes of the two store writes, as reported in the response body.

use serde::{Deserialize, Serialize};

use super::StoreError;

/// Acknowledgment of a table write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReceipt {
    pub table: String,
    pub request_id: Option<String>,
}

/// Acknowledgment of an archive write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveReceipt {
    pub bucket: String,
    pub key: String,
}

/// Either a store acknowledgment or the description of why the write failed.
///
/// Serializes as the receipt itself, or as `{"error": "<description>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WriteOutcome<T> {
    Stored(T),
    Failed { error: String },
}

impl<T> WriteOutcome<T> {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }

    /// Returns the error description of a failed write.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Stored(_) => None,
            Self::Failed { error } => Some(error),
        }
    }
}

impl<T> From<Result<T, StoreError>> for WriteOutcome<T> {
    fn from(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(receipt) => Self::Stored(receipt),
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}
