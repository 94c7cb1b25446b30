//! Store backend implementations.
//!
//! This module provides concrete implementations of the store traits defined
//! in `comentario_core::storage`. The backend is selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `aws` (default): DynamoDB table and S3 archive
//! - `inmemory`: in-memory table and archive, for local invocation
//!
//! These features are mutually exclusive.
//!
//! Build for local invocation:
//! ```bash
//! cargo build -p comentario --no-default-features --features inmemory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "aws", feature = "inmemory"))]
compile_error!(
    "Features 'aws' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "aws", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'aws' or 'inmemory' feature. \
    Example: cargo build -p comentario --features aws"
);

#[cfg(feature = "aws")]
pub mod dynamodb;

#[cfg(feature = "aws")]
pub mod s3;

// Inspection helpers (`get`, `count`, `keys`) are only called from tests.
#[cfg(any(test, feature = "inmemory"))]
#[cfg_attr(not(test), allow(dead_code))]
pub mod inmemory;
