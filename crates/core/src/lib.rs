//! Functional core of the comentario ingest handler.
//!
//! Pure types and functions: envelope unwrapping, validation, record and
//! archive construction, response composition, plus the traits the shell
//! implements for the two stores.

pub mod comment;
pub mod response;
pub mod storage;
