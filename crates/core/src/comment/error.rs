use thiserror::Error;

/// Errors that reject an inbound request before any store is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("body inválido")]
    MalformedRequest(String),
    #[error("Faltan campos tenant_id o texto")]
    MissingFields,
}

impl RequestError {
    /// Creates a `MalformedRequest` from any displayable parse failure.
    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        Self::MalformedRequest(detail.to_string())
    }

    /// Returns the failure detail, if the error carries one.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::MalformedRequest(detail) => Some(detail),
            Self::MissingFields => None,
        }
    }
}
