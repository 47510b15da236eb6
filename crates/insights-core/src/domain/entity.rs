//! Domain Layer - Core Entity Trait
//!
//! Basic contract shared by catalog entities, plus the domain error type.

use std::fmt::Display;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Rejected input. `field` names the offending request parameter.
    #[error("{message}")]
    Validation { field: &'static str, message: String },
    /// Anti-forgery check failed
    #[error("Security check failed: {0}")]
    Security(String),
    /// Catalog or term store failure
    #[error("Upstream failure: {0}")]
    Upstream(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn upstream(err: impl Display) -> Self {
        DomainError::Upstream(err.to_string())
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::upstream(err)
    }
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        DomainError::Upstream(format!("CSV writer: {}", err))
    }
}
