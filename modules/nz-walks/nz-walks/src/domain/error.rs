use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
///
/// `NotFound`, `InvalidArgument` and `ConstraintViolation` are expected
/// outcomes the REST layer renders as client errors. `Database` and `Storage`
/// are unexpected faults handled by the fault boundary.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Faults callers cannot act on.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::Storage(_))
    }
}
