//! Database error conversion helpers.

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Classify a `DbErr`: key violations are the caller's fault, anything else
/// is an unexpected database fault.
pub fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            DomainError::constraint_violation(format!("unique constraint violated: {msg}"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::constraint_violation(format!("foreign key constraint violated: {msg}"))
        }
        _ => DomainError::database(e.to_string()),
    }
}
