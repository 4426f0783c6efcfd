use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::auth::AuthError;
use super::boundary::UnexpectedFault;
use super::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request could not be decoded (bad multipart, missing part).
    #[error("{message}")]
    BadRequest { field: String, message: String },
}

impl ApiError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Map an expected domain outcome to a Problem. Unexpected faults never get
/// here; they are turned into the opaque 500 by the fault boundary.
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::NotFound { entity, id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("{entity} with id {id} was not found"),
        )
        .with_code("NOT_FOUND"),
        DomainError::InvalidArgument { field, message } => invalid_argument(field, message),
        DomainError::ConstraintViolation { message } => {
            Problem::new(StatusCode::CONFLICT, "Constraint Violation", message.clone())
                .with_code("CONSTRAINT_VIOLATION")
        }
        DomainError::Database { .. } | DomainError::Storage(_) => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "An internal error occurred",
        )
        .with_code("INTERNAL"),
    }
}

fn invalid_argument(field: &str, message: &str) -> Problem {
    Problem::new(
        StatusCode::BAD_REQUEST,
        "Invalid Argument",
        format!("{field}: {message}"),
    )
    .with_code("INVALID_ARGUMENT")
    .with_errors(vec![ValidationViolation {
        field: field.to_owned(),
        message: message.to_owned(),
    }])
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Domain(e) if e.is_unexpected() => UnexpectedFault::new(e.to_string()).into_response(),
            Self::Domain(e) => domain_error_to_problem(&e).into_response(),
            Self::Auth(e) => e.to_problem().into_response(),
            Self::BadRequest { field, message } => invalid_argument(&field, &message).into_response(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn expected_outcomes_map_to_client_statuses() {
        let cases = [
            (DomainError::not_found("Walk", Uuid::nil()), StatusCode::NOT_FOUND),
            (
                DomainError::invalid_argument("pageSize", "must be >= 1"),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::constraint_violation("region missing"),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_problem(&err).status, status);
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn invalid_argument_names_the_field() {
        let p = domain_error_to_problem(&DomainError::invalid_argument("code", "too long"));
        let errors = p.errors.unwrap();
        assert_eq!(errors[0].field, "code");
        assert_eq!(errors[0].message, "too long");
    }

    #[test]
    fn unexpected_faults_carry_no_problem_body() {
        let resp = ApiError::from(DomainError::database("disk I/O error")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.extensions().get::<Problem>().is_none());
        assert!(resp.extensions().get::<UnexpectedFault>().is_some());
    }
}
