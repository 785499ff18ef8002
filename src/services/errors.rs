use axum::http::StatusCode;
use thiserror::Error;
use tracing::warn;

use crate::infrastructure::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("An elf with this name already exists")]
    DuplicateName,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn elf_not_found() -> Self {
        ServiceError::NotFound("Elf not found".into())
    }

    pub fn order_not_found() -> Self {
        ServiceError::NotFound("Toy order not found".into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) | ServiceError::DuplicateName => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable identifier surfaced in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::DuplicateName => "DUPLICATE_NAME",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Unique violations only arise from `elf_profiles.name`; toy order ids are
/// generated and never collide.
impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => ServiceError::DuplicateName,
            StoreError::Constraint(message) => ServiceError::Validation(message),
            StoreError::NotFound => ServiceError::NotFound("not found".into()),
            StoreError::Database(err) => {
                warn!(error = ?err, "store operation failed");
                ServiceError::Internal(err.to_string())
            }
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::from(err).into()
    }
}
