pub mod contact_service;
pub mod profile_service;

pub use contact_service::ContactService;
pub use profile_service::ProfileService;

use crate::database::DatabaseError;

/// Business-rule failures. Converted to `ApiError` at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Trimmed value of a required text field, or `None` when absent or blank.
pub(crate) fn required_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Trimmed value of an optional text field; present-but-blank is an error.
pub(crate) fn optional_text(value: Option<String>, field: &str) -> Result<Option<String>, ServiceError> {
    match value {
        None => Ok(None),
        Some(v) => required_text(Some(&v))
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("{field} cannot be empty"))),
    }
}
