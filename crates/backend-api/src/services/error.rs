use padikk_auth::AuthError;
use padikk_database::DatabaseError;

use crate::ApiError;

#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
    Database(DatabaseError),
    Auth(AuthError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Forbidden(msg) => {
                tracing::warn!(reason = %msg, "access denied");
                ApiError::forbidden(msg)
            }
            ServiceError::BadRequest(msg) => ApiError::bad_request(msg),
            ServiceError::Database(db_err) => ApiError::from(db_err),
            ServiceError::Auth(auth_err) => ApiError::from(auth_err),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        Self::Database(err)
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

/// Trimmed value of a required text field, or a 400 naming the field.
pub fn required<'a>(value: &'a str, field: &str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::bad_request(format!("{field} is required")));
    }
    Ok(trimmed)
}
