use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use padikk_auth::AuthError;
use padikk_database::DatabaseError;
use padikk_semsense::{classify_failure, FailureKind, SemSenseError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
            hint: self.hint,
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(error = ?error, "internal error");
        Self::internal_server_error(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        error!(error = ?error, "auth error");
        let status = match error {
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::UserExists | AuthError::InvalidEmail | AuthError::WeakPassword { .. } => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Database(_) | AuthError::PasswordHash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, error.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        error!(error = ?error, "database error");
        match error {
            DatabaseError::NotFound(_) => Self::not_found(error.to_string()),
            DatabaseError::Duplicate(_) => Self::conflict(error.to_string()),
            DatabaseError::ValidationError(message) => Self::bad_request(message),
            DatabaseError::Forbidden(message) => Self::forbidden(message),
            DatabaseError::ConnectionError(_)
            | DatabaseError::QueryError(_)
            | DatabaseError::MigrationError(_) => {
                Self::internal_server_error("Database operation failed")
            }
        }
    }
}

impl From<SemSenseError> for ApiError {
    fn from(error: SemSenseError) -> Self {
        match error {
            SemSenseError::MissingFields => {
                warn!("semester plan request missing required fields");
                Self::bad_request(error.to_string())
            }
            SemSenseError::NotConfigured => {
                error!("semester plan requested without a Gemini API key");
                Self::internal_server_error(error.to_string())
            }
            SemSenseError::Generation(inner) => {
                let message = inner.to_string();
                error!(error = %message, "semester plan generation failed");
                match classify_failure(&message) {
                    FailureKind::InvalidApiKey => {
                        Self::internal_server_error("Gemini API key is invalid or missing")
                            .with_details(message)
                    }
                    FailureKind::RateLimited => Self::new(
                        StatusCode::TOO_MANY_REQUESTS,
                        "API rate limit exceeded. Please try again later.",
                    ),
                    FailureKind::Other => {
                        Self::internal_server_error("Failed to generate semester plan")
                            .with_details(message)
                            .with_hint("Check backend logs for more information")
                    }
                }
            }
        }
    }
}
