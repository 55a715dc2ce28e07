use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::ApiError;

pub mod alumni;
pub mod auth;
pub mod catch_up;
pub mod health;
pub mod mentor_tools;
pub mod mentorship;
pub mod profile;
pub mod projects;
pub mod semsense;
pub mod study;

/// JSON request body whose parse failures become the usual error envelope.
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}
