use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::WithRejection;
use padikk_auth::{AuthSession, User};
use padikk_database::Profile;
use serde::{Deserialize, Serialize};

use super::{JsonBody, SuccessResponse};
use crate::{services::auth as auth_service, util::require_bearer, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

impl SessionResponse {
    pub fn new(session: AuthSession, user: User) -> Self {
        Self {
            token: session.token,
            user: user.into(),
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.public_id,
            email: value.email,
            display_name: value.display_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateResponse {
    pub user: UserResponse,
    pub expires_at: String,
    pub profile: Option<Profile>,
}

pub async fn sign_up(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (session, user) =
        auth_service::sign_up(state.authenticator(), &payload.email, &payload.password).await?;

    Ok(Json(SessionResponse::new(session, user)))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (session, user) =
        auth_service::login(state.authenticator(), &payload.email, &payload.password).await?;

    Ok(Json(SessionResponse::new(session, user)))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    auth_service::logout(state.authenticator(), &token).await?;
    Ok(SuccessResponse::ok())
}

pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStateResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, session, profile) =
        auth_service::current_session(state.authenticator(), &state.profiles(), &token).await?;

    Ok(Json(SessionStateResponse {
        user: user.into(),
        expires_at: session.expires_at.to_rfc3339(),
        profile,
    }))
}
