use padikk_auth::{AuthSession, Authenticator, User};
use padikk_database::{Profile, ProfileRepository};
use tracing::info;

use super::error::ServiceResult;

pub async fn sign_up(
    authenticator: &Authenticator,
    email: &str,
    password: &str,
) -> ServiceResult<(AuthSession, User)> {
    let (user, session) = authenticator.sign_up(email, password).await?;
    info!(user = %user.public_id, "account created");
    Ok((session, user))
}

pub async fn login(
    authenticator: &Authenticator,
    email: &str,
    password: &str,
) -> ServiceResult<(AuthSession, User)> {
    let session = authenticator.login_with_password(email, password).await?;
    let user = authenticator.user_profile(session.user_id).await?;
    info!(user = %user.public_id, "signed in");
    Ok((session, user))
}

pub async fn logout(authenticator: &Authenticator, token: &str) -> ServiceResult<()> {
    authenticator.logout(token).await?;
    Ok(())
}

/// The account behind `token` and its profile, if one has been completed.
pub async fn current_session(
    authenticator: &Authenticator,
    profiles: &ProfileRepository,
    token: &str,
) -> ServiceResult<(User, AuthSession, Option<Profile>)> {
    let (user, session) = authenticator.authenticate_token(token).await?;
    let profile = profiles.find_by_user_id(user.id).await?;
    Ok((user, session, profile))
}
