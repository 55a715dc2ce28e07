use std::sync::Arc;

use axum::http::HeaderMap;
use padikk_auth::{AuthSession, Authenticator, User};
use padikk_database::{
    AlumniRepository, CatchUpRepository, ConnectionRepository, PlaybookRepository, Profile,
    ProfileRepository, ProjectRepository, PulseRepository, StudyLogRepository,
};
use padikk_semsense::SemSense;
use sqlx::SqlitePool;

use crate::{util::require_bearer, ApiError};

#[derive(Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    authenticator: Authenticator,
    semsense: SemSense,
    allowed_origins: Arc<[String]>,
}

/// The authenticated caller together with their completed profile.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User,
    pub session: AuthSession,
    pub profile: Profile,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, authenticator: Authenticator, semsense: SemSense) -> Self {
        Self {
            db_pool,
            authenticator,
            semsense,
            allowed_origins: Arc::from(Vec::new()),
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = Arc::from(origins);
        self
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn semsense(&self) -> &SemSense {
        &self.semsense
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.db_pool.clone())
    }

    pub fn study_logs(&self) -> StudyLogRepository {
        StudyLogRepository::new(self.db_pool.clone())
    }

    pub fn connections(&self) -> ConnectionRepository {
        ConnectionRepository::new(self.db_pool.clone())
    }

    pub fn catch_up(&self) -> CatchUpRepository {
        CatchUpRepository::new(self.db_pool.clone())
    }

    pub fn playbooks(&self) -> PlaybookRepository {
        PlaybookRepository::new(self.db_pool.clone())
    }

    pub fn pulse(&self) -> PulseRepository {
        PulseRepository::new(self.db_pool.clone())
    }

    pub fn alumni(&self) -> AlumniRepository {
        AlumniRepository::new(self.db_pool.clone())
    }

    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.db_pool.clone())
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }

    /// Resolve the bearer token and load the caller's profile.
    ///
    /// Accounts that have not completed their profile get a 404 so the client
    /// can send them to the profile form.
    pub async fn caller(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        let token = require_bearer(headers)?;
        let (user, session) = self.authenticate(&token).await?;

        let profile = self
            .profiles()
            .find_by_user_id(user.id)
            .await?
            .ok_or_else(|| ApiError::not_found("Profile not completed"))?;

        Ok(Caller {
            user,
            session,
            profile,
        })
    }
}
