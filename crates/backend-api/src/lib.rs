mod error;
mod state;
mod util;

pub mod routes;
pub mod services;

pub use error::{ApiError, ErrorResponse};
pub use state::{AppState, Caller};

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.allowed_origins());

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/semsense-ai", post(routes::semsense::generate_plan))
        // Auth routes
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/session", get(routes::auth::session))
        // Profile routes
        .route(
            "/api/profile",
            get(routes::profile::get_profile)
                .post(routes::profile::complete_profile)
                .put(routes::profile::update_profile),
        )
        .route("/api/dashboard/stats", get(routes::profile::dashboard_stats))
        // Mentorship routes
        .route("/api/mentors", get(routes::mentorship::search_mentors))
        .route(
            "/api/mentorship/connections",
            get(routes::mentorship::list_connections).post(routes::mentorship::request_connection),
        )
        .route(
            "/api/mentorship/connections/:connection_id/accept",
            post(routes::mentorship::accept_connection),
        )
        .route(
            "/api/mentorship/connections/:connection_id/decline",
            post(routes::mentorship::decline_connection),
        )
        .route("/api/mentorship/mentees", get(routes::mentorship::list_mentees))
        // Study log and feed routes
        .route(
            "/api/study-logs",
            get(routes::study::list_logs).post(routes::study::create_log),
        )
        .route("/api/study-logs/:log_id/like", post(routes::study::toggle_like))
        .route("/api/feed", get(routes::study::feed))
        // Catch-up routes
        .route(
            "/api/catch-up-plans",
            get(routes::catch_up::list_plans).post(routes::catch_up::create_plan),
        )
        .route("/api/catch-up-plans/simulate", post(routes::catch_up::simulate))
        .route("/api/catch-up-plans/:plan_id", delete(routes::catch_up::delete_plan))
        .route("/api/catch-up-plans/:plan_id/tasks", post(routes::catch_up::add_task))
        .route(
            "/api/catch-up-plans/:plan_id/tasks/:task_id/toggle",
            post(routes::catch_up::toggle_task),
        )
        // Mentor tool routes
        .route(
            "/api/playbooks",
            get(routes::mentor_tools::list_playbooks).post(routes::mentor_tools::create_playbook),
        )
        .route(
            "/api/playbooks/:playbook_id",
            delete(routes::mentor_tools::delete_playbook),
        )
        .route(
            "/api/playbooks/:playbook_id/duplicate",
            post(routes::mentor_tools::duplicate_playbook),
        )
        .route("/api/pulse", get(routes::mentor_tools::pulse_board))
        .route("/api/pulse/batch", post(routes::mentor_tools::save_pulse_batch))
        .route("/api/pulse/:mentee_id", put(routes::mentor_tools::save_pulse))
        // Alumni tool routes
        .route(
            "/api/roadmaps",
            get(routes::alumni::list_roadmaps).post(routes::alumni::create_roadmap),
        )
        .route(
            "/api/mentees/:mentee_id/recommendations",
            get(routes::alumni::list_recommendations).post(routes::alumni::create_recommendation),
        )
        .route("/api/mentees/:mentee_id/compare", get(routes::alumni::compare_year))
        .route("/api/mentees/:mentee_id/growth", get(routes::alumni::growth))
        // Project routes
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/:project_id",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .with_state(state)
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(origin = %origin, ?error, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
