//! Database repository implementations

pub mod alumni_repository;
pub mod catch_up_repository;
pub mod connection_repository;
pub mod playbook_repository;
pub mod profile_repository;
pub mod project_repository;
pub mod pulse_repository;
pub mod study_log_repository;

// Re-export all repositories for convenience
pub use alumni_repository::*;
pub use catch_up_repository::*;
pub use connection_repository::*;
pub use playbook_repository::*;
pub use profile_repository::*;
pub use project_repository::*;
pub use pulse_repository::*;
pub use study_log_repository::*;
