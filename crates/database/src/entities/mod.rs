//! Domain entities for the database layer
//!
//! Row types, request payloads and the pure rules that operate on them.

pub mod catch_up;
pub mod connection;
pub mod growth;
pub mod playbook;
pub mod profile;
pub mod project;
pub mod pulse;
pub mod recommendation;
pub mod roadmap;
pub mod streak;
pub mod study_log;

pub use catch_up::{
    default_roadmap, progress_percent, simulate, CatchUpPlan, CreatePlanRequest,
    CreateTaskRequest, PlanStatus, RoadmapTask, SimulationInput, SimulationResult,
};
pub use connection::{
    message_preview, ConnectionStatus, ConnectionSummary, CreateConnectionRequest, Mentee,
    MentorshipConnection, Relationship,
};
pub use growth::{monthly_growth, GrowthPoint};
pub use playbook::{
    duplicate_title, is_known_category, CreatePlaybookRequest, MentorPlaybook, PLAYBOOK_CATEGORIES,
};
pub use profile::{
    achievements, normalize_tags, Achievement, CreateProfileRequest, Profile, ProfileRole,
    ProfileStats, UpdateProfileRequest,
};
pub use project::{non_blank, ProjectRequest, StudentProject, TechnologyInput};
pub use pulse::{
    week_starting, BatchPulseEntry, PulseBoardEntry, PulseCheckin, PulseStatus, PulseUpdate,
};
pub use recommendation::{CreateRecommendationRequest, Priority, SkillRecommendation};
pub use roadmap::{skill_gaps, student_year, AlumniRoadmap, CreateRoadmapRequest};
pub use streak::UserStreak;
pub use study_log::{CreateStudyLogRequest, FeedEntry, StudyLog, StudySummary};
