pub mod alumni;
pub mod auth;
pub mod catch_up;
pub mod error;
pub mod mentor_tools;
pub mod mentorship;
pub mod profile;
pub mod projects;
pub mod study;

pub use error::*;
