//! Application use cases. Orchestrate domain logic via ports.

pub mod auth_service;
pub mod survey_service;

pub use auth_service::AuthService;
pub use survey_service::{SubmitOutcome, Submission, SurveyService};
