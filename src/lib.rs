pub mod cache;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod matching;
pub mod profile;
pub mod run_id;
pub mod service;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Commonly used data models shared by the recommendation functions. These
// mirror what the external user/job/application/event stores hand back; the
// engine never writes them.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-text requirement blurb; skill terms are extracted from it.
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub company_id: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub skills: Vec<String>,
    pub experience: Experience,
    pub location: Option<String>,
    pub career_preferences: CareerPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// One of entry / mid / senior / lead / executive, free-text.
    pub level: Option<String>,
    pub years: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareerPreferences {
    pub desired_roles: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub salary_expectation: Option<SalaryExpectation>,
    pub work_types: Vec<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryExpectation {
    pub min: f64,
    pub max: f64,
    pub currency: Option<String>,
}

/// Annual salary band. A zero minimum counts as unstated when scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
    pub id: String,
    pub applicant_id: String,
    pub job_id: String,
    /// Populated job snippet (title, requirements, salary band, type, company).
    pub job: Option<Job>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    JobSearch,
    JobView,
    RecommendationFeedback,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::JobSearch => "job_search",
            EventKind::JobView => "job_view",
            EventKind::RecommendationFeedback => "recommendation_feedback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Applied,
    Saved,
    Dismissed,
    Viewed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub id: String,
    pub user_id: String,
    pub kind: EventKind,
    pub job_id: Option<String>,
    pub query: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub action_taken: Option<FeedbackAction>,
    pub created_at: DateTime<Utc>,
}

/// Event payload before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalyticsEvent {
    pub user_id: String,
    pub kind: EventKind,
    pub job_id: Option<String>,
    pub query: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub action_taken: Option<FeedbackAction>,
}
