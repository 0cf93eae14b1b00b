pub mod location;
pub mod scoring;
pub mod skills;
pub mod vocabulary;
pub mod weights;

pub use location::location_score;
pub use scoring::{
    activity_score, experience_score, job_type_score, salary_score, JobScore, MatchReason,
    RecommendationScorer, ScoreBreakdown, ScorerConfig,
};
pub use skills::skills_score;
pub use vocabulary::{extract_skills_from_text, skill_weight};
pub use weights::{Weights, RECOMMENDATION_WEIGHTS};
