use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::weights::{Weights, RECOMMENDATION_WEIGHTS};
use super::{location_score, skills_score};
use crate::profile::UserProfile;
use crate::{AnalyticsEvent, EventKind, Job, SalaryRange};

const REASON_THRESHOLD: f64 = 0.7;
const LOCATION_REASON_THRESHOLD: f64 = 0.8;

const VIEW_BONUS: f64 = 0.1;
const SEARCH_BONUS: f64 = 0.15;

/// Ordinal for an experience level name; unrecognized levels land on mid.
fn experience_ordinal(level: &str) -> i32 {
    match level.to_lowercase().as_str() {
        "entry" => 1,
        "mid" => 2,
        "senior" => 3,
        "lead" => 4,
        "executive" => 5,
        _ => 2,
    }
}

/// Distance between the user's level and the job's requested level, mapped
/// onto a coarse score ladder. Missing input on either side is neutral.
pub fn experience_score(user_level: Option<&str>, job_level: Option<&str>) -> f64 {
    let (Some(user), Some(job)) = (
        user_level.filter(|s| !s.is_empty()),
        job_level.filter(|s| !s.is_empty()),
    ) else {
        return 0.5;
    };

    match (experience_ordinal(user) - experience_ordinal(job)).abs() {
        0 => 1.0,
        1 => 0.8,
        2 => 0.6,
        _ => 0.3,
    }
}

/// Overlap of the job's pay band with the user's expected band.
///
/// A zero or missing minimum on either side counts as unstated and scores
/// neutral; that covers the wide default profile range, whose minimum is 0.
/// Unset maxima are imputed (job: min x 1.2, user: min x 1.5). A job paying
/// entirely below expectation is penalized by relative gap; one paying
/// entirely above scores a flat 0.5.
pub fn salary_score(user_range: &SalaryRange, job_from: Option<f64>, job_to: Option<f64>) -> f64 {
    let Some(job_min) = job_from.filter(|v| *v > 0.0) else {
        return 0.5;
    };
    let user_min = user_range.min;
    if user_min <= 0.0 {
        return 0.5;
    }

    let user_max = if user_range.max > 0.0 {
        user_range.max
    } else {
        user_min * 1.5
    };
    let job_max = job_to.filter(|v| *v > 0.0).unwrap_or(job_min * 1.2);

    if job_max >= user_min && job_min <= user_max {
        let overlap = job_max.min(user_max) - job_min.max(user_min);
        let user_range_size = user_max - user_min;
        return (overlap / user_range_size).min(1.0);
    }

    if job_max < user_min {
        let gap = user_min - job_max;
        return (1.0 - gap / user_min).max(0.0);
    }

    // Pays more than expected.
    0.5
}

/// Full credit when the job type equals any preferred type; weak otherwise.
/// No stated preference (or no job type) is neutral.
pub fn job_type_score(preferred_types: &[String], job_type: Option<&str>) -> f64 {
    let Some(job_type) = job_type.filter(|s| !s.is_empty()) else {
        return 0.5;
    };
    if preferred_types.is_empty() {
        return 0.5;
    }

    let matched = preferred_types
        .iter()
        .any(|preferred| preferred.eq_ignore_ascii_case(job_type));

    if matched {
        1.0
    } else {
        0.3
    }
}

/// Recent explicit interest in this job: +0.1 per view of the job inside the
/// window, +0.15 per search whose query appears in the title or description.
/// View repeats accumulate without a per-event cap; only the final value is
/// clamped to 1.0.
pub fn activity_score(
    events: &[AnalyticsEvent],
    job: &Job,
    now: DateTime<Utc>,
    window: Duration,
) -> f64 {
    let mut score = 0.5;
    let cutoff = now - window;

    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();

    for event in events.iter().filter(|e| e.created_at > cutoff) {
        match event.kind {
            EventKind::JobView => {
                if event.job_id.as_deref() == Some(job.id.as_str()) {
                    score += VIEW_BONUS;
                }
            }
            EventKind::JobSearch => {
                if let Some(query) = event.query.as_deref().filter(|q| !q.is_empty()) {
                    let query = query.to_lowercase();
                    if title.contains(&query) || description.contains(&query) {
                        score += SEARCH_BONUS;
                    }
                }
            }
            _ => {}
        }
    }

    score.min(1.0)
}

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub weights: Weights,
    pub activity_window_days: i64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weights: RECOMMENDATION_WEIGHTS,
            activity_window_days: env_activity_window_days(),
        }
    }
}

fn env_activity_window_days() -> i64 {
    std::env::var("RECO_ACTIVITY_WINDOW_DAYS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7)
}

/// Per-dimension scores for one (profile, job) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub location: f64,
    pub experience: f64,
    pub salary: f64,
    pub job_type: f64,
    pub recent_activity: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct JobScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReason {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub score: f64,
}

/// Stateless weighted-sum scorer. Holds only the immutable weight table;
/// construct once and share by reference.
#[derive(Debug, Clone, Default)]
pub struct RecommendationScorer {
    config: ScorerConfig,
}

impl RecommendationScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn weights(&self) -> &Weights {
        &self.config.weights
    }

    /// Weighted blend of all dimensions, clamped at 1.0. The activity window
    /// is anchored on the profile's build time so a given snapshot always
    /// scores the same.
    pub fn score_job(&self, profile: &UserProfile, job: &Job) -> JobScore {
        let breakdown = ScoreBreakdown {
            skills: skills_score(&profile.skills, job.requirements.as_deref()),
            location: location_score(profile.location.as_deref(), job.location.as_deref()),
            experience: experience_score(
                profile.experience.level.as_deref(),
                job.experience_level.as_deref(),
            ),
            salary: salary_score(&profile.salary_range, job.salary_from, job.salary_to),
            job_type: job_type_score(&profile.preferred_job_types, job.job_type.as_deref()),
            recent_activity: activity_score(
                &profile.search_history,
                job,
                profile.built_at,
                Duration::days(self.config.activity_window_days),
            ),
        };

        let weights = &self.config.weights;
        let total = breakdown.skills * weights.skills
            + breakdown.location * weights.location
            + breakdown.experience * weights.experience
            + breakdown.salary * weights.salary
            + breakdown.job_type * weights.job_type
            + breakdown.recent_activity * weights.recent_activity;

        JobScore {
            total: total.min(1.0),
            breakdown,
        }
    }

    /// Human-readable reasons for dimensions that cleared their threshold.
    /// Location uses a stricter bar: it is near-binary in practice (same
    /// city or remote), the other dimensions are continuous.
    pub fn match_reasons(&self, breakdown: &ScoreBreakdown) -> Vec<MatchReason> {
        let mut reasons = Vec::new();

        if breakdown.skills > REASON_THRESHOLD {
            reasons.push(MatchReason {
                kind: "skills".into(),
                message: "Strong skills match".into(),
                score: breakdown.skills,
            });
        }
        if breakdown.location > LOCATION_REASON_THRESHOLD {
            reasons.push(MatchReason {
                kind: "location".into(),
                message: "Location preference match".into(),
                score: breakdown.location,
            });
        }
        if breakdown.experience > REASON_THRESHOLD {
            reasons.push(MatchReason {
                kind: "experience".into(),
                message: "Experience level match".into(),
                score: breakdown.experience,
            });
        }
        if breakdown.salary > REASON_THRESHOLD {
            reasons.push(MatchReason {
                kind: "salary".into(),
                message: "Salary expectation match".into(),
                score: breakdown.salary,
            });
        }

        reasons
    }
}
