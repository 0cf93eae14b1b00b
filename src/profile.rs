use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::error::RecoError;
use crate::matching::extract_skills_from_text;
use crate::store::{ApplicationStore, EventStore, UserStore};
use crate::{
    AnalyticsEvent, Application, CareerPreferences, EventKind, Experience, SalaryRange,
};

/// Wide fallback band when neither stated preferences nor application
/// history say anything about pay. Its zero minimum makes the salary
/// dimension score neutral.
const DEFAULT_SALARY_RANGE: SalaryRange = SalaryRange {
    min: 0.0,
    max: 1_000_000.0,
};

const TOP_JOB_TYPES: usize = 3;

/// Derived, ephemeral snapshot of a user's preferences and history, used
/// only for scoring. Rebuilt per request; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub skills: Vec<String>,
    pub experience: Experience,
    pub location: Option<String>,
    pub career_preferences: CareerPreferences,
    /// Top job types by application frequency, at most three.
    pub preferred_job_types: Vec<String>,
    /// Company ids the user has applied to.
    pub preferred_companies: HashSet<String>,
    /// Skill terms seen in applied-job requirements and search queries.
    pub preferred_skills: HashSet<String>,
    /// Always populated; min <= max once defaulted.
    pub salary_range: SalaryRange,
    /// Recent search/view events, most recent first, bounded by the store.
    pub search_history: Vec<AnalyticsEvent>,
    /// Anchor for the recent-activity window.
    pub built_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Application history depth considered for preference derivation.
    pub max_applications: usize,
    /// Search/view history depth.
    pub max_events: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            max_applications: 50,
            max_events: 100,
        }
    }
}

impl ProfileConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_applications: std::env::var("RECO_MAX_APPLICATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_applications),
            max_events: std::env::var("RECO_MAX_EVENTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_events),
        }
    }
}

/// Aggregates the stored user record, application history, and recent
/// search/view events into one scoring snapshot.
pub struct ProfileBuilder {
    users: Arc<dyn UserStore>,
    applications: Arc<dyn ApplicationStore>,
    events: Arc<dyn EventStore>,
    config: ProfileConfig,
}

impl ProfileBuilder {
    pub fn new(
        users: Arc<dyn UserStore>,
        applications: Arc<dyn ApplicationStore>,
        events: Arc<dyn EventStore>,
        config: ProfileConfig,
    ) -> Self {
        Self {
            users,
            applications,
            events,
            config,
        }
    }

    /// Builds a fresh profile. Fails with `UserNotFound` when the id does
    /// not resolve and propagates store failures; empty histories simply
    /// yield empty derived preferences.
    #[instrument(skip(self))]
    pub async fn build(&self, user_id: &str) -> Result<UserProfile, RecoError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| RecoError::UserNotFound(user_id.to_string()))?;

        let applications = self
            .applications
            .find_by_applicant(user_id, self.config.max_applications)
            .await?;
        let search_history = self
            .events
            .find_recent(
                user_id,
                &[EventKind::JobSearch, EventKind::JobView],
                self.config.max_events,
            )
            .await?;

        let salary_range =
            extract_salary_preferences(&applications, &user.career_preferences);

        Ok(UserProfile {
            user_id: user.id,
            skills: user.skills,
            experience: user.experience,
            location: user.location,
            preferred_job_types: extract_job_type_preferences(&applications),
            preferred_companies: extract_company_preferences(&applications),
            preferred_skills: extract_skill_preferences(&applications, &search_history),
            salary_range,
            career_preferences: user.career_preferences,
            search_history,
            built_at: Utc::now(),
        })
    }
}

/// Top job types among applied jobs, by frequency; ties keep first-seen
/// order so repeated builds agree.
fn extract_job_type_preferences(applications: &[Application]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for application in applications {
        let Some(job_type) = application
            .job
            .as_ref()
            .and_then(|job| job.job_type.as_deref())
        else {
            continue;
        };
        match counts.iter_mut().find(|(seen, _)| seen.as_str() == job_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((job_type.to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_JOB_TYPES)
        .map(|(job_type, _)| job_type)
        .collect()
}

fn extract_company_preferences(applications: &[Application]) -> HashSet<String> {
    applications
        .iter()
        .filter_map(|application| {
            application
                .job
                .as_ref()
                .and_then(|job| job.company_id.clone())
        })
        .collect()
}

fn extract_skill_preferences(
    applications: &[Application],
    search_history: &[AnalyticsEvent],
) -> HashSet<String> {
    let mut skills = HashSet::new();

    for application in applications {
        if let Some(requirements) = application
            .job
            .as_ref()
            .and_then(|job| job.requirements.as_deref())
        {
            skills.extend(
                extract_skills_from_text(requirements)
                    .into_iter()
                    .map(str::to_string),
            );
        }
    }

    for event in search_history {
        if let Some(query) = event.query.as_deref() {
            skills.extend(extract_skills_from_text(query).into_iter().map(str::to_string));
        }
    }

    skills
}

/// Stated expectation wins; otherwise average the applied-job bands
/// (imputing a missing upper bound as 1.2x the lower); otherwise the wide
/// default. The result always satisfies min <= max.
fn extract_salary_preferences(
    applications: &[Application],
    preferences: &CareerPreferences,
) -> SalaryRange {
    if let Some(expectation) = &preferences.salary_expectation {
        return SalaryRange {
            min: expectation.min,
            max: expectation.max.max(expectation.min),
        };
    }

    let bands: Vec<(f64, f64)> = applications
        .iter()
        .filter_map(|application| application.job.as_ref())
        .filter_map(|job| {
            let min = job.salary_from.filter(|v| *v > 0.0)?;
            let max = job.salary_to.filter(|v| *v > 0.0).unwrap_or(min * 1.2);
            Some((min, max))
        })
        .collect();

    if bands.is_empty() {
        return DEFAULT_SALARY_RANGE;
    }

    let count = bands.len() as f64;
    let min = bands.iter().map(|(min, _)| min).sum::<f64>() / count;
    let max = bands.iter().map(|(_, max)| max).sum::<f64>() / count;

    SalaryRange {
        min,
        max: max.max(min),
    }
}
