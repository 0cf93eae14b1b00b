pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::{AnalyticsEvent, Application, EventKind, Job, NewAnalyticsEvent, User};

/// Criteria for "jobs like this one". Conditions are OR-ed together, the way
/// a document store would evaluate them in one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarJobQuery {
    /// First keyword of the target title, matched case-insensitively
    /// anywhere in a candidate title.
    pub title_keyword: Option<String>,
    pub company_id: Option<String>,
    /// Acceptable salary_from band, inclusive.
    pub salary_band: Option<(f64, f64)>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl SimilarJobQuery {
    /// Derives the similarity criteria from a target job: shared title
    /// keyword, company, +-20% salary band, location, or job type.
    pub fn for_job(job: &Job) -> Self {
        Self {
            title_keyword: job
                .title
                .split_whitespace()
                .next()
                .map(|word| word.to_lowercase()),
            company_id: job.company_id.clone(),
            salary_band: job
                .salary_from
                .map(|from| (from * 0.8, from * 1.2)),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(keyword) = &self.title_keyword {
            if job.title.to_lowercase().contains(keyword) {
                return true;
            }
        }
        if self.company_id.is_some() && job.company_id == self.company_id {
            return true;
        }
        if let (Some((low, high)), Some(from)) = (self.salary_band, job.salary_from) {
            if from >= low && from <= high {
                return true;
            }
        }
        if self.location.is_some() && job.location == self.location {
            return true;
        }
        if self.job_type.is_some() && job.job_type == self.job_type {
            return true;
        }
        false
    }
}

/// Declarative job query; backends translate this into their native filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub active_only: bool,
    pub exclude_ids: Vec<String>,
    pub similar_to: Option<SimilarJobQuery>,
    pub limit: Option<usize>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if self.active_only && !job.is_active {
            return false;
        }
        if self.exclude_ids.iter().any(|id| id == &job.id) {
            return false;
        }
        if let Some(similar) = &self.similar_to {
            if !similar.matches(job) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, StoreError>;

    /// Jobs matching the filter, in the backend's retrieval order. That
    /// order is the tie-breaker for equal scores downstream, so it must be
    /// stable for identical underlying data.
    async fn find(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Most recent applications first, job snippet populated.
    async fn find_by_applicant(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Application>, StoreError>;

    /// Ids of every job the user has applied to, without a depth limit.
    async fn applied_job_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Most recent events of the given kinds first.
    async fn find_recent(
        &self,
        user_id: &str,
        kinds: &[EventKind],
        limit: usize,
    ) -> Result<Vec<AnalyticsEvent>, StoreError>;

    async fn record(&self, event: NewAnalyticsEvent) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> Job {
        Job {
            id: id.into(),
            title: "Backend Engineer".into(),
            description: String::new(),
            location: Some("Nairobi".into()),
            job_type: Some("Full-time".into()),
            salary_from: Some(100_000.0),
            company_id: Some("acme".into()),
            is_active: true,
            ..Job::default()
        }
    }

    #[test]
    fn filter_excludes_inactive_and_listed_ids() {
        let filter = JobFilter {
            active_only: true,
            exclude_ids: vec!["j2".into()],
            ..JobFilter::default()
        };

        let mut inactive = job("j1");
        inactive.is_active = false;
        assert!(!filter.matches(&inactive));
        assert!(!filter.matches(&job("j2")));
        assert!(filter.matches(&job("j3")));
    }

    #[test]
    fn similarity_is_an_or_over_criteria() {
        let target = job("target");
        let query = SimilarJobQuery::for_job(&target);

        let mut by_title = job("a");
        by_title.title = "Backend Developer".into();
        by_title.company_id = Some("other".into());
        by_title.location = Some("Kisumu".into());
        by_title.job_type = Some("Contract".into());
        by_title.salary_from = Some(300_000.0);
        assert!(query.matches(&by_title));

        let mut by_salary = by_title.clone();
        by_salary.title = "Data Analyst".into();
        by_salary.salary_from = Some(110_000.0);
        assert!(query.matches(&by_salary));

        let mut unrelated = by_title.clone();
        unrelated.title = "Data Analyst".into();
        assert!(!query.matches(&unrelated));
    }

    #[test]
    fn similarity_criteria_come_from_the_target() {
        let query = SimilarJobQuery::for_job(&job("target"));
        assert_eq!(query.title_keyword.as_deref(), Some("backend"));
        assert_eq!(query.company_id.as_deref(), Some("acme"));
        let (low, high) = query.salary_band.unwrap();
        assert!((low - 80_000.0).abs() < 1e-6);
        assert!((high - 120_000.0).abs() < 1e-6);
    }
}
