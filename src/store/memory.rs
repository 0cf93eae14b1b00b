//! In-memory reference implementations of the collaborator stores. Used by
//! the test suite and handy for embedding; real deployments back these
//! traits with their document database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{ApplicationStore, EventStore, JobFilter, JobStore, UserStore};
use crate::error::StoreError;
use crate::run_id;
use crate::{AnalyticsEvent, Application, EventKind, Job, NewAnalyticsEvent, User};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

/// Keeps jobs in insertion order; `find` preserves it, which is the
/// retrieval order the service's stable sort ties back to.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn insert(&self, job: Job) {
        self.jobs.lock().unwrap().push(job);
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, StoreError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| job.id == id)
            .cloned())
    }

    async fn find(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.lock().unwrap();
        let mut matched: Vec<Job> = jobs
            .iter()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }
}

#[derive(Default)]
pub struct MemoryApplicationStore {
    applications: Mutex<Vec<Application>>,
}

impl MemoryApplicationStore {
    pub fn insert(&self, application: Application) {
        self.applications.lock().unwrap().push(application);
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn find_by_applicant(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Application>, StoreError> {
        let applications = self.applications.lock().unwrap();
        let mut matched: Vec<Application> = applications
            .iter()
            .filter(|application| application.applicant_id == user_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn applied_job_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .filter(|application| application.applicant_id == user_id)
            .map(|application| application.job_id.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryEventStore {
    pub fn insert(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events_of_kind(&self, kind: EventKind) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_recent(
        &self,
        user_id: &str,
        kinds: &[EventKind],
        limit: usize,
    ) -> Result<Vec<AnalyticsEvent>, StoreError> {
        let events = self.events.lock().unwrap();
        let mut matched: Vec<AnalyticsEvent> = events
            .iter()
            .filter(|event| event.user_id == user_id && kinds.contains(&event.kind))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn record(&self, event: NewAnalyticsEvent) -> Result<(), StoreError> {
        self.events.lock().unwrap().push(AnalyticsEvent {
            id: run_id::generate(),
            user_id: event.user_id,
            kind: event.kind,
            job_id: event.job_id,
            query: event.query,
            rating: event.rating,
            comment: event.comment,
            action_taken: event.action_taken,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(user: &str, kind: EventKind, age_minutes: i64) -> AnalyticsEvent {
        AnalyticsEvent {
            id: run_id::generate(),
            user_id: user.into(),
            kind,
            job_id: None,
            query: None,
            rating: None,
            comment: None,
            action_taken: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn find_recent_orders_newest_first_and_limits() {
        let store = MemoryEventStore::default();
        store.insert(event("u1", EventKind::JobView, 30));
        store.insert(event("u1", EventKind::JobSearch, 10));
        store.insert(event("u1", EventKind::JobView, 20));
        store.insert(event("u2", EventKind::JobView, 5));

        let events = store
            .find_recent("u1", &[EventKind::JobSearch, EventKind::JobView], 2)
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::JobSearch);
        assert_eq!(events[1].kind, EventKind::JobView);
        assert!(events[0].created_at > events[1].created_at);
    }

    #[tokio::test]
    async fn find_recent_filters_by_kind() {
        let store = MemoryEventStore::default();
        store.insert(event("u1", EventKind::RecommendationFeedback, 1));
        store.insert(event("u1", EventKind::JobView, 2));

        let events = store
            .find_recent("u1", &[EventKind::JobView], 10)
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn job_find_preserves_insertion_order() {
        let store = MemoryJobStore::default();
        for id in ["j1", "j2", "j3"] {
            store.insert(Job {
                id: id.into(),
                is_active: true,
                ..Job::default()
            });
        }

        let filter = JobFilter {
            active_only: true,
            exclude_ids: vec!["j2".into()],
            ..JobFilter::default()
        };
        let jobs = store.find(&filter).await.unwrap();
        let ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "j3"]);
    }

    #[tokio::test]
    async fn applications_order_newest_first() {
        let store = MemoryApplicationStore::default();
        for (id, age) in [("a1", 30), ("a2", 10), ("a3", 20)] {
            store.insert(Application {
                id: id.into(),
                applicant_id: "u1".into(),
                job_id: format!("job-{id}"),
                job: None,
                created_at: Utc::now() - Duration::minutes(age),
            });
        }

        let applications = store.find_by_applicant("u1", 2).await.unwrap();
        let ids: Vec<_> = applications.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3"]);

        let job_ids = store.applied_job_ids("u1").await.unwrap();
        assert_eq!(job_ids.len(), 3);
    }
}
