use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::RecoError;
use crate::service::RecommendationService;
use crate::store::EventStore;
use crate::{EventKind, FeedbackAction, NewAnalyticsEvent};

/// Ratings at or above this invalidate the cached set so the next request
/// recomputes with the fresh signal.
const POSITIVE_RATING_THRESHOLD: u8 = 4;

/// A user's verdict on one recommended job.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationFeedback {
    pub job_id: String,
    /// 1 (poor) to 5 (excellent).
    pub rating: u8,
    pub comment: Option<String>,
    pub action_taken: Option<FeedbackAction>,
}

/// Records recommendation ratings and triggers cache invalidation on
/// positive ones.
pub struct FeedbackLoop {
    events: Arc<dyn EventStore>,
    service: Arc<RecommendationService>,
}

impl FeedbackLoop {
    pub fn new(events: Arc<dyn EventStore>, service: Arc<RecommendationService>) -> Self {
        Self { events, service }
    }

    /// Persists the feedback as an analytics event; a positive rating also
    /// clears the user's cached recommendations.
    #[instrument(skip(self, feedback), fields(job_id = %feedback.job_id, rating = feedback.rating))]
    pub async fn record(
        &self,
        user_id: &str,
        feedback: RecommendationFeedback,
    ) -> Result<(), RecoError> {
        let positive = feedback.rating >= POSITIVE_RATING_THRESHOLD;

        self.events
            .record(NewAnalyticsEvent {
                user_id: user_id.to_string(),
                kind: EventKind::RecommendationFeedback,
                job_id: Some(feedback.job_id),
                query: None,
                rating: Some(feedback.rating),
                comment: feedback.comment,
                action_taken: feedback.action_taken,
            })
            .await?;

        if positive {
            debug!(user_id, "positive feedback; invalidating cached recommendations");
            self.service.clear_user_cache(user_id).await;
        }

        Ok(())
    }
}
