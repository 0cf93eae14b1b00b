use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::cache::{recommendations_key, RecommendationCache};
use crate::error::RecoError;
use crate::matching::{MatchReason, RecommendationScorer, ScoreBreakdown};
use crate::profile::{ProfileBuilder, UserProfile};
use crate::run_id;
use crate::store::{ApplicationStore, JobFilter, JobStore, SimilarJobQuery};
use crate::{Experience, Job, SalaryRange};

/// One scored candidate in a recommendation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredJob {
    pub job: Job,
    pub score: f64,
    pub match_reasons: Vec<MatchReason>,
}

/// Per-dimension view of a single recommendation, for the "why this job"
/// surface. Uses the same weights and profile rules as the ranked list.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationExplanation {
    pub job_id: String,
    pub job_title: String,
    pub score: f64,
    pub match_reasons: Vec<MatchReason>,
    pub breakdown: ScoreBreakdown,
    pub user_factors: UserFactors,
}

/// The profile inputs that drove the score.
#[derive(Debug, Clone, Serialize)]
pub struct UserFactors {
    pub skills: Vec<String>,
    pub experience: Experience,
    pub location: Option<String>,
    pub preferred_job_types: Vec<String>,
    pub salary_range: SalaryRange,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_limit: usize,
    pub cache_ttl: Duration,
    /// Similar-job candidates fetched per returned result.
    pub similar_fetch_multiplier: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            cache_ttl: Duration::from_secs(3600),
            similar_fetch_multiplier: 2,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_limit: std::env::var("RECO_DEFAULT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_limit),
            cache_ttl: std::env::var("RECO_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            similar_fetch_multiplier: defaults.similar_fetch_multiplier,
        }
    }
}

/// Orchestrates profile building, candidate loading, scoring, ranking, and
/// caching for one user at a time.
pub struct RecommendationService {
    profiles: ProfileBuilder,
    jobs: Arc<dyn JobStore>,
    applications: Arc<dyn ApplicationStore>,
    cache: Arc<dyn RecommendationCache>,
    scorer: RecommendationScorer,
    config: ServiceConfig,
}

impl RecommendationService {
    pub fn new(
        profiles: ProfileBuilder,
        jobs: Arc<dyn JobStore>,
        applications: Arc<dyn ApplicationStore>,
        cache: Arc<dyn RecommendationCache>,
        scorer: RecommendationScorer,
        config: ServiceConfig,
    ) -> Self {
        Self {
            profiles,
            jobs,
            applications,
            cache,
            scorer,
            config,
        }
    }

    /// Ranked recommendations for one user. Serves the cached set when one
    /// is present and unexpired; otherwise recomputes, caches, and returns.
    /// All-or-nothing: any store failure fails the whole request.
    #[instrument(skip(self))]
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredJob>, RecoError> {
        let cache_key = recommendations_key(user_id);
        if let Some(raw) = self.cache.get(&cache_key).await {
            if let Ok(cached) = serde_json::from_str::<Vec<ScoredJob>>(&raw) {
                debug!(user_id, count = cached.len(), "serving recommendations from cache");
                return Ok(cached);
            }
        }

        let recommendations = self.compute_recommendations(user_id, limit).await?;

        if let Ok(raw) = serde_json::to_string(&recommendations) {
            self.cache.set(&cache_key, raw, self.config.cache_ttl).await;
        }

        Ok(recommendations)
    }

    async fn compute_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredJob>, RecoError> {
        let profile = self.profiles.build(user_id).await?;

        let applied = self.applications.applied_job_ids(user_id).await?;
        let candidates = self
            .jobs
            .find(&JobFilter {
                active_only: true,
                exclude_ids: applied,
                ..JobFilter::default()
            })
            .await?;

        let mut scored = self.score_candidates(&profile, candidates);
        sort_by_score(&mut scored);
        scored.truncate(limit);

        debug!(user_id, count = scored.len(), "computed recommendations");
        Ok(scored)
    }

    /// Scores candidates independently across available cores. Collection
    /// preserves the candidate order, which the stable sort relies on.
    fn score_candidates(&self, profile: &UserProfile, candidates: Vec<Job>) -> Vec<ScoredJob> {
        candidates
            .into_par_iter()
            .map(|job| {
                let score = self.scorer.score_job(profile, &job);
                let match_reasons = self.scorer.match_reasons(&score.breakdown);
                ScoredJob {
                    job,
                    score: score.total,
                    match_reasons,
                }
            })
            .collect()
    }

    /// Drops the user's cached set. Idempotent; safe when nothing is cached.
    pub async fn clear_user_cache(&self, user_id: &str) {
        self.cache.del(&recommendations_key(user_id)).await;
    }

    /// Forced recompute after a preference change: clears the cached set and
    /// builds a fresh one.
    pub async fn refresh_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredJob>, RecoError> {
        self.clear_user_cache(user_id).await;
        self.get_recommendations(user_id, limit).await
    }

    /// Recomputes one job's score with the per-dimension breakdown, without
    /// touching the cache, so the numbers line up with the list the user saw.
    #[instrument(skip(self))]
    pub async fn get_recommendation_explanation(
        &self,
        user_id: &str,
        job_id: &str,
    ) -> Result<RecommendationExplanation, RecoError> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| RecoError::JobNotFound(job_id.to_string()))?;
        let profile = self.profiles.build(user_id).await?;

        let score = self.scorer.score_job(&profile, &job);
        let match_reasons = self.scorer.match_reasons(&score.breakdown);

        Ok(RecommendationExplanation {
            job_id: job.id,
            job_title: job.title,
            score: score.total,
            match_reasons,
            breakdown: score.breakdown,
            user_factors: UserFactors {
                skills: profile.skills,
                experience: profile.experience,
                location: profile.location,
                preferred_job_types: profile.preferred_job_types,
                salary_range: profile.salary_range,
            },
        })
    }

    /// Active jobs sharing a title keyword, company, salary band, location,
    /// or job type with the target, scored against the requesting user's
    /// profile exactly like recommendations.
    #[instrument(skip(self))]
    pub async fn get_similar_jobs(
        &self,
        job_id: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredJob>, RecoError> {
        let target = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| RecoError::JobNotFound(job_id.to_string()))?;
        let profile = self.profiles.build(user_id).await?;

        let candidates = self
            .jobs
            .find(&JobFilter {
                active_only: true,
                exclude_ids: vec![target.id.clone()],
                similar_to: Some(SimilarJobQuery::for_job(&target)),
                limit: Some(limit * self.config.similar_fetch_multiplier),
            })
            .await?;

        let mut scored = self.score_candidates(&profile, candidates);
        sort_by_score(&mut scored);
        scored.truncate(limit);

        Ok(scored)
    }

    /// Recommendations for many users; one user's failure is logged and
    /// recorded as an empty list so the rest of the batch is unaffected.
    #[instrument(skip(self, user_ids), fields(run_id = run_id::get(), users = user_ids.len()))]
    pub async fn batch_generate_recommendations(
        &self,
        user_ids: &[String],
    ) -> HashMap<String, Vec<ScoredJob>> {
        let mut results = HashMap::with_capacity(user_ids.len());

        for user_id in user_ids {
            match self
                .get_recommendations(user_id, self.config.default_limit)
                .await
            {
                Ok(recommendations) => {
                    results.insert(user_id.clone(), recommendations);
                }
                Err(err) => {
                    warn!(
                        user_id = %user_id,
                        error = %err,
                        "recommendation generation failed; recording empty result"
                    );
                    results.insert(user_id.clone(), Vec::new());
                }
            }
        }

        results
    }

    pub fn default_limit(&self) -> usize {
        self.config.default_limit
    }
}

/// Descending by score; the underlying stable sort keeps retrieval order
/// for equal scores, which makes repeated runs reproducible.
fn sort_by_score(scored: &mut [ScoredJob]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });
}
