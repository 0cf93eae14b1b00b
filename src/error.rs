use thiserror::Error;

/// Failure of an external user/job/application/event store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to map stored record: {0}")]
    Mapping(String),
}

/// Engine-level errors surfaced to callers.
///
/// The not-found variants map to a 4xx at the transport layer and are not
/// retried; `Upstream` is transient and the caller may retry the whole
/// request. Cache trouble never appears here: the cache seam is infallible
/// and an unavailable backend silently degrades to recompute-always.
#[derive(Debug, Error)]
pub enum RecoError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("job not found: {0}")]
    JobNotFound(String),
    #[error("upstream store failure: {0}")]
    Upstream(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert_to_upstream() {
        let err: RecoError = StoreError::Unavailable("jobs".into()).into();
        assert!(matches!(err, RecoError::Upstream(_)));
        assert!(err.to_string().contains("jobs"));
    }
}
