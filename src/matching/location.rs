/// Coarse free-text location affinity.
///
/// Exact match beats containment beats a remote-friendly job; anything else
/// is a weak 0.3. Missing input on either side is neutral.
pub fn location_score(user_location: Option<&str>, job_location: Option<&str>) -> f64 {
    let (Some(user), Some(job)) = (non_empty(user_location), non_empty(job_location)) else {
        return 0.5;
    };

    let user = user.to_lowercase();
    let job = job.to_lowercase();

    if user == job {
        return 1.0;
    }
    if user.contains(&job) || job.contains(&user) {
        return 0.8;
    }
    if job.contains("remote") {
        return 0.9;
    }

    0.3
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        assert_eq!(location_score(Some("Nairobi"), Some("nairobi")), 1.0);
    }

    #[test]
    fn containment_scores_high() {
        assert_eq!(location_score(Some("Nairobi"), Some("Nairobi, Kenya")), 0.8);
        assert_eq!(location_score(Some("Greater Nairobi"), Some("Nairobi")), 0.8);
    }

    #[test]
    fn remote_jobs_score_almost_home() {
        assert_eq!(location_score(Some("Nairobi"), Some("Remote (EMEA)")), 0.9);
    }

    #[test]
    fn different_cities_score_low() {
        assert_eq!(location_score(Some("Nairobi"), Some("Mombasa")), 0.3);
    }

    #[test]
    fn missing_side_is_neutral() {
        assert_eq!(location_score(None, Some("Nairobi")), 0.5);
        assert_eq!(location_score(Some("Nairobi"), None), 0.5);
        assert_eq!(location_score(Some("  "), Some("Nairobi")), 0.5);
    }
}
