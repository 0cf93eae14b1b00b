use super::vocabulary::{extract_skills_from_text, skill_weight};

const PARTIAL_MATCH_CREDIT: f64 = 0.7;

/// Weighted overlap between a user's declared skills and the skill terms
/// mentioned in a job's requirements text.
///
/// Each extracted job skill contributes its importance weight to the
/// denominator; an exact (case-insensitive) match recovers the full weight,
/// a partial match (either string contains the other) recovers 70% of it.
/// Returns 0.0 when the user declares no skills, the requirements text is
/// missing, or no vocabulary term appears in it.
pub fn skills_score(user_skills: &[String], job_requirements: Option<&str>) -> f64 {
    let Some(requirements) = job_requirements.filter(|text| !text.is_empty()) else {
        return 0.0;
    };
    if user_skills.is_empty() {
        return 0.0;
    }

    let job_skills = extract_skills_from_text(requirements);
    let user_skills_lower: Vec<String> =
        user_skills.iter().map(|skill| skill.to_lowercase()).collect();

    let mut match_count = 0.0;
    let mut total_weight = 0.0;

    for job_skill in job_skills {
        let weight = skill_weight(job_skill);
        total_weight += weight;

        if user_skills_lower.iter().any(|user| user == job_skill) {
            match_count += weight;
        } else if user_skills_lower
            .iter()
            .any(|user| user.contains(job_skill) || job_skill.contains(user.as_str()))
        {
            match_count += weight * PARTIAL_MATCH_CREDIT;
        }
    }

    if total_weight > 0.0 {
        match_count / total_weight
    } else {
        0.0
    }
}
