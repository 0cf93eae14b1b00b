use std::collections::HashMap;
use std::sync::LazyLock;

/// Skill terms recognized in requirement blurbs and search queries.
/// Matching is plain substring containment on lower-cased text; no stemming
/// and no synonym resolution.
pub const SKILL_VOCABULARY: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node.js",
    "angular",
    "vue.js",
    "html",
    "css",
    "typescript",
    "php",
    "c++",
    "c#",
    "ruby",
    "go",
    "rust",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "linux",
    "agile",
    "scrum",
    "devops",
    "machine learning",
    "ai",
    "data science",
    "blockchain",
    "cybersecurity",
];

const HIGH_IMPORTANCE: &[&str] = &["javascript", "python", "react", "node.js", "sql"];
const MEDIUM_IMPORTANCE: &[&str] = &["html", "css", "git", "agile"];

pub const HIGH_WEIGHT: f64 = 1.0;
pub const MEDIUM_WEIGHT: f64 = 0.7;
pub const LOW_WEIGHT: f64 = 0.5;

static SKILL_WEIGHTS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut weights = HashMap::with_capacity(SKILL_VOCABULARY.len());
    for &skill in SKILL_VOCABULARY {
        weights.insert(skill, LOW_WEIGHT);
    }
    for &skill in MEDIUM_IMPORTANCE {
        weights.insert(skill, MEDIUM_WEIGHT);
    }
    for &skill in HIGH_IMPORTANCE {
        weights.insert(skill, HIGH_WEIGHT);
    }
    weights
});

/// Vocabulary terms contained in `text`, in vocabulary order. Cost is linear
/// in vocabulary size times text length, so arbitrarily large input is fine.
pub fn extract_skills_from_text(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| text.contains(skill))
        .collect()
}

/// Importance weight for a skill term. Terms outside the vocabulary get the
/// low weight.
pub fn skill_weight(skill: &str) -> f64 {
    SKILL_WEIGHTS.get(skill).copied().unwrap_or(LOW_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_terms_in_vocabulary_order() {
        let skills = extract_skills_from_text("Senior React engineer, SQL and Docker required");
        assert_eq!(skills, vec!["react", "sql", "docker"]);
    }

    #[test]
    fn containment_is_substring_based() {
        // "javascript" in the text also matches the shorter "java" term.
        let skills = extract_skills_from_text("javascript developer");
        assert_eq!(skills, vec!["javascript", "java"]);
    }

    #[test]
    fn empty_text_extracts_nothing() {
        assert!(extract_skills_from_text("").is_empty());
        assert!(extract_skills_from_text("florist with customer focus").is_empty());
    }

    #[test]
    fn weight_tiers() {
        assert_eq!(skill_weight("python"), HIGH_WEIGHT);
        assert_eq!(skill_weight("css"), MEDIUM_WEIGHT);
        assert_eq!(skill_weight("docker"), LOW_WEIGHT);
        assert_eq!(skill_weight("basket weaving"), LOW_WEIGHT);
    }
}
