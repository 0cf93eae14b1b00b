/// Blend weights for the recommendation score. Skills dominate, experience
/// second; recent activity acts as a tie-breaker.
pub const RECOMMENDATION_WEIGHTS: Weights = Weights {
    skills: 0.30,
    location: 0.15,
    experience: 0.20,
    salary: 0.15,
    job_type: 0.10,
    recent_activity: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub skills: f64,
    pub location: f64,
    pub experience: f64,
    pub salary: f64,
    pub job_type: f64,
    pub recent_activity: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills
            + self.location
            + self.experience
            + self.salary
            + self.job_type
            + self.recent_activity
    }
}
