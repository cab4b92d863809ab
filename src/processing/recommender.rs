//! Skill and course recommendations

use crate::config::RecommendationConfig;
use crate::processing::scoring::JobSkills;
use crate::processing::vocabulary::{Field, FIELD_KEYWORDS, FOUNDATION_SKILLS, JOB_BOARD_FALLBACK_SKILLS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Predicted career field and the courses suggested for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub field: Field,
    pub courses: Vec<String>,
}

pub struct Recommender {
    config: RecommendationConfig,
}

impl Recommender {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Core job skills the resume lacks; foundation skills when there is no job.
    pub fn recommend_skills(&self, resume_skills: &BTreeSet<String>, job: &JobSkills) -> Vec<String> {
        let candidates: BTreeSet<String> = if job.is_empty() {
            FOUNDATION_SKILLS.iter().map(|s| s.to_string()).collect()
        } else {
            job.core.clone()
        };

        candidates
            .difference(resume_skills)
            .take(self.config.max_recommended_skills)
            .cloned()
            .collect()
    }

    /// Posting skills the applicant lacks, or the fallback set when none are missing.
    pub fn recommend_job_board_skills(
        &self,
        resume_skills: &BTreeSet<String>,
        job_skills: &BTreeSet<String>,
    ) -> Vec<String> {
        let missing: Vec<String> = job_skills.difference(resume_skills).cloned().collect();

        let pool = if missing.is_empty() {
            JOB_BOARD_FALLBACK_SKILLS
                .iter()
                .map(|s| s.to_string())
                .filter(|s| !resume_skills.contains(s))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            missing
        };

        pool.into_iter().take(self.config.max_job_board_skills).collect()
    }

    /// First field whose keywords overlap the skills; software engineering otherwise.
    pub fn recommend_courses(&self, resume_skills: &BTreeSet<String>) -> CourseRecommendation {
        let field = FIELD_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| resume_skills.contains(*k)))
            .map(|(field, _)| *field)
            .unwrap_or(Field::SoftwareEngineering);

        CourseRecommendation {
            field,
            courses: field.courses().iter().map(|c| c.to_string()).collect(),
        }
    }
}
