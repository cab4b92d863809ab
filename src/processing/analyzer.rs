//! Application match analysis for job-board postings

use crate::processing::recommender::Recommender;
use crate::processing::resume_parser::ResumeProfile;
use crate::processing::scoring::Scorer;
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::vocabulary::SkillCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Match percentage from which an applicant counts as a strong fit.
const STRONG_MATCH: f64 = 80.0;
const PARTIAL_MATCH: f64 = 50.0;
/// Fewer section headings than this earns a structure hint.
const MIN_SECTION_HITS: usize = 3;

/// What a posting asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub description: String,
    pub requirements: String,
    pub required_skills: Vec<String>,
}

impl JobRequirements {
    /// Split a comma-separated skills column.
    pub fn parse_skill_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Description, requirements and skills joined into one text.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.description,
            self.requirements,
            self.required_skills.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub required: usize,
    pub matched: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationAnalysis {
    /// Job-board score, 0..=100
    pub overall_score: u8,
    pub match_percentage: f64,
    pub skills_found: usize,
    pub matched_skills_count: usize,
    pub missing_skills_count: usize,
    pub skills_breakdown: BTreeMap<SkillCategory, CategoryCoverage>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Listed skills the vocabulary does not know and so cannot match
    #[serde(default)]
    pub unrecognized_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ApplicationAnalysis {
    /// Zeroed analysis recorded when a resume could not be analyzed.
    pub fn failed(reason: &str) -> Self {
        Self {
            overall_score: 0,
            match_percentage: 0.0,
            skills_found: 0,
            matched_skills_count: 0,
            missing_skills_count: 0,
            skills_breakdown: BTreeMap::new(),
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            unrecognized_skills: Vec::new(),
            recommendations: vec![format!("Analysis failed: {}", reason)],
        }
    }
}

pub struct ApplicationAnalyzer<'a> {
    matcher: &'a SkillMatcher,
    scorer: &'a Scorer,
    recommender: &'a Recommender,
}

impl<'a> ApplicationAnalyzer<'a> {
    pub fn new(matcher: &'a SkillMatcher, scorer: &'a Scorer, recommender: &'a Recommender) -> Self {
        Self {
            matcher,
            scorer,
            recommender,
        }
    }

    /// Vocabulary skills a posting asks for.
    pub fn job_skills(&self, job: &JobRequirements) -> BTreeSet<String> {
        self.matcher.skills_from_text(&job.combined_text())
    }

    pub fn analyze(&self, profile: &ResumeProfile, job: &JobRequirements) -> ApplicationAnalysis {
        let resume_skills: BTreeSet<String> = profile.skills.iter().cloned().collect();
        let job_skills = self.job_skills(job);

        let matched: Vec<String> = job_skills.intersection(&resume_skills).cloned().collect();
        let missing: Vec<String> = job_skills.difference(&resume_skills).cloned().collect();

        let unrecognized: Vec<String> = job
            .required_skills
            .iter()
            .map(|s| self.matcher.canonicalize(s))
            .filter(|s| !s.is_empty() && !self.matcher.vocabulary().is_known(s))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let match_percentage = if job_skills.is_empty() {
            0.0
        } else {
            (matched.len() as f64 / job_skills.len() as f64 * 1000.0).round() / 10.0
        };

        let mut skills_breakdown: BTreeMap<SkillCategory, CategoryCoverage> = BTreeMap::new();
        for skill in &job_skills {
            let category = self.matcher.category_of(skill).unwrap_or(SkillCategory::Custom);
            let coverage = skills_breakdown.entry(category).or_default();
            coverage.required += 1;
            if resume_skills.contains(skill) {
                coverage.matched += 1;
            }
        }

        let score = self
            .scorer
            .job_board_score(self.matcher, &profile.text, &job_skills, &resume_skills);

        let recommendations = self.build_recommendations(
            &resume_skills,
            &job_skills,
            &missing,
            match_percentage,
            score.section_hits,
        );

        ApplicationAnalysis {
            overall_score: score.total,
            match_percentage,
            skills_found: resume_skills.len(),
            matched_skills_count: matched.len(),
            missing_skills_count: missing.len(),
            skills_breakdown,
            matched_skills: matched,
            missing_skills: missing,
            unrecognized_skills: unrecognized,
            recommendations,
        }
    }

    fn build_recommendations(
        &self,
        resume_skills: &BTreeSet<String>,
        job_skills: &BTreeSet<String>,
        missing: &[String],
        match_percentage: f64,
        section_hits: usize,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if job_skills.is_empty() {
            recommendations.push(
                "The posting lists no recognizable skills; the score reflects skill breadth only".to_string(),
            );
        } else if match_percentage >= STRONG_MATCH {
            recommendations.push("Strong match for this role".to_string());
        } else if match_percentage >= PARTIAL_MATCH {
            recommendations.push("Partial match: covering the missing skills would make a strong candidate".to_string());
        } else {
            recommendations.push("Weak match: most of the required skills are missing".to_string());
        }

        let mut missing_by_category: BTreeMap<SkillCategory, Vec<&str>> = BTreeMap::new();
        for skill in missing {
            let category = self.matcher.category_of(skill).unwrap_or(SkillCategory::Custom);
            missing_by_category.entry(category).or_default().push(skill);
        }
        for (category, skills) in missing_by_category {
            recommendations.push(format!("Strengthen {} skills: {}", category, skills.join(", ")));
        }

        let suggested = self.recommender.recommend_job_board_skills(resume_skills, job_skills);
        if !suggested.is_empty() {
            recommendations.push(format!("Consider learning: {}", suggested.join(", ")));
        }

        if section_hits < MIN_SECTION_HITS {
            recommendations.push(
                "Add clearly labelled Education, Experience, Projects and Skills sections".to_string(),
            );
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecommendationConfig, ScoringConfig};

    fn profile(skills: &[&str], text: &str) -> ResumeProfile {
        ResumeProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            text: text.to_string(),
            ..ResumeProfile::empty()
        }
    }

    fn job() -> JobRequirements {
        JobRequirements {
            description: "Build backend services in Python.".to_string(),
            requirements: "Experience with Docker and PostgreSQL".to_string(),
            required_skills: JobRequirements::parse_skill_list("python, AWS , , Kafka"),
        }
    }

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(JobRequirements::parse_skill_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(JobRequirements::parse_skill_list("").is_empty());
    }

    #[test]
    fn test_analysis_of_partial_match() {
        let matcher = SkillMatcher::new().unwrap();
        let scorer = Scorer::new(ScoringConfig::default());
        let recommender = Recommender::new(RecommendationConfig::default());
        let analyzer = ApplicationAnalyzer::new(&matcher, &scorer, &recommender);

        let resume = profile(&["python", "docker", "git"], "Experience\nEducation\nSkills");
        let analysis = analyzer.analyze(&resume, &job());

        assert_eq!(analysis.matched_skills, vec!["docker", "python"]);
        assert_eq!(analysis.missing_skills, vec!["aws", "postgresql"]);
        assert_eq!(analysis.unrecognized_skills, vec!["kafka"]);
        assert_eq!(analysis.match_percentage, 50.0);
        assert_eq!(analysis.skills_found, 3);
        // 35 + 15 + 1.5
        assert_eq!(analysis.overall_score, 51);

        let devops = analysis.skills_breakdown[&SkillCategory::DevOps];
        assert_eq!(devops, CategoryCoverage { required: 2, matched: 1 });
        assert!(analysis.recommendations[0].starts_with("Partial match"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("postgresql")));
    }

    #[test]
    fn test_analysis_without_job_skills() {
        let matcher = SkillMatcher::new().unwrap();
        let scorer = Scorer::new(ScoringConfig::default());
        let recommender = Recommender::new(RecommendationConfig::default());
        let analyzer = ApplicationAnalyzer::new(&matcher, &scorer, &recommender);

        let analysis = analyzer.analyze(&profile(&["python"], ""), &JobRequirements::default());

        assert_eq!(analysis.match_percentage, 0.0);
        assert_eq!(analysis.overall_score, 3);
        assert!(analysis.skills_breakdown.is_empty());
    }

    #[test]
    fn test_failed_analysis() {
        let failed = ApplicationAnalysis::failed("unreadable resume");
        assert_eq!(failed.overall_score, 0);
        assert_eq!(failed.recommendations, vec!["Analysis failed: unreadable resume"]);
    }
}
