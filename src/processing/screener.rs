//! Screening engine tying parsing, scoring and recommendations together

use crate::config::Config;
use crate::error::Result;
use crate::input::InputManager;
use crate::processing::analyzer::{ApplicationAnalysis, ApplicationAnalyzer, JobRequirements};
use crate::processing::recommender::{CourseRecommendation, Recommender};
use crate::processing::resume_parser::{ResumeParser, ResumeProfile};
use crate::processing::scoring::{JobSkills, ScoreBreakdown, Scorer, UserLevel};
use crate::processing::skill_matcher::SkillMatcher;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

/// Main screening engine
pub struct Screener {
    parser: ResumeParser,
    scorer: Scorer,
    recommender: Recommender,
}

/// Everything learned about one resume against an optional job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub resume_path: String,
    pub profile: ResumeProfile,
    pub job_description: Option<String>,
    pub job_skills: JobSkills,
    pub score: ScoreBreakdown,
    pub level: UserLevel,
    pub recommended_skills: Vec<String>,
    pub courses: CourseRecommendation,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
}

impl ScreeningReport {
    pub fn total_score(&self) -> u8 {
        self.score.total
    }
}

/// Job-board evaluation of one application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationEvaluation {
    pub analysis: ApplicationAnalysis,
    pub courses: CourseRecommendation,
    pub recommended_skills: Vec<String>,
}

impl Screener {
    pub fn new(matcher: SkillMatcher, scorer: Scorer, recommender: Recommender) -> Self {
        Self {
            parser: ResumeParser::new(matcher),
            scorer,
            recommender,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let matcher = SkillMatcher::from_config(&config.matching)?;
        debug!("Skill matcher ready with {} terms", matcher.term_count());

        Ok(Self::new(
            matcher,
            Scorer::new(config.scoring.clone()),
            Recommender::new(config.recommendations.clone()),
        ))
    }

    pub fn parser(&self) -> &ResumeParser {
        &self.parser
    }

    pub fn matcher(&self) -> &SkillMatcher {
        self.parser.matcher()
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Parse and screen a resume file.
    pub async fn screen(
        &self,
        input: &mut InputManager,
        path: &Path,
        job_description: Option<&str>,
    ) -> ScreeningReport {
        let start_time = Instant::now();
        let profile = self.parser.parse_file(input, path).await;

        let mut report = self.screen_profile(profile, job_description);
        report.resume_path = path.display().to_string();
        report.processing_time_ms = start_time.elapsed().as_millis() as u64;
        report
    }

    /// Screen an already parsed profile.
    pub fn screen_profile(&self, profile: ResumeProfile, job_description: Option<&str>) -> ScreeningReport {
        let start_time = Instant::now();
        let job_description = job_description
            .map(str::trim)
            .filter(|jd| !jd.is_empty())
            .map(str::to_string);
        let jd_text = job_description.as_deref().unwrap_or("");

        let resume_skills: BTreeSet<String> = profile.skills.iter().cloned().collect();
        let matcher = self.parser.matcher();

        let job_skills = self.scorer.job_skills(matcher, jd_text);
        let score = self.scorer.weighted_score(matcher, &profile.text, jd_text, &resume_skills);
        let level = self.scorer.user_level(score.total);
        let recommended_skills = self.recommender.recommend_skills(&resume_skills, &job_skills);
        let courses = self.recommender.recommend_courses(&resume_skills);

        info!(
            "Screened {} ({} skills): score {} ({})",
            profile.name,
            resume_skills.len(),
            score.total,
            level
        );

        ScreeningReport {
            resume_path: String::new(),
            profile,
            job_description,
            job_skills,
            score,
            level,
            recommended_skills,
            courses,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        }
    }

    pub fn analyze_application(&self, profile: &ResumeProfile, job: &JobRequirements) -> ApplicationAnalysis {
        ApplicationAnalyzer::new(self.parser.matcher(), &self.scorer, &self.recommender).analyze(profile, job)
    }

    /// Match analysis plus field prediction and skill suggestions for a posting.
    pub fn evaluate_application(&self, profile: &ResumeProfile, job: &JobRequirements) -> ApplicationEvaluation {
        let analyzer = ApplicationAnalyzer::new(self.parser.matcher(), &self.scorer, &self.recommender);
        let analysis = analyzer.analyze(profile, job);

        let resume_skills: BTreeSet<String> = profile.skills.iter().cloned().collect();
        let job_skills = analyzer.job_skills(job);

        ApplicationEvaluation {
            courses: self.recommender.recommend_courses(&resume_skills),
            recommended_skills: self.recommender.recommend_job_board_skills(&resume_skills, &job_skills),
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::text_extractor::fixtures::build_pdf;
    use crate::input::ExtractedText;
    use crate::processing::vocabulary::Field;

    fn screener() -> Screener {
        Screener::from_config(&Config::default()).unwrap()
    }

    fn profile(text: &str) -> ResumeProfile {
        screener().parser().parse_text(ExtractedText {
            text: text.to_string(),
            pages: 1,
        })
    }

    #[test]
    fn test_screen_against_preset_title() {
        let screener = screener();
        let resume = profile("Sam Lee\nsam@example.com\nEducation\nExperience\nSkills: Python, Git, Pandas");

        let report = screener.screen_profile(resume, Some("  Software Engineer "));

        assert_eq!(report.job_description.as_deref(), Some("Software Engineer"));
        assert_eq!(report.job_skills.preset.as_deref(), Some("Software Engineer"));
        assert_eq!(report.score.matched_core, 2);
        // core 50*2/5 = 20, structure 15, breadth 1.5
        assert_eq!(report.total_score(), 36);
        assert_eq!(report.level, UserLevel::Beginner);
        assert_eq!(report.recommended_skills, vec!["c++", "java", "testing"]);
        assert_eq!(report.courses.field, Field::DataScience);
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let screener = screener();
        let report = screener.screen_profile(profile("Skills: Rust, Docker"), Some("   "));

        assert!(report.job_description.is_none());
        assert!(report.job_skills.is_empty());
        assert!(report.recommended_skills.contains(&"git".to_string()));
        assert!(!report.recommended_skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_evaluate_application() {
        let screener = screener();
        let resume = profile("Skills: Kotlin, Android, Git");
        let job = JobRequirements {
            description: "Android app team".to_string(),
            requirements: String::new(),
            required_skills: vec!["Kotlin".to_string(), "Java".to_string()],
        };

        let evaluation = screener.evaluate_application(&resume, &job);

        assert_eq!(evaluation.analysis.matched_skills, vec!["android", "kotlin"]);
        assert_eq!(evaluation.analysis.missing_skills, vec!["java"]);
        assert_eq!(evaluation.recommended_skills, vec!["java"]);
        assert_eq!(evaluation.courses.field, Field::AndroidDevelopment);
    }

    #[tokio::test]
    async fn test_screen_survives_undecodable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, build_pdf(1, Some("BogusEncoding"))).unwrap();
        let mut input = InputManager::new();

        let report = screener().screen(&mut input, &path, Some("Software Engineer")).await;

        assert_eq!(report.profile.name, "Unknown");
        assert_eq!(report.profile.pages, 0);
        assert_eq!(report.score.matched_core, 0);
        assert!(report.resume_path.ends_with("broken.pdf"));
    }
}
