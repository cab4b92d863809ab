//! Resume scoring: skill overlap, structure signals and skill breadth

use crate::config::ScoringConfig;
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::vocabulary::{JobPreset, SECTION_HINTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Experience tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl UserLevel {
    /// Tier for a score under the configured thresholds.
    pub fn from_score(score: u8, config: &ScoringConfig) -> Self {
        if score >= config.advanced_threshold {
            UserLevel::Advanced
        } else if score >= config.intermediate_threshold {
            UserLevel::Intermediate
        } else {
            UserLevel::Beginner
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLevel::Beginner => write!(f, "Beginner"),
            UserLevel::Intermediate => write!(f, "Intermediate"),
            UserLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Skills a job description asks for, split into core and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSkills {
    pub core: BTreeSet<String>,
    pub other: BTreeSet<String>,
    /// Title of the preset the description named, if any
    pub preset: Option<String>,
}

impl JobSkills {
    pub fn all(&self) -> BTreeSet<String> {
        self.core.union(&self.other).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.other.is_empty()
    }
}

/// Points contributed by each scoring component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub job_points: f64,
    pub structure_points: f64,
    pub breadth_points: f64,
    pub section_hits: usize,
    pub matched_core: usize,
    pub matched_other: usize,
    /// Final score, 0..=100
    pub total: u8,
}

pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Skills of a job description.
    ///
    /// A description naming a preset title adds the preset's core skills and
    /// uses them as the core set; otherwise every extracted skill is core.
    pub fn job_skills(&self, matcher: &SkillMatcher, job_description: &str) -> JobSkills {
        let extracted = matcher.skills_from_text(job_description);

        match JobPreset::find(job_description) {
            Some(preset) => {
                let core = preset.core_skill_set();
                let other = extracted.difference(&core).cloned().collect();
                JobSkills {
                    core,
                    other,
                    preset: Some(preset.title.to_string()),
                }
            }
            None => JobSkills {
                core: extracted,
                other: BTreeSet::new(),
                preset: None,
            },
        }
    }

    /// Number of section headings present in the resume.
    pub fn section_hits(&self, matcher: &SkillMatcher, resume_text: &str) -> usize {
        let normalized = matcher.text_processor().normalize(resume_text);
        SECTION_HINTS
            .iter()
            .filter(|hint| normalized.contains(*hint))
            .count()
    }

    fn structure_points(&self, hits: usize) -> f64 {
        (hits as f64 * self.config.structure_per_hit).min(self.config.structure_cap)
    }

    fn breadth_points(&self, skill_count: usize) -> f64 {
        (skill_count as f64 * self.config.breadth_per_skill).min(self.config.breadth_cap)
    }

    /// Weighted score used by resume screening.
    pub fn weighted_score(
        &self,
        matcher: &SkillMatcher,
        resume_text: &str,
        job_description: &str,
        resume_skills: &BTreeSet<String>,
    ) -> ScoreBreakdown {
        let job = self.job_skills(matcher, job_description);

        let (job_points, matched_core, matched_other) = if job.is_empty() {
            let points = (resume_skills.len() as f64 * self.config.no_jd_per_skill).min(self.config.no_jd_cap);
            (points, 0, 0)
        } else {
            let matched_core = resume_skills.intersection(&job.core).count();
            let matched_other = resume_skills.intersection(&job.other).count();

            let core_points = self.config.core_weight * ratio(matched_core, job.core.len().max(1));
            let other_points = self.config.other_weight * ratio(matched_other, job.other.len().max(1));
            ((core_points + other_points).round(), matched_core, matched_other)
        };

        let section_hits = self.section_hits(matcher, resume_text);
        let structure_points = self.structure_points(section_hits);
        let breadth_points = self.breadth_points(resume_skills.len());

        ScoreBreakdown {
            job_points,
            structure_points,
            breadth_points,
            section_hits,
            matched_core,
            matched_other,
            total: clamp_score(job_points + structure_points + breadth_points),
        }
    }

    /// Score used by the job-board queue: plain overlap with the posting's skills.
    pub fn job_board_score(
        &self,
        matcher: &SkillMatcher,
        resume_text: &str,
        job_skills: &BTreeSet<String>,
        resume_skills: &BTreeSet<String>,
    ) -> ScoreBreakdown {
        if job_skills.is_empty() {
            let job_points = resume_skills.len() as f64 * self.config.job_board_no_jd_per_skill;
            return ScoreBreakdown {
                job_points,
                structure_points: 0.0,
                breadth_points: 0.0,
                section_hits: 0,
                matched_core: 0,
                matched_other: 0,
                total: clamp_score(job_points),
            };
        }

        let matched = resume_skills.intersection(job_skills).count();
        let job_points = self.config.job_board_match_weight * ratio(matched, job_skills.len());

        let section_hits = if resume_text.is_empty() {
            0
        } else {
            self.section_hits(matcher, resume_text)
        };
        let structure_points = self.structure_points(section_hits);
        let breadth_points = self.breadth_points(resume_skills.len());

        ScoreBreakdown {
            job_points,
            structure_points,
            breadth_points,
            section_hits,
            matched_core: matched,
            matched_other: 0,
            total: clamp_score(job_points + structure_points + breadth_points),
        }
    }

    pub fn user_level(&self, score: u8) -> UserLevel {
        UserLevel::from_score(score, &self.config)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Cap at 100 and truncate toward zero.
fn clamp_score(points: f64) -> u8 {
    if points.is_nan() {
        return 0;
    }
    points.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::vocabulary::SkillVocabulary;

    fn setup() -> (Scorer, SkillMatcher) {
        (
            Scorer::new(ScoringConfig::default()),
            SkillMatcher::new().unwrap(),
        )
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preset_job_uses_core_skills() {
        let (scorer, matcher) = setup();
        let job = scorer.job_skills(&matcher, "software engineer");

        assert_eq!(job.preset.as_deref(), Some("Software Engineer"));
        assert_eq!(job.core, set(&["python", "java", "c++", "git", "testing"]));
        assert!(job.other.is_empty());
    }

    #[test]
    fn test_free_text_job_is_all_core() {
        let (scorer, matcher) = setup();
        let job = scorer.job_skills(&matcher, "We need Rust and Docker experience");

        assert!(job.preset.is_none());
        assert_eq!(job.core, set(&["docker", "rust"]));
    }

    #[test]
    fn test_weighted_score_with_preset() {
        let (scorer, matcher) = setup();
        let resume = "Education\nExperience\nProjects\nSkills";
        let skills = set(&["python", "java", "git", "docker"]);

        let breakdown = scorer.weighted_score(&matcher, resume, "Software Engineer", &skills);

        // 3 of 5 core -> 30 points; 4 headings -> 20; 4 skills -> 2
        assert_eq!(breakdown.matched_core, 3);
        assert_eq!(breakdown.job_points, 30.0);
        assert_eq!(breakdown.structure_points, 20.0);
        assert_eq!(breakdown.breadth_points, 2.0);
        assert_eq!(breakdown.total, 52);
        assert_eq!(scorer.user_level(breakdown.total), UserLevel::Intermediate);
    }

    #[test]
    fn test_weighted_score_without_job_description() {
        let (scorer, matcher) = setup();
        let skills = set(&["python", "java", "git"]);

        let breakdown = scorer.weighted_score(&matcher, "no headings here", "", &skills);

        assert_eq!(breakdown.job_points, 9.0);
        assert_eq!(breakdown.structure_points, 0.0);
        assert_eq!(breakdown.breadth_points, 1.5);
        assert_eq!(breakdown.total, 10);
    }

    #[test]
    fn test_preset_title_skills_are_core() {
        let (scorer, matcher) = setup();
        let skills = set(&["figma", "ui", "ux", "docker"]);
        let job = scorer.job_skills(&matcher, "UI/UX Designer");
        // "ui" and "ux" are extracted from the title itself and are core
        assert!(job.other.is_empty());

        let breakdown = scorer.weighted_score(&matcher, "", "UI/UX Designer", &skills);
        // 3 of 5 core -> 30
        assert_eq!(breakdown.job_points, 30.0);
        assert_eq!(breakdown.total, 32);
    }

    #[test]
    fn test_preset_other_skills_score_their_share() {
        let scorer = Scorer::new(ScoringConfig::default());
        let vocabulary = SkillVocabulary::with_extra_skills(&["designer".to_string()]);
        let matcher = SkillMatcher::with_vocabulary(vocabulary).unwrap();

        let job = scorer.job_skills(&matcher, "UI/UX Designer");
        assert_eq!(job.other, set(&["designer"]));

        let skills = set(&["figma", "ui", "ux", "designer"]);
        let breakdown = scorer.weighted_score(&matcher, "", "UI/UX Designer", &skills);

        // core 50 * 3/5 = 30; other 20 * 1/1 = 20; 4 skills -> 2
        assert_eq!(breakdown.matched_core, 3);
        assert_eq!(breakdown.matched_other, 1);
        assert_eq!(breakdown.job_points, 50.0);
        assert_eq!(breakdown.total, 52);

        let without_other = scorer.weighted_score(&matcher, "", "UI/UX Designer", &set(&["figma", "ui", "ux"]));
        assert_eq!(without_other.job_points, 30.0);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        let (scorer, matcher) = setup();
        let skills: BTreeSet<String> = (0..80).map(|i| format!("skill{}", i)).collect();
        let resume = "education experience projects skills certifications work experience";

        let breakdown = scorer.weighted_score(&matcher, resume, "", &skills);
        assert_eq!(breakdown.total, 100);

        let job_board = scorer.job_board_score(&matcher, resume, &BTreeSet::new(), &skills);
        assert_eq!(job_board.total, 100);
    }

    #[test]
    fn test_job_board_score() {
        let (scorer, matcher) = setup();
        let job = set(&["python", "sql", "docker", "aws"]);
        let skills = set(&["python", "sql"]);

        let breakdown = scorer.job_board_score(&matcher, "Experience\nEducation", &job, &skills);

        // 2/4 * 70 = 35; 2 headings -> 10; 2 skills -> 1
        assert_eq!(breakdown.total, 46);
    }

    #[test]
    fn test_job_board_score_without_job_skills() {
        let (scorer, matcher) = setup();
        let skills = set(&["python", "sql", "git"]);
        let breakdown = scorer.job_board_score(&matcher, "Experience", &BTreeSet::new(), &skills);
        assert_eq!(breakdown.total, 9);
    }

    #[test]
    fn test_user_levels() {
        let (scorer, _) = setup();
        assert_eq!(scorer.user_level(80), UserLevel::Advanced);
        assert_eq!(scorer.user_level(79), UserLevel::Intermediate);
        assert_eq!(scorer.user_level(50), UserLevel::Intermediate);
        assert_eq!(scorer.user_level(49), UserLevel::Beginner);
    }
}
