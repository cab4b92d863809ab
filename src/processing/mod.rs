//! Resume matching heuristics: vocabulary, extraction, scoring and recommendations

pub mod analyzer;
pub mod recommender;
pub mod resume_parser;
pub mod scoring;
pub mod screener;
pub mod skill_matcher;
pub mod text_processor;
pub mod vocabulary;

pub use analyzer::{ApplicationAnalysis, JobRequirements};
pub use resume_parser::{ResumeParser, ResumeProfile};
pub use screener::{ApplicationEvaluation, ScreeningReport, Screener};
pub use skill_matcher::SkillMatcher;
