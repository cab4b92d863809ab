//! Resume profile extraction: contact details, name, skills and page count

use crate::error::Result;
use crate::input::text_extractor::ExtractedText;
use crate::input::InputManager;
use crate::processing::skill_matcher::SkillMatcher;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder for fields the heuristics could not find.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub mobile: String,
    /// Sorted, de-duplicated canonical skills
    pub skills: Vec<String>,
    pub pages: usize,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text: String,
}

impl ResumeProfile {
    /// Profile returned when the document could not be read.
    pub fn empty() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            email: UNKNOWN.to_string(),
            mobile: UNKNOWN.to_string(),
            skills: Vec::new(),
            pages: 0,
            text: String::new(),
        }
    }

    pub fn has_email(&self) -> bool {
        self.email != UNKNOWN
    }
}

pub struct ResumeParser {
    matcher: SkillMatcher,
}

impl ResumeParser {
    pub fn new(matcher: SkillMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    /// Build a profile from already extracted text.
    pub fn parse_text(&self, extracted: ExtractedText) -> ResumeProfile {
        let processor = self.matcher.text_processor();
        let ExtractedText { text, pages } = extracted;

        let email = processor.find_email(&text).unwrap_or_else(|| UNKNOWN.to_string());
        let mobile = processor.find_phone(&text).unwrap_or_else(|| UNKNOWN.to_string());
        let name = processor.guess_name(&text).unwrap_or_else(|| UNKNOWN.to_string());
        let skills = self.matcher.skills_from_text(&text).into_iter().collect();

        ResumeProfile {
            name,
            email,
            mobile,
            skills,
            pages,
            text,
        }
    }

    /// Parse a resume file, surfacing extraction errors.
    pub async fn try_parse_file(&self, input: &mut InputManager, path: &Path) -> Result<ResumeProfile> {
        let extracted = input.extract(path).await?;
        Ok(self.parse_text(extracted))
    }

    /// Parse a resume file; unreadable documents yield [`ResumeProfile::empty`].
    pub async fn parse_file(&self, input: &mut InputManager, path: &Path) -> ResumeProfile {
        match self.try_parse_file(input, path).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Failed to parse resume {}: {}", path.display(), e);
                ResumeProfile::empty()
            }
        }
    }
}
