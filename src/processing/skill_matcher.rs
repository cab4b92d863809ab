//! Skill extraction: whole-term keyword matching with synonym normalization

use crate::config::MatchingConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::{SkillCategory, SkillVocabulary};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strsim::jaro_winkler;

/// Shortest token considered for fuzzy matching.
const MIN_FUZZY_LEN: usize = 5;

/// Finds vocabulary terms in free text.
///
/// A term matches when it occurs case-insensitively and is not glued to an
/// ASCII letter or digit on either side. Every term is matched on its own, so
/// overlapping terms ("spring" inside "spring boot") are all reported.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    automaton: AhoCorasick,
    patterns: Vec<String>,
    canonicals: Vec<Vec<String>>,
    vocabulary: SkillVocabulary,
    fuzzy_threshold: Option<f32>,
    text_processor: TextProcessor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub skill: String,
    pub matched_text: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillExtraction {
    pub skills: BTreeSet<String>,
    pub fuzzy_matches: Vec<FuzzyMatch>,
}

impl SkillMatcher {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(SkillVocabulary::default())
    }

    pub fn from_config(config: &MatchingConfig) -> Result<Self> {
        let vocabulary = SkillVocabulary::with_extra_skills(&config.extra_skills);
        let mut matcher = Self::with_vocabulary(vocabulary)?;
        if let Some(threshold) = config.fuzzy_threshold {
            matcher.set_fuzzy_threshold(threshold);
        }
        Ok(matcher)
    }

    pub fn with_vocabulary(vocabulary: SkillVocabulary) -> Result<Self> {
        // one automaton pattern per distinct term, each mapped to every canonical it stands for
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for term in vocabulary.terms() {
            let canonicals = grouped.entry(term.pattern.clone()).or_default();
            if !canonicals.contains(&term.canonical) {
                canonicals.push(term.canonical.clone());
            }
        }

        let (patterns, canonicals): (Vec<String>, Vec<Vec<String>>) = grouped.into_iter().unzip();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            automaton,
            patterns,
            canonicals,
            vocabulary,
            fuzzy_threshold: None,
            text_processor: TextProcessor::new(),
        })
    }

    /// Canonical skills found in `text`.
    pub fn skills_from_text(&self, text: &str) -> BTreeSet<String> {
        self.extract(text).skills
    }

    pub fn extract(&self, text: &str) -> SkillExtraction {
        let padded = format!(" {} ", self.text_processor.normalize(text));
        let bytes = padded.as_bytes();

        let mut skills = BTreeSet::new();
        for mat in self.automaton.find_overlapping_iter(&padded) {
            let before = bytes[..mat.start()].last();
            let after = bytes.get(mat.end());
            if before.is_some_and(u8::is_ascii_alphanumeric) || after.is_some_and(u8::is_ascii_alphanumeric) {
                continue;
            }
            skills.extend(self.canonicals[mat.pattern().as_usize()].iter().cloned());
        }

        let fuzzy_matches = match self.fuzzy_threshold {
            Some(threshold) => self.find_fuzzy_matches(&padded, &skills, threshold),
            None => Vec::new(),
        };
        for fuzzy in &fuzzy_matches {
            skills.insert(fuzzy.skill.clone());
        }

        debug!(
            "Extracted {} skills ({} fuzzy)",
            skills.len(),
            fuzzy_matches.len()
        );

        SkillExtraction {
            skills,
            fuzzy_matches,
        }
    }

    /// Match misspelled single-word tokens against single-word terms.
    fn find_fuzzy_matches(
        &self,
        normalized: &str,
        exact: &BTreeSet<String>,
        threshold: f32,
    ) -> Vec<FuzzyMatch> {
        let mut best: BTreeMap<String, FuzzyMatch> = BTreeMap::new();

        for token in self.text_processor.tokenize(normalized) {
            if token.len() < MIN_FUZZY_LEN || self.vocabulary.is_known(&token) {
                continue;
            }

            for (pattern, canonicals) in self.patterns.iter().zip(&self.canonicals) {
                if pattern.len() < MIN_FUZZY_LEN || pattern.contains(' ') {
                    continue;
                }

                let similarity = jaro_winkler(&token, pattern) as f32;
                if similarity < threshold {
                    continue;
                }

                for skill in canonicals {
                    if exact.contains(skill) {
                        continue;
                    }
                    let candidate = FuzzyMatch {
                        skill: skill.clone(),
                        matched_text: token.clone(),
                        similarity,
                    };
                    best.entry(skill.clone())
                        .and_modify(|current| {
                            if candidate.similarity > current.similarity {
                                *current = candidate.clone();
                            }
                        })
                        .or_insert(candidate);
                }
            }
        }

        let mut matches: Vec<FuzzyMatch> = best.into_values().collect();
        matches.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.skill.cmp(&b.skill))
        });
        matches
    }

    /// Lower-case, trim and map a spelling variant onto its canonical skill.
    pub fn canonicalize(&self, term: &str) -> String {
        self.vocabulary.canonicalize(term)
    }

    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.vocabulary.category_of(skill)
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn text_processor(&self) -> &TextProcessor {
        &self.text_processor
    }

    /// Set fuzzy matching threshold (0.0 to 1.0)
    pub fn set_fuzzy_threshold(&mut self, threshold: f32) {
        self.fuzzy_threshold = Some(threshold.clamp(0.0, 1.0));
    }

    pub fn fuzzy_threshold(&self) -> Option<f32> {
        self.fuzzy_threshold
    }

    /// Number of distinct searchable terms
    pub fn term_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(text: &str) -> Vec<String> {
        SkillMatcher::new()
            .unwrap()
            .skills_from_text(text)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_matcher_creation() {
        let matcher = SkillMatcher::new().unwrap();
        assert!(matcher.term_count() > 100);
        assert!(matcher.fuzzy_threshold().is_none());
    }

    #[test]
    fn test_whole_term_matching() {
        let found = skills("I write Python, JavaScript and React daily.");
        assert!(found.contains(&"python".to_string()));
        assert!(found.contains(&"javascript".to_string()));
        assert!(found.contains(&"react".to_string()));
        // "java" is glued to "script"
        assert!(!found.contains(&"java".to_string()));
    }

    #[test]
    fn test_symbols_and_case() {
        let found = skills("Worked with C++, C#, CI/CD pipelines and ASP.NET Core");
        assert!(found.contains(&"c++".to_string()));
        assert!(found.contains(&"c#".to_string()));
        assert!(found.contains(&"ci/cd".to_string()));
        assert!(found.contains(&"asp.net".to_string()));
        assert!(found.contains(&"asp.net core".to_string()));
    }

    #[test]
    fn test_overlapping_terms_all_count() {
        let found = skills("Backend in Spring Boot and Node.js");
        assert!(found.contains(&"spring".to_string()));
        assert!(found.contains(&"spring boot".to_string()));
        assert!(found.contains(&"node".to_string()));
        assert!(found.contains(&"node.js".to_string()));
    }

    #[test]
    fn test_variations_map_to_canonical() {
        let found = skills("NodeJS, SpringBoot, Objective C and scikit learn");
        assert!(found.contains(&"node.js".to_string()));
        assert!(found.contains(&"spring boot".to_string()));
        assert!(found.contains(&"objective-c".to_string()));
        assert!(found.contains(&"scikit-learn".to_string()));
        assert!(!found.contains(&"nodejs".to_string()));
    }

    #[test]
    fn test_multi_word_terms_span_line_breaks() {
        let found = skills("Strong in machine\n   learning and problem\tsolving");
        assert!(found.contains(&"machine learning".to_string()));
        assert!(found.contains(&"problem solving".to_string()));
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(skills("").is_empty());
        assert!(skills("   \n ").is_empty());
    }

    #[test]
    fn test_fuzzy_matching_is_opt_in() {
        let text = "Deployed services on Kubernetess";
        assert!(!skills(text).contains(&"kubernetes".to_string()));

        let mut matcher = SkillMatcher::new().unwrap();
        matcher.set_fuzzy_threshold(0.9);
        let extraction = matcher.extract(text);

        assert!(extraction.skills.contains("kubernetes"));
        assert_eq!(extraction.fuzzy_matches[0].matched_text, "kubernetess");
    }

    #[test]
    fn test_extra_skills_from_config() {
        let config = MatchingConfig {
            fuzzy_threshold: None,
            extra_skills: vec!["Zig".to_string()],
        };
        let matcher = SkillMatcher::from_config(&config).unwrap();
        assert!(matcher.skills_from_text("Systems work in Zig").contains("zig"));
        assert_eq!(matcher.category_of("zig"), Some(SkillCategory::Custom));
    }
}
