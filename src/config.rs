//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub scoring: ScoringConfig,
    pub recommendations: RecommendationConfig,
    pub store: StoreConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Jaro-Winkler similarity a misspelled token needs to count as a skill.
    /// Fuzzy matching is off when unset.
    #[serde(default)]
    pub fuzzy_threshold: Option<f32>,
    /// Terms appended to the built-in skill vocabulary
    #[serde(default)]
    pub extra_skills: Vec<String>,
}

/// Point weights for both scoring variants. All scores end up in 0..=100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub core_weight: f64,
    pub other_weight: f64,
    pub no_jd_per_skill: f64,
    pub no_jd_cap: f64,
    pub job_board_match_weight: f64,
    pub job_board_no_jd_per_skill: f64,
    pub structure_per_hit: f64,
    pub structure_cap: f64,
    pub breadth_per_skill: f64,
    pub breadth_cap: f64,
    pub advanced_threshold: u8,
    pub intermediate_threshold: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub max_recommended_skills: usize,
    pub max_job_board_skills: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            core_weight: 50.0,
            other_weight: 20.0,
            no_jd_per_skill: 3.0,
            no_jd_cap: 90.0,
            job_board_match_weight: 70.0,
            job_board_no_jd_per_skill: 3.0,
            structure_per_hit: 5.0,
            structure_cap: 20.0,
            breadth_per_skill: 0.5,
            breadth_cap: 10.0,
            advanced_threshold: 80,
            intermediate_threshold: 50,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_recommended_skills: 12,
            max_job_board_skills: 5,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resume-screener");

        Self { data_dir }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            scoring: ScoringConfig::default(),
            recommendations: RecommendationConfig::default(),
            store: StoreConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn candidates_path(&self) -> PathBuf {
        self.store.data_dir.join("candidates.json")
    }

    pub fn analyses_path(&self) -> PathBuf {
        self.store.data_dir.join("analyses.json")
    }

    /// Set a dotted key such as `scoring.core_weight` to a TOML literal.
    ///
    /// Values that do not parse as a TOML literal are stored as strings.
    pub fn set_value(&mut self, key: &str, raw_value: &str) -> Result<()> {
        let mut tree = toml::Value::try_from(&*self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let parts: Vec<&str> = key.split('.').collect();
        let (leaf, parents) = parts
            .split_last()
            .ok_or_else(|| ScreenerError::Configuration("Empty configuration key".to_string()))?;

        let mut cursor = &mut tree;
        for part in parents {
            cursor = cursor
                .get_mut(*part)
                .ok_or_else(|| ScreenerError::Configuration(format!("Unknown configuration section: {}", part)))?;
        }

        let table = cursor
            .as_table_mut()
            .ok_or_else(|| ScreenerError::Configuration(format!("Not a configuration section: {}", key)))?;

        // `fuzzy_threshold` is optional and therefore absent from a default tree
        if !table.contains_key(*leaf) && *leaf != "fuzzy_threshold" {
            return Err(ScreenerError::Configuration(format!("Unknown configuration key: {}", key)));
        }

        table.insert(leaf.to_string(), parse_literal(raw_value));

        let updated: Config = tree
            .try_into()
            .map_err(|e| ScreenerError::Configuration(format!("Invalid value for {}: {}", key, e)))?;
        updated.validate()?;

        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(threshold) = self.matching.fuzzy_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ScreenerError::Configuration(format!(
                    "matching.fuzzy_threshold must be between 0 and 1, got {}",
                    threshold
                )));
            }
        }

        let s = &self.scoring;
        let weights = [
            ("core_weight", s.core_weight),
            ("other_weight", s.other_weight),
            ("no_jd_per_skill", s.no_jd_per_skill),
            ("no_jd_cap", s.no_jd_cap),
            ("job_board_match_weight", s.job_board_match_weight),
            ("job_board_no_jd_per_skill", s.job_board_no_jd_per_skill),
            ("structure_per_hit", s.structure_per_hit),
            ("structure_cap", s.structure_cap),
            ("breadth_per_skill", s.breadth_per_skill),
            ("breadth_cap", s.breadth_cap),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ScreenerError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if s.intermediate_threshold > s.advanced_threshold || s.advanced_threshold > 100 {
            return Err(ScreenerError::Configuration(
                "scoring thresholds must satisfy intermediate <= advanced <= 100".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_literal(raw: &str) -> toml::Value {
    if let Ok(value) = raw.parse::<i64>() {
        return toml::Value::Integer(value);
    }
    if let Ok(value) = raw.parse::<f64>() {
        return toml::Value::Float(value);
    }
    if let Ok(value) = raw.parse::<bool>() {
        return toml::Value::Boolean(value);
    }
    toml::Value::String(raw.to_string())
}
