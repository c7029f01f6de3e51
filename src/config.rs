use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_PATH, DEFAULT_STORE_PATH, MIN_ESTABLISHED_YEAR, STORE_PATH_ENV};
use crate::error::{PipelineError, Result};
use crate::pipeline::{NormalizeConfig, ScoreMode};

/// Settings read from `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub validation: ValidationConfig,
    pub storage: StorageConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// `"floor"` (default) or `"true"`
    pub division: ScoreMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_established_year: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_established_year: MIN_ESTABLISHED_YEAR,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// CSS selectors used to pull fields out of a saved institution page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub institution_type: String,
    pub entrance_exams: String,
    pub official_website: String,
    pub admission_process: String,
    pub required_documents: String,
    pub course_fee_structure: String,
    pub average_salary: String,
    pub highest_salary: String,
    pub placement_rate: String,
    pub top_recruiters: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            institution_type: ".institute-type-class".to_string(),
            entrance_exams: ".entrance-exams-class".to_string(),
            official_website: ".official-website-class a".to_string(),
            admission_process: ".admission-process-class".to_string(),
            required_documents: ".required-documents-class".to_string(),
            course_fee_structure: ".course-fee-class".to_string(),
            average_salary: ".avg-salary-class".to_string(),
            highest_salary: ".highest-salary-class".to_string(),
            placement_rate: ".placement-rate-class".to_string(),
            top_recruiters: ".top-recruiters-class".to_string(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                PipelineError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(store) = std::env::var(STORE_PATH_ENV) {
            if !store.trim().is_empty() {
                config.storage.path = PathBuf::from(store.trim());
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.validation.min_established_year < 0 {
            return Err(PipelineError::Config(format!(
                "validation.min_established_year must not be negative, got {}",
                config.validation.min_established_year
            )));
        }
        Ok(config)
    }

    pub fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            score_mode: self.scoring.division,
            min_established_year: self.validation.min_established_year,
        }
    }
}
