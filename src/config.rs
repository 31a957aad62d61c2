use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "llama3.1:latest";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/api/generate";

pub fn default_response_options() -> Vec<String> {
    ["strongly disagree", "disagree", "neutral", "agree", "strongly agree"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub general: GeneralConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub survey: SurveyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    pub questions_path: PathBuf,
    pub persona_path: PathBuf,
    #[serde(default = "default_num_responses")]
    pub num_responses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyConfig {
    #[serde(default = "default_response_options")]
    pub response_options: Vec<String>,
}

fn default_num_responses() -> usize {
    10
}

fn default_temperature() -> f64 {
    1.0
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            response_options: default_response_options(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                questions_path: PathBuf::from("questions.txt"),
                persona_path: PathBuf::from("persona.json"),
                num_responses: default_num_responses(),
            },
            model: ModelConfig {
                name: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                temperature: default_temperature(),
                timeout_secs: None,
            },
            survey: SurveyConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &std::path::Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.model.name.trim().is_empty() {
            return Err(AppError::Configuration("Model name cannot be empty".to_string()));
        }

        if self.model.base_url.trim().is_empty() {
            return Err(AppError::Configuration("Endpoint URL cannot be empty".to_string()));
        }

        if !self.model.temperature.is_finite() || self.model.temperature < 0.0 {
            return Err(AppError::Configuration(format!(
                "Temperature must be a non-negative number, got {}",
                self.model.temperature
            )));
        }

        if self.model.timeout_secs == Some(0) {
            return Err(AppError::Configuration(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.survey.response_options.is_empty() {
            return Err(AppError::Configuration(
                "At least one response option is required".to_string(),
            ));
        }

        if self.survey.response_options.iter().any(|o| o.trim().is_empty()) {
            return Err(AppError::Configuration(
                "Response options cannot be blank".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("survey-responder")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model.name, "llama3.1:latest");
        assert_eq!(config.model.base_url, "http://localhost:11434/api/generate");
        assert_eq!(config.general.num_responses, 10);
        assert_eq!(config.survey.response_options.len(), 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.model.temperature = -0.5;
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

        let mut config = Config::default();
        config.survey.response_options.clear();
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

        let mut config = Config::default();
        config.model.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_custom_creates_then_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_custom(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, Config::default());

        let loaded = Config::load_custom(&path).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[general]
questions_path = "q.txt"
persona_path = "p.json"

[model]
name = "mistral"
base_url = "http://127.0.0.1:9999/api/generate"
temperature = 0.2
"#,
        )
        .unwrap();

        let config = Config::load_custom(&path).unwrap();
        assert_eq!(config.model.name, "mistral");
        assert_eq!(config.general.num_responses, 10);
        assert_eq!(config.survey.response_options, default_response_options());
        assert_eq!(config.model.timeout_secs, None);
    }
}
