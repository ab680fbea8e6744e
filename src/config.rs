// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ProbeError, Result};

/// Prompt sent on every trial unless overridden by a probe file.
pub const DEFAULT_PROMPT: &str = "Hello! Can you respond with a simple greeting?";

/// One (API version, model name) pair to attempt.
///
/// Trials run in order and the first success wins, so the order of the
/// list is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    pub api_version: String,
    pub model: String,
}

impl TrialConfig {
    pub fn new(api_version: &str, model: &str) -> Self {
        Self {
            api_version: api_version.to_string(),
            model: model.to_string(),
        }
    }
}

impl std::fmt::Display for TrialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.api_version, self.model)
    }
}

/// Configuration for the Gemini endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub api_key: String,
}

/// Everything a probe run needs: endpoint, credential, prompt and the
/// ordered trial list.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub gemini: GeminiConfig,
    pub prompt: String,
    pub trials: Vec<TrialConfig>,
}

/// Optional TOML probe file overriding the prompt and/or the trial list.
/// The credential always comes from the environment.
#[derive(Debug, Deserialize)]
pub struct ProbeFile {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub trials: Vec<TrialConfig>,
}

/// The built-in trial order: each experimental model is tried against the
/// beta API surface first, then the stable one.
pub fn default_trials() -> Vec<TrialConfig> {
    vec![
        TrialConfig::new("v1beta", "gemini-2.0-flash-exp"),
        TrialConfig::new("v1", "gemini-2.0-flash-exp"),
        TrialConfig::new("v1beta", "gemini-exp-1206"),
        TrialConfig::new("v1", "gemini-exp-1206"),
    ]
}

impl ProbeConfig {
    /// Load configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_API_BASE` overrides the
    /// default endpoint (useful for pointing the probe at a local server).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ProbeError::Config("No API key configured. Please set GEMINI_API_KEY.".to_string())
        })?;
        let api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        Ok(ProbeConfig {
            gemini: GeminiConfig { api_base, api_key },
            prompt: DEFAULT_PROMPT.to_string(),
            trials: default_trials(),
        })
    }

    /// Apply overrides from a TOML probe file on top of this configuration.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: ProbeFile = toml::from_str(&raw)?;
        self.apply(file);
        Ok(())
    }

    fn apply(&mut self, file: ProbeFile) {
        if let Some(prompt) = file.prompt {
            self.prompt = prompt;
        }
        if !file.trials.is_empty() {
            self.trials = file.trials;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProbeConfig {
        ProbeConfig {
            gemini: GeminiConfig {
                api_base: "https://generativelanguage.googleapis.com".to_string(),
                api_key: "test-key".to_string(),
            },
            prompt: DEFAULT_PROMPT.to_string(),
            trials: default_trials(),
        }
    }

    #[test]
    fn test_default_trials_order() {
        let trials = default_trials();

        assert_eq!(trials.len(), 4);
        assert_eq!(trials[0], TrialConfig::new("v1beta", "gemini-2.0-flash-exp"));
        assert_eq!(trials[1], TrialConfig::new("v1", "gemini-2.0-flash-exp"));
        assert_eq!(trials[2], TrialConfig::new("v1beta", "gemini-exp-1206"));
        assert_eq!(trials[3], TrialConfig::new("v1", "gemini-exp-1206"));
    }

    #[test]
    fn test_probe_file_parsing() {
        let raw = r#"
            prompt = "Say hi in French."

            [[trials]]
            api_version = "v1"
            model = "gemini-1.5-flash"

            [[trials]]
            api_version = "v1beta"
            model = "gemini-1.5-pro"
        "#;

        let file: ProbeFile = toml::from_str(raw).unwrap();

        assert_eq!(file.prompt.as_deref(), Some("Say hi in French."));
        assert_eq!(file.trials.len(), 2);
        assert_eq!(file.trials[0], TrialConfig::new("v1", "gemini-1.5-flash"));
    }

    #[test]
    fn test_probe_file_partial_override() {
        let mut config = test_config();

        // A file with only trials keeps the default prompt.
        let file: ProbeFile = toml::from_str(
            r#"
            [[trials]]
            api_version = "v1"
            model = "gemini-1.5-flash"
        "#,
        )
        .unwrap();
        config.apply(file);

        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert_eq!(config.trials.len(), 1);

        // An empty file changes nothing.
        let mut config = test_config();
        config.apply(toml::from_str("").unwrap());
        assert_eq!(config.trials.len(), 4);
    }

    #[test]
    fn test_trial_display() {
        let trial = TrialConfig::new("v1beta", "gemini-2.0-flash-exp");
        assert_eq!(trial.to_string(), "v1beta / gemini-2.0-flash-exp");
    }
}
