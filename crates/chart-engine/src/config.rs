//! Configuration for the chart analyzer

use crate::error::{EngineError, Result};
use chart_vision::Language;
use serde::{Deserialize, Serialize};

/// Model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Maximum tokens requested from the provider by default
pub const DEFAULT_MAX_TOKENS: usize = 2048;

/// Configuration for one [`ChartAnalyzer`](crate::ChartAnalyzer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Provider model identifier
    pub model: String,

    /// Language the written analysis should come back in
    pub language: Language,

    /// Maximum tokens for the provider response
    pub max_tokens: usize,

    /// Sampling temperature passed through to the provider
    pub temperature: Option<f32>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            language: Language::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "model must not be empty".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(EngineError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AnalyzerConfig
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    model: Option<String>,
    language: Option<Language>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl AnalyzerConfigBuilder {
    /// Set the provider model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the response language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the maximum response tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalyzerConfig> {
        let defaults = AnalyzerConfig::default();

        let config = AnalyzerConfig {
            model: self.model.unwrap_or(defaults.model),
            language: self.language.unwrap_or(defaults.language),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.language, Language::Thai);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::builder()
            .model("gemini-1.5-flash")
            .language(Language::English)
            .max_tokens(4096)
            .build()
            .unwrap();

        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let result = AnalyzerConfig::builder().model("  ").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_tokens() {
        let result = AnalyzerConfig::builder().max_tokens(0).build();
        assert!(result.is_err());
    }
}
