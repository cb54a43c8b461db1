//! Configuration management for the `AirSense` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AirSenseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `AirSense` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirSenseConfig {
    /// Web-data extraction provider configuration
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Completion provider configuration
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Extraction provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Extraction provider API key
    pub api_key: Option<String>,
    /// Base URL for the extraction API
    #[serde(default = "default_extractor_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_extractor_timeout")]
    pub timeout_seconds: u32,
}

/// Completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Completion provider API key
    pub api_key: Option<String>,
    /// Base URL for the completion API
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion request
    #[serde(default = "default_completion_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_completion_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_extractor_base_url() -> String {
    "https://api.firecrawl.dev/v1".to_string()
}

fn default_extractor_timeout() -> u32 {
    30
}

fn default_completion_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_completion_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_completion_timeout() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    3000
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_extractor_base_url(),
            timeout_seconds: default_extractor_timeout(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            timeout_seconds: default_completion_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for AirSenseConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            completion: CompletionConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AirSenseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with AIRSENSE_ prefix,
        // e.g. AIRSENSE_EXTRACTOR__API_KEY, AIRSENSE_COMPLETION__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("AIRSENSE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AirSenseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airsense").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.extractor.base_url.is_empty() {
            self.extractor.base_url = default_extractor_base_url();
        }
        if self.extractor.timeout_seconds == 0 {
            self.extractor.timeout_seconds = default_extractor_timeout();
        }
        if self.completion.base_url.is_empty() {
            self.completion.base_url = default_completion_base_url();
        }
        if self.completion.model.is_empty() {
            self.completion.model = default_completion_model();
        }
        if self.completion.timeout_seconds == 0 {
            self.completion.timeout_seconds = default_completion_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, api_key) in [
            ("Extractor", &self.extractor.api_key),
            ("Completion", &self.completion.api_key),
        ] {
            if let Some(api_key) = api_key {
                if api_key.is_empty() {
                    return Err(AirSenseError::config(format!(
                        "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }

                if api_key.len() < 8 {
                    return Err(AirSenseError::config(format!(
                        "{name} API key appears to be invalid (too short). Please check your API key."
                    ))
                    .into());
                }

                if api_key.len() > 200 {
                    return Err(AirSenseError::config(format!(
                        "{name} API key appears to be invalid (too long). Please check your API key."
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.extractor.timeout_seconds > 300 {
            return Err(
                AirSenseError::config("Extractor timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.completion.timeout_seconds > 300 {
            return Err(
                AirSenseError::config("Completion timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirSenseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirSenseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, base_url) in [
            ("Extractor", &self.extractor.base_url),
            ("Completion", &self.completion.base_url),
        ] {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(AirSenseError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.completion.model.trim().is_empty() {
            return Err(AirSenseError::config("Completion model cannot be blank").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AirSenseConfig::default();
        assert_eq!(config.extractor.base_url, "https://api.firecrawl.dev/v1");
        assert_eq!(config.extractor.timeout_seconds, 30);
        assert_eq!(config.completion.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.completion.model, "llama-3.3-70b-versatile");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 3000);
        assert!(config.extractor.api_key.is_none());
        assert!(config.completion.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_keys() {
        let config = AirSenseConfig::default();
        // Keys are optional at load time; clients enforce presence on construction
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_valid_api_keys() {
        let mut config = AirSenseConfig::default();
        config.extractor.api_key = Some("fc-valid_api_key_123".to_string());
        config.completion.api_key = Some("gsk_valid_api_key_123".to_string());
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = AirSenseConfig::default();
        config.extractor.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AirSenseConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid log level")
        );
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AirSenseConfig::default();
        config.completion.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = AirSenseConfig::default();
        config.extractor.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = AirSenseConfig::default();
        config.completion.model = String::new();
        config.server.port = 0;
        config.apply_defaults();
        assert_eq!(config.completion.model, "llama-3.3-70b-versatile");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_config_path_generation() {
        let path = AirSenseConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("airsense"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
