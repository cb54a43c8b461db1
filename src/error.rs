//! Error types and handling for the `AirSense` application

use thiserror::Error;

/// Main error type for the `AirSense` application
#[derive(Error, Debug)]
pub enum AirSenseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Air-quality data could not be fetched or parsed
    #[error("Data fetch error: {message}")]
    DataFetch { message: String },

    /// Recommendation text could not be generated
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AirSenseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new data fetch error
    pub fn data_fetch<S: Into<String>>(message: S) -> Self {
        Self::DataFetch {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirSenseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            AirSenseError::DataFetch { .. } => {
                "Air quality data is currently unavailable for this location. Please try again later."
                    .to_string()
            }
            AirSenseError::Generation { .. } => {
                "Unable to generate health recommendations right now. Please try again later."
                    .to_string()
            }
            AirSenseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AirSenseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AirSenseError::config("missing API key");
        assert!(matches!(config_err, AirSenseError::Config { .. }));

        let fetch_err = AirSenseError::data_fetch("extractor unreachable");
        assert!(matches!(fetch_err, AirSenseError::DataFetch { .. }));

        let generation_err = AirSenseError::generation("no choices in response");
        assert!(matches!(generation_err, AirSenseError::Generation { .. }));

        let validation_err = AirSenseError::validation("city cannot be empty");
        assert!(matches!(validation_err, AirSenseError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = AirSenseError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let fetch_err = AirSenseError::data_fetch("test");
        assert!(fetch_err.user_message().contains("currently unavailable"));

        let generation_err = AirSenseError::generation("test");
        assert!(
            generation_err
                .user_message()
                .contains("generate health recommendations")
        );

        let validation_err = AirSenseError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let airsense_err: AirSenseError = io_err.into();
        assert!(matches!(airsense_err, AirSenseError::Io { .. }));
    }
}
