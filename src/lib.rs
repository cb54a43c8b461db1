//! `AirSense` - Air quality analysis with personalized health recommendations
//!
//! This library provides the core functionality for retrieving current
//! air-quality and weather metrics for a location and turning them into
//! health advice tailored to the user's medical context and planned activity.

pub mod advisor;
pub mod analysis;
pub mod api;
pub mod aqi;
pub mod config;
pub mod error;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use advisor::{GroqCompletionClient, RecommendationGenerator};
pub use analysis::{AnalysisError, AnalysisReport, AnalysisService};
pub use aqi::{AirQualityProvider, FirecrawlClient};
pub use self::config::AirSenseConfig;
pub use error::AirSenseError;
pub use models::{AirQualitySnapshot, LocationQuery, Recommendation, UserContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirSenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
