//! Request pipeline: fetch air-quality metrics, then generate advice
//!
//! The two provider calls run strictly in sequence because the completion
//! prompt embeds the fetched metrics. A fetch failure halts the pipeline
//! before the generator is ever invoked.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::AirSenseError;
use crate::advisor::RecommendationGenerator;
use crate::aqi::AirQualityProvider;
use crate::models::{AirQualitySnapshot, LocationQuery, Recommendation, UserContext};

/// Result of a completed analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub location: LocationQuery,
    pub snapshot: AirQualitySnapshot,
    pub recommendation: Recommendation,
}

/// The two failure kinds of the pipeline. A generation failure keeps the
/// snapshot that was already fetched so the caller can still display it.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{source}")]
    DataFetch {
        #[source]
        source: AirSenseError,
    },

    #[error("{source}")]
    Generation {
        snapshot: AirQualitySnapshot,
        #[source]
        source: AirSenseError,
    },
}

impl AnalysisError {
    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::DataFetch { source } | AnalysisError::Generation { source, .. } => {
                source.user_message()
            }
        }
    }
}

/// Sequences the air-quality fetch and the recommendation generation.
/// Stateless across requests; holds only the two provider handles.
pub struct AnalysisService {
    provider: Arc<dyn AirQualityProvider>,
    generator: Arc<dyn RecommendationGenerator>,
}

impl AnalysisService {
    #[must_use]
    pub fn new(
        provider: Arc<dyn AirQualityProvider>,
        generator: Arc<dyn RecommendationGenerator>,
    ) -> Self {
        Self {
            provider,
            generator,
        }
    }

    /// Run the full pipeline for one request
    pub async fn analyze(
        &self,
        location: LocationQuery,
        context: UserContext,
    ) -> Result<AnalysisReport, AnalysisError> {
        let snapshot = self
            .provider
            .fetch(&location)
            .await
            .map_err(|source| AnalysisError::DataFetch { source })?;

        debug!(
            "Fetched snapshot for {}, generating recommendation",
            location.display_name()
        );

        let recommendation = self
            .generator
            .generate(&location, &snapshot, &context)
            .await
            .map_err(|source| AnalysisError::Generation {
                snapshot: snapshot.clone(),
                source,
            })?;

        Ok(AnalysisReport {
            location,
            snapshot,
            recommendation,
        })
    }
}
