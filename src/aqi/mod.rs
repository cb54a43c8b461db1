//! Air-quality data retrieval
//!
//! The metrics come from a web-data-extraction provider pointed at a public
//! AQI dashboard site, not from a structured weather API. The provider does
//! the page scraping; this module owns the request, the field schema and the
//! conversion into [`AirQualitySnapshot`].

pub mod firecrawl;

pub use firecrawl::{FirecrawlClient, dashboard_url};

use crate::Result;
use crate::models::{AirQualitySnapshot, LocationQuery};

/// Source of current air-quality metrics for a location
#[async_trait::async_trait]
pub trait AirQualityProvider: Send + Sync {
    /// Fetch the current snapshot for the given location. One outbound call,
    /// no retries.
    async fn fetch(&self, location: &LocationQuery) -> Result<AirQualitySnapshot>;
}
