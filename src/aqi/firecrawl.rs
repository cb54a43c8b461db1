//! Firecrawl extraction client
//!
//! Issues a single `/extract` call per request, targeting the aqi.in
//! dashboard page for the queried location, and parses the structured
//! response into an [`AirQualitySnapshot`].

use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::AirSenseConfig;
use crate::models::{AirQualitySnapshot, LocationQuery};
use crate::{AirSenseError, Result};

use super::AirQualityProvider;

/// Dashboard site the extraction provider scrapes
const DASHBOARD_BASE_URL: &str = "https://www.aqi.in/dashboard";

/// Instruction sent with every extraction request
const EXTRACTION_PROMPT: &str = "Extract the current real-time AQI, temperature, humidity, \
     wind speed, PM2.5, PM10, and CO levels from the page.";

/// Firecrawl extraction API client
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Dashboard page URL for a location, e.g.
/// `https://www.aqi.in/dashboard/india/maharashtra/mumbai`
#[must_use]
pub fn dashboard_url(location: &LocationQuery) -> String {
    format!("{}/{}", DASHBOARD_BASE_URL, location.dashboard_path())
}

impl FirecrawlClient {
    /// Create a new client. Fails when no extractor API key is configured.
    pub fn new(config: &AirSenseConfig) -> Result<Self> {
        let api_key = config
            .extractor
            .api_key
            .clone()
            .ok_or_else(|| AirSenseError::config("Extractor API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.extractor.timeout_seconds.into()))
            .user_agent("AirSense/0.1.0")
            .build()
            .map_err(|e| AirSenseError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.extractor.base_url.clone(),
        })
    }

    /// JSON schema naming the fields the extractor must return
    fn extraction_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "aqi": {"type": "number", "description": "Air Quality Index"},
                "temperature": {"type": "number", "description": "Temperature in degrees Celsius"},
                "humidity": {"type": "number", "description": "Humidity percentage"},
                "wind_speed": {"type": "number", "description": "Wind speed in kilometers per hour"},
                "pm25": {"type": "number", "description": "Particulate Matter 2.5 micrometers"},
                "pm10": {"type": "number", "description": "Particulate Matter 10 micrometers"},
                "co": {"type": "number", "description": "Carbon Monoxide level"}
            },
            "required": ["aqi", "temperature", "humidity", "pm25", "pm10", "co"]
        })
    }
}

#[async_trait::async_trait]
impl AirQualityProvider for FirecrawlClient {
    async fn fetch(&self, location: &LocationQuery) -> Result<AirQualitySnapshot> {
        let page_url = dashboard_url(location);
        info!(
            "Fetching air quality for {} via {}",
            location.display_name(),
            page_url
        );

        let request = wire::ExtractRequest {
            urls: vec![format!("{page_url}/*")],
            prompt: EXTRACTION_PROMPT.to_string(),
            schema: Self::extraction_schema(),
        };

        let url = format!("{}/extract", self.base_url);
        debug!("Extraction API request URL: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Extraction request failed: {}", e);
                AirSenseError::data_fetch(format!("Extraction request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                401 => Err(AirSenseError::data_fetch(
                    "Invalid or missing extraction API key",
                )),
                _ => Err(AirSenseError::data_fetch(format!(
                    "Extraction provider error {status}: {error_text}"
                ))),
            };
        }

        let envelope: wire::ExtractResponse = response.json().await.map_err(|e| {
            error!("Failed to parse extraction response: {}", e);
            AirSenseError::data_fetch("Invalid data received from extraction provider")
        })?;

        let snapshot = wire::into_snapshot(envelope)?;
        info!(
            "Air quality for {}: AQI {} ({})",
            location.display_name(),
            snapshot.aqi,
            snapshot.aqi_category()
        );

        Ok(snapshot)
    }
}

/// Extraction API request and response structures
mod wire {
    use super::{AirQualitySnapshot, AirSenseError, Result, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct ExtractRequest {
        pub urls: Vec<String>,
        pub prompt: String,
        pub schema: serde_json::Value,
    }

    /// Response envelope from the extraction API
    #[derive(Debug, Deserialize)]
    pub struct ExtractResponse {
        pub success: bool,
        #[serde(default)]
        pub status: Option<String>,
        pub data: Option<ExtractData>,
    }

    /// The scraped fields. A missing metric fails deserialization, which
    /// surfaces as the single data-unavailable error.
    #[derive(Debug, Deserialize)]
    pub struct ExtractData {
        pub aqi: f64,
        pub pm25: f64,
        pub pm10: f64,
        pub co: f64,
        pub temperature: f64,
        pub humidity: f64,
        // The dashboard omits wind on calm days
        pub wind_speed: Option<f64>,
    }

    pub fn into_snapshot(envelope: ExtractResponse) -> Result<AirQualitySnapshot> {
        if !envelope.success {
            return Err(AirSenseError::data_fetch(format!(
                "Extraction failed: {}",
                envelope.status.unwrap_or_else(|| "unknown status".to_string())
            )));
        }

        let data = envelope.data.ok_or_else(|| {
            AirSenseError::data_fetch("Extraction succeeded but returned no data")
        })?;

        Ok(AirQualitySnapshot {
            aqi: data.aqi,
            pm25: data.pm25,
            pm10: data.pm10,
            co: data.co,
            temperature: data.temperature,
            humidity: data.humidity,
            wind_speed: data.wind_speed.unwrap_or(0.0),
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirSenseConfig;

    #[test]
    fn test_client_requires_api_key() {
        let config = AirSenseConfig::default();
        let result = FirecrawlClient::new(&config);
        assert!(matches!(result, Err(AirSenseError::Config { .. })));
    }

    #[test]
    fn test_client_with_api_key() {
        let mut config = AirSenseConfig::default();
        config.extractor.api_key = Some("fc-test_key_123".to_string());
        assert!(FirecrawlClient::new(&config).is_ok());
    }

    #[test]
    fn test_dashboard_url() {
        let location = LocationQuery::new(
            "Mumbai",
            Some("Maharashtra".to_string()),
            "India",
        );
        assert_eq!(
            dashboard_url(&location),
            "https://www.aqi.in/dashboard/india/maharashtra/mumbai"
        );
    }

    #[test]
    fn test_extraction_schema_names_all_metrics() {
        let schema = FirecrawlClient::extraction_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["aqi", "pm25", "pm10", "co", "temperature", "humidity", "wind_speed"] {
            assert!(properties.contains_key(field), "schema missing {field}");
        }
    }

    #[test]
    fn test_parse_successful_envelope() {
        let raw = r#"{
            "success": true,
            "status": "completed",
            "data": {
                "aqi": 153.0,
                "pm25": 55.2,
                "pm10": 102.0,
                "co": 410.0,
                "temperature": 31.0,
                "humidity": 62.0,
                "wind_speed": 9.5
            }
        }"#;
        let envelope: wire::ExtractResponse = serde_json::from_str(raw).unwrap();
        let snapshot = wire::into_snapshot(envelope).unwrap();
        assert_eq!(snapshot.aqi, 153.0);
        assert_eq!(snapshot.pm25, 55.2);
        assert_eq!(snapshot.wind_speed, 9.5);
    }

    #[test]
    fn test_null_wind_speed_defaults_to_zero() {
        let raw = r#"{
            "success": true,
            "data": {
                "aqi": 40.0,
                "pm25": 8.0,
                "pm10": 15.0,
                "co": 200.0,
                "temperature": 18.0,
                "humidity": 55.0,
                "wind_speed": null
            }
        }"#;
        let envelope: wire::ExtractResponse = serde_json::from_str(raw).unwrap();
        let snapshot = wire::into_snapshot(envelope).unwrap();
        assert_eq!(snapshot.wind_speed, 0.0);
    }

    #[test]
    fn test_unsuccessful_envelope_is_an_error() {
        let raw = r#"{"success": false, "status": "failed", "data": null}"#;
        let envelope: wire::ExtractResponse = serde_json::from_str(raw).unwrap();
        let result = wire::into_snapshot(envelope);
        assert!(matches!(result, Err(AirSenseError::DataFetch { .. })));
    }

    #[test]
    fn test_missing_metric_fails_parsing() {
        // No pm25 field
        let raw = r#"{
            "success": true,
            "data": {
                "aqi": 40.0,
                "pm10": 15.0,
                "co": 200.0,
                "temperature": 18.0,
                "humidity": 55.0,
                "wind_speed": 3.0
            }
        }"#;
        assert!(serde_json::from_str::<wire::ExtractResponse>(raw).is_err());
    }
}
