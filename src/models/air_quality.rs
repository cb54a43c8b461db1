//! Air quality snapshot model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation of air-quality and weather metrics for one location.
/// Produced once per request and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirQualitySnapshot {
    /// Composite Air Quality Index
    pub aqi: f64,
    /// Particulate matter up to 2.5 micrometers, in µg/m³
    pub pm25: f64,
    /// Particulate matter up to 10 micrometers, in µg/m³
    pub pm10: f64,
    /// Carbon monoxide level in ppb
    pub co: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// When this snapshot was retrieved
    pub fetched_at: DateTime<Utc>,
}

impl AirQualitySnapshot {
    /// Map an AQI value to its standard category label
    #[must_use]
    pub fn aqi_category(&self) -> &'static str {
        match self.aqi {
            v if v <= 50.0 => "Good",
            v if v <= 100.0 => "Moderate",
            v if v <= 150.0 => "Unhealthy for Sensitive Groups",
            v if v <= 200.0 => "Unhealthy",
            v if v <= 300.0 => "Very Unhealthy",
            _ => "Hazardous",
        }
    }

    /// Format PM2.5 with unit
    #[must_use]
    pub fn format_pm25(&self) -> String {
        format!("{} µg/m³", self.pm25)
    }

    /// Format PM10 with unit
    #[must_use]
    pub fn format_pm10(&self) -> String {
        format!("{} µg/m³", self.pm10)
    }

    /// Format carbon monoxide with unit
    #[must_use]
    pub fn format_co(&self) -> String {
        format!("{} ppb", self.co)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind_speed(&self) -> String {
        format!("{} km/h", self.wind_speed)
    }
}
