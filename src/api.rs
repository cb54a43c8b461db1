//! JSON API surface for the analysis pipeline

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, AnalysisService};
use crate::aqi;
use crate::models::{AirQualitySnapshot, LocationQuery, UserContext};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
}

/// The form payload as submitted by the UI
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub medical_conditions: Option<String>,
    pub planned_activity: Option<String>,
}

/// Display-ready metric fields
#[derive(Debug, Serialize)]
pub struct ApiAirQuality {
    pub aqi: f64,
    pub category: String,
    pub pm25: String,
    pub pm10: String,
    pub co: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub fetched_at: DateTime<Utc>,
}

impl From<&AirQualitySnapshot> for ApiAirQuality {
    fn from(snapshot: &AirQualitySnapshot) -> Self {
        Self {
            aqi: snapshot.aqi,
            category: snapshot.aqi_category().to_string(),
            pm25: snapshot.format_pm25(),
            pm10: snapshot.format_pm10(),
            co: snapshot.format_co(),
            temperature: snapshot.format_temperature(),
            humidity: snapshot.format_humidity(),
            wind_speed: snapshot.format_wind_speed(),
            fetched_at: snapshot.fetched_at,
        }
    }
}

/// Analysis outcome returned to the UI. On a generation failure the
/// metrics are still present and only `recommendation` is missing.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub location: String,
    /// The dashboard page the metrics were extracted from
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<ApiAirQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response with an HTTP status and a displayable message
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let location = LocationQuery::new(payload.city, payload.state, payload.country);
    location
        .validate()
        .map_err(|e| ApiError::unprocessable(e.user_message()))?;

    let context = UserContext::new(payload.medical_conditions, payload.planned_activity);
    let source_url = aqi::dashboard_url(&location);

    match state.service.analyze(location.clone(), context).await {
        Ok(report) => Ok(Json(AnalyzeResponse {
            location: report.location.display_name(),
            source_url,
            air_quality: Some((&report.snapshot).into()),
            recommendation: Some(report.recommendation.text),
            error: None,
        })),
        Err(AnalysisError::Generation { snapshot, source }) => {
            tracing::error!(
                "Recommendation generation failed for {}: {}",
                location.display_name(),
                source
            );
            Ok(Json(AnalyzeResponse {
                location: location.display_name(),
                source_url,
                air_quality: Some((&snapshot).into()),
                recommendation: None,
                error: Some(source.user_message()),
            }))
        }
        Err(err @ AnalysisError::DataFetch { .. }) => {
            tracing::error!(
                "Air quality fetch failed for {}: {}",
                location.display_name(),
                err
            );
            Err(ApiError::bad_gateway(err.user_message()))
        }
    }
}
