//! Fixed prompt template for the completion request
//!
//! Every metric value and every provided context field must appear as a
//! literal substring of the built prompt.

use crate::models::{AirQualitySnapshot, LocationQuery, UserContext};

/// Build the completion prompt from the fetched metrics and user context
#[must_use]
pub fn build_prompt(
    location: &LocationQuery,
    snapshot: &AirQualitySnapshot,
    context: &UserContext,
) -> String {
    format!(
        "Based on the following air quality conditions in {location}:\n\
         - Overall AQI: {aqi} ({category})\n\
         - PM2.5 Level: {pm25} µg/m³\n\
         - PM10 Level: {pm10} µg/m³\n\
         - CO Level: {co} ppb\n\
         \n\
         Weather conditions:\n\
         - Temperature: {temperature}°C\n\
         - Humidity: {humidity}%\n\
         - Wind Speed: {wind_speed} km/h\n\
         \n\
         User's context:\n\
         - Medical Conditions: {medical_conditions}\n\
         - Planned Activity: {planned_activity}\n\
         \n\
         Provide comprehensive health recommendations covering:\n\
         1. Impact of the current air quality on health\n\
         2. Necessary safety precautions for the planned activity\n\
         3. Whether the planned activity is advisable\n\
         4. The best time to conduct the activity",
        location = location.display_name(),
        aqi = snapshot.aqi,
        category = snapshot.aqi_category(),
        pm25 = snapshot.pm25,
        pm10 = snapshot.pm10,
        co = snapshot.co,
        temperature = snapshot.temperature,
        humidity = snapshot.humidity,
        wind_speed = snapshot.wind_speed,
        medical_conditions = context.medical_conditions_display(),
        planned_activity = context.planned_activity_display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_snapshot() -> AirQualitySnapshot {
        AirQualitySnapshot {
            aqi: 153.0,
            pm25: 55.2,
            pm10: 102.0,
            co: 410.0,
            temperature: 31.0,
            humidity: 62.0,
            wind_speed: 9.5,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_contains_every_metric_value() {
        let location = LocationQuery::new(
            "Mumbai",
            Some("Maharashtra".to_string()),
            "India",
        );
        let snapshot = sample_snapshot();
        let context = UserContext::new(
            Some("Asthma".to_string()),
            Some("Morning walk for 30 minutes".to_string()),
        );

        let prompt = build_prompt(&location, &snapshot, &context);

        for value in ["153", "55.2", "102", "410", "31", "62", "9.5"] {
            assert!(prompt.contains(value), "prompt missing metric value {value}");
        }
        assert!(prompt.contains("Mumbai, Maharashtra, India"));
        assert!(prompt.contains("Asthma"));
        assert!(prompt.contains("Morning walk for 30 minutes"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let location = LocationQuery::new("Delhi", None, "India");
        let snapshot = sample_snapshot();
        let context = UserContext::default();

        let first = build_prompt(&location, &snapshot, &context);
        let second = build_prompt(&location, &snapshot, &context);
        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_context_renders_none() {
        let location = LocationQuery::new("Delhi", None, "India");
        let prompt = build_prompt(&location, &sample_snapshot(), &UserContext::default());

        assert!(prompt.contains("Medical Conditions: None"));
        assert!(prompt.contains("Planned Activity: None"));
    }
}
