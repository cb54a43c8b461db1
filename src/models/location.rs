//! Location model for the user-supplied city/state/country query

use serde::{Deserialize, Serialize};

/// A location as entered into the form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    /// City name
    pub city: String,
    /// State or region; absent for union territories and most non-federal
    /// countries
    pub state: Option<String>,
    /// Country name
    pub country: String,
}

impl LocationQuery {
    /// Create a new location query. A blank or literal "none" state is
    /// treated as absent.
    #[must_use]
    pub fn new(city: impl Into<String>, state: Option<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.filter(|s| !s.trim().is_empty() && !s.trim().eq_ignore_ascii_case("none")),
            country: country.into(),
        }
    }

    /// Check that the required fields are present. Presence is the only
    /// validation applied to user input.
    pub fn validate(&self) -> crate::Result<()> {
        if self.city.trim().is_empty() {
            return Err(crate::AirSenseError::validation("City cannot be empty"));
        }
        if self.country.trim().is_empty() {
            return Err(crate::AirSenseError::validation("Country cannot be empty"));
        }
        Ok(())
    }

    /// Path segment of the AQI dashboard page for this location:
    /// `country/city` or `country/state/city` with lowercased,
    /// dash-separated segments
    #[must_use]
    pub fn dashboard_path(&self) -> String {
        match &self.state {
            Some(state) => format!(
                "{}/{}/{}",
                slug(&self.country),
                slug(state),
                slug(&self.city)
            ),
            None => format!("{}/{}", slug(&self.country), slug(&self.city)),
        }
    }

    /// Format location for display, e.g. "Mumbai, Maharashtra, India"
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.city, state, self.country),
            None => format!("{}, {}", self.city, self.country),
        }
    }
}

/// Lowercase a name and replace spaces with dashes for use in a URL path
fn slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}
