//! Optional personal context supplied alongside a location

use serde::{Deserialize, Serialize};

/// Medical conditions and planned activity, both optional. Blank strings
/// normalize to absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    /// Relevant medical conditions, e.g. "asthma, allergies"
    pub medical_conditions: Option<String>,
    /// What the user intends to do outside, e.g. "morning jog for 2 hours"
    pub planned_activity: Option<String>,
}

impl UserContext {
    /// Create a context, dropping blank fields
    #[must_use]
    pub fn new(medical_conditions: Option<String>, planned_activity: Option<String>) -> Self {
        Self {
            medical_conditions: medical_conditions.filter(|s| !s.trim().is_empty()),
            planned_activity: planned_activity.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Medical conditions for display, "None" when absent
    #[must_use]
    pub fn medical_conditions_display(&self) -> &str {
        self.medical_conditions.as_deref().unwrap_or("None")
    }

    /// Planned activity for display, "None" when absent
    #[must_use]
    pub fn planned_activity_display(&self) -> &str {
        self.planned_activity.as_deref().unwrap_or("None")
    }
}
