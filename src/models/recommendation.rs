//! Generated health recommendation

use serde::{Deserialize, Serialize};

/// Advice text returned verbatim from the completion provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub text: String,
}

impl Recommendation {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
