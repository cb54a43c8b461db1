//! Data models for the `AirSense` application

pub mod air_quality;
pub mod context;
pub mod location;
pub mod recommendation;

pub use air_quality::AirQualitySnapshot;
pub use context::UserContext;
pub use location::LocationQuery;
pub use recommendation::Recommendation;
