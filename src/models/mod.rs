//! Data models for the skatefinder pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: Geographic positions
//! - Venue: Skateparks and their ranked/enriched forms
//! - Weather: Per-venue weather snapshots

pub mod coordinate;
pub mod venue;
pub mod weather;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use venue::{EnrichedVenue, RankedVenue, Review, Venue};
pub use weather::{DayWeather, WeatherCondition, WeatherSnapshot};
