//! `skatefinder` - Find nearby skateparks
//!
//! This library resolves a search location, collects candidate skateparks,
//! ranks them by great-circle distance and enriches each one with weather
//! data fetched concurrently.

pub mod config;
pub mod distance;
pub mod enrichment;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod providers;
pub mod ranking;
pub mod search;

// Re-export core types for public API
pub use config::SkateFinderConfig;
pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use enrichment::enrich;
pub use error::SkateFinderError;
pub use location_resolver::{LocationInput, LocationResolver, LocationSource, ResolvedLocation};
pub use models::{
    Coordinate, DayWeather, EnrichedVenue, RankedVenue, Review, Venue, WeatherCondition,
    WeatherSnapshot,
};
pub use presentation::{JsonPresenter, Presenter, TerminalPresenter, render_card};
pub use providers::{Geocoder, PositionSource, ProviderSet, VenueProvider, WeatherProvider};
pub use ranking::rank;
pub use search::{SearchOutcome, SearchState, SearchTrigger, SkateparkSearch};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkateFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
