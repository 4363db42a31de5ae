//! External service boundaries
//!
//! Every outside collaborator of the search pipeline sits behind one of the
//! traits below, so the ranking and enrichment core can run against the real
//! OpenStreetMap/Open-Meteo services, the built-in catalog, or randomized stubs.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::Result;
use crate::config::{
    GeocoderKind, PositionKind, SkateFinderConfig, VenueSourceKind, WeatherSourceKind,
};
use crate::models::{Coordinate, Venue, WeatherSnapshot};

pub mod catalog;
pub mod http;
pub mod ip_api;
pub mod mock_weather;
pub mod nominatim;
pub mod open_meteo;
pub mod overpass;

pub use catalog::{CatalogVenues, FixedGeocoder, FixedPosition, UnsupportedPosition};
pub use ip_api::IpApiPosition;
pub use mock_weather::{RandomWeather, StaticWeather};
pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoWeather;
pub use overpass::OverpassVenues;

/// The platform's current-position capability
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinate>;
}

/// Forward and reverse geocoding
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve free text to a coordinate
    async fn forward(&self, text: &str) -> Result<Coordinate>;
    /// Produce a human-readable label for a coordinate
    async fn reverse(&self, coordinate: Coordinate) -> Result<String>;
}

/// Supplies candidate venues around a region, in no particular order
#[async_trait]
pub trait VenueProvider: Send + Sync + Debug {
    async fn list(&self, region: Coordinate) -> Result<Vec<Venue>>;
}

/// Auxiliary per-venue data source
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherSnapshot>;
}

/// The full set of collaborators a search run needs
#[derive(Debug, Clone)]
pub struct ProviderSet {
    pub position: Arc<dyn PositionSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub venues: Arc<dyn VenueProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl ProviderSet {
    /// Construct the providers selected in the configuration.
    pub fn from_config(config: &SkateFinderConfig) -> anyhow::Result<Self> {
        let providers = &config.providers;
        let client = http::build_client(
            Duration::from_secs(providers.timeout_seconds.into()),
            &providers.user_agent,
        )
        .with_context(|| "Failed to create HTTP client")?;

        let position: Arc<dyn PositionSource> = match providers.position {
            PositionKind::Fixed => Arc::new(FixedPosition::new(providers.device_position)),
            PositionKind::IpApi => Arc::new(IpApiPosition::new(
                client.clone(),
                providers.ip_api_url.clone(),
            )),
            PositionKind::Unsupported => Arc::new(UnsupportedPosition),
        };

        let geocoder: Arc<dyn Geocoder> = match providers.geocoder {
            GeocoderKind::Fixed => Arc::new(FixedGeocoder::new(providers.geocoded_position)),
            GeocoderKind::Nominatim => Arc::new(NominatimGeocoder::new(
                client.clone(),
                providers.nominatim_url.clone(),
            )),
        };

        let venues: Arc<dyn VenueProvider> = match providers.venues {
            VenueSourceKind::Catalog => Arc::new(CatalogVenues::london()),
            VenueSourceKind::Overpass => Arc::new(OverpassVenues::new(
                client.clone(),
                providers.overpass_url.clone(),
                f64::from(config.search.radius_km),
            )),
        };

        let weather: Arc<dyn WeatherProvider> = match providers.weather {
            WeatherSourceKind::Mock => Arc::new(RandomWeather),
            WeatherSourceKind::Static => Arc::new(StaticWeather::mild()),
            WeatherSourceKind::OpenMeteo => Arc::new(OpenMeteoWeather::new(
                client,
                providers.open_meteo_url.clone(),
            )),
        };

        Ok(Self {
            position,
            geocoder,
            venues,
            weather,
        })
    }

    /// Fully offline, deterministic providers: fixed position, fixed geocoder,
    /// the London catalog and static weather.
    #[must_use]
    pub fn offline() -> Self {
        let croydon = Coordinate::new(51.3762, -0.0982);
        Self {
            position: Arc::new(FixedPosition::new(croydon)),
            geocoder: Arc::new(FixedGeocoder::new(croydon)),
            venues: Arc::new(CatalogVenues::london()),
            weather: Arc::new(StaticWeather::mild()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_builds_offline_providers() {
        let config = SkateFinderConfig::default();
        let providers = ProviderSet::from_config(&config).unwrap();

        let venues = providers
            .venues
            .list(Coordinate::new(51.3762, -0.0982))
            .await
            .unwrap();
        assert_eq!(venues.len(), 4);

        let origin = providers.geocoder.forward("anywhere").await.unwrap();
        assert_eq!(origin, config.providers.geocoded_position);
    }

    #[tokio::test]
    async fn test_unsupported_position_kind() {
        let mut config = SkateFinderConfig::default();
        config.providers.position = PositionKind::Unsupported;
        let providers = ProviderSet::from_config(&config).unwrap();

        let err = providers.position.current_position().await.unwrap_err();
        assert!(matches!(
            err,
            crate::SkateFinderError::UnsupportedCapability { .. }
        ));
    }
}
