//! Location Resolution Module
//!
//! This module turns a search location (free text or the device position)
//! into the origin coordinate of a search run plus a label for display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Coordinate;
use crate::providers::{Geocoder, PositionSource};
use crate::{Result, SkateFinderError};

/// What the user asked to search around
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationInput {
    /// Use the platform's current position
    Device,
    /// Forward-geocode free text
    Text(String),
}

/// How the origin was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationSource {
    Device,
    Geocoded,
}

/// A resolved search origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    /// Human-readable description of the origin
    pub label: String,
    pub source: LocationSource,
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location input into a search origin
    pub async fn resolve_location(
        position: &dyn PositionSource,
        geocoder: &dyn Geocoder,
        input: LocationInput,
    ) -> Result<ResolvedLocation> {
        debug!("Resolving location input: {:?}", input);

        let resolved = match input {
            LocationInput::Device => Self::resolve_device(position, geocoder).await?,
            LocationInput::Text(text) => Self::resolve_text(geocoder, &text).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            resolved.label, resolved.coordinate.lat, resolved.coordinate.lng
        );

        Ok(resolved)
    }

    /// Ask the platform for the current position, then label it via reverse
    /// geocoding. A failed reverse lookup falls back to the raw coordinates.
    async fn resolve_device(
        position: &dyn PositionSource,
        geocoder: &dyn Geocoder,
    ) -> Result<ResolvedLocation> {
        let coordinate = position.current_position().await?;
        debug!("Device position: {}", coordinate.format_label());

        let label = match geocoder.reverse(coordinate).await {
            Ok(label) if !label.trim().is_empty() => label,
            Ok(_) => {
                debug!("Empty reverse geocoding result, using coordinates as label");
                coordinate.format_label()
            }
            Err(e) => {
                debug!("Reverse geocoding failed: {}, using coordinates as label", e);
                coordinate.format_label()
            }
        };

        Ok(ResolvedLocation {
            coordinate,
            label,
            source: LocationSource::Device,
        })
    }

    /// Forward-geocode a free-text location. Blank input is rejected before
    /// any provider is consulted.
    async fn resolve_text(geocoder: &dyn Geocoder, text: &str) -> Result<ResolvedLocation> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SkateFinderError::invalid_input("location cannot be empty"));
        }

        debug!("Geocoding location name: {}", text);
        let coordinate = geocoder.forward(text).await?;

        Ok(ResolvedLocation {
            coordinate,
            label: text.to_string(),
            source: LocationSource::Geocoded,
        })
    }
}
