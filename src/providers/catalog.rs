//! Built-in offline providers: the London skatepark catalog, a fixed geocoder
//! and fixed/unsupported position sources.

use async_trait::async_trait;
use tracing::debug;

use super::{Geocoder, PositionSource, VenueProvider};
use crate::models::{Coordinate, Review, Venue};
use crate::{Result, SkateFinderError};

struct CatalogEntry {
    name: &'static str,
    address: &'static str,
    lat: f64,
    lng: f64,
    cost: &'static str,
    rating: f32,
    review_count: u32,
    reviews: &'static [(&'static str, &'static str)],
}

const LONDON_SKATEPARKS: &[CatalogEntry] = &[
    CatalogEntry {
        name: "South Bank Skate Space",
        address: "Queen's Walk, London SE1 9PP",
        lat: 51.5074,
        lng: -0.1278,
        cost: "Free",
        rating: 4.5,
        review_count: 324,
        reviews: &[
            ("Iconic spot with amazing views of the Thames!", "SkaterDude123"),
            ("Gets crowded but the atmosphere is unbeatable", "BoardMaster"),
        ],
    },
    CatalogEntry {
        name: "House of Vans London",
        address: "The Old Vic Tunnels, London SE1 8LZ",
        lat: 51.5033,
        lng: -0.1195,
        cost: "Free (events)",
        rating: 4.7,
        review_count: 189,
        reviews: &[
            ("Amazing indoor park with great events", "VansLover"),
            ("Perfect for rainy days, excellent bowls", "BowlRider"),
        ],
    },
    CatalogEntry {
        name: "Meanwhile Gardens Skatepark",
        address: "Meanwhile Gardens, London W10 6DX",
        lat: 51.5241,
        lng: -0.2097,
        cost: "Free",
        rating: 4.2,
        review_count: 156,
        reviews: &[
            ("Classic concrete bowls, old school vibes", "OldSchoolSkater"),
            ("Great for bowl skating, can get busy", "ConcreteKing"),
        ],
    },
    CatalogEntry {
        name: "Stockwell Skatepark",
        address: "Stockwell Park Walk, London SW9 0DA",
        lat: 51.4720,
        lng: -0.1226,
        cost: "Free",
        rating: 4.4,
        review_count: 267,
        reviews: &[
            ("One of the best street courses in London", "StreetSkater"),
            ("Excellent for technical skating", "TechMaster"),
        ],
    },
];

impl From<&CatalogEntry> for Venue {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            address: entry.address.to_string(),
            coordinate: Coordinate::new(entry.lat, entry.lng),
            cost: entry.cost.to_string(),
            rating: entry.rating,
            review_count: entry.review_count,
            reviews: entry
                .reviews
                .iter()
                .map(|(text, author)| Review {
                    text: (*text).to_string(),
                    author: (*author).to_string(),
                })
                .collect(),
        }
    }
}

/// A fixed list of venues returned regardless of the requested region
#[derive(Debug, Clone)]
pub struct CatalogVenues {
    venues: Vec<Venue>,
}

impl CatalogVenues {
    #[must_use]
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// The four London skateparks
    #[must_use]
    pub fn london() -> Self {
        Self::new(LONDON_SKATEPARKS.iter().map(Venue::from).collect())
    }
}

#[async_trait]
impl VenueProvider for CatalogVenues {
    async fn list(&self, region: Coordinate) -> Result<Vec<Venue>> {
        debug!(
            "Catalog ignores region {}, returning {} venues",
            region.format_label(),
            self.venues.len()
        );
        Ok(self.venues.clone())
    }
}

/// Resolves every query to one configured coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedGeocoder {
    coordinate: Coordinate,
}

impl FixedGeocoder {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn forward(&self, text: &str) -> Result<Coordinate> {
        debug!("Fixed geocoder resolving '{}' to {}", text, self.coordinate.format_label());
        Ok(self.coordinate)
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<String> {
        Ok(format!("Location: {}", coordinate.format_label()))
    }
}

/// Stands in for a device that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    coordinate: Coordinate,
}

impl FixedPosition {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate> {
        Ok(self.coordinate)
    }
}

/// A platform without any location capability
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPosition;

#[async_trait]
impl PositionSource for UnsupportedPosition {
    async fn current_position(&self) -> Result<Coordinate> {
        Err(SkateFinderError::unsupported(
            "no position source is available on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_london_catalog_contents() {
        let venues = CatalogVenues::london()
            .list(Coordinate::new(0.0, 0.0))
            .await
            .unwrap();

        let names: Vec<&str> = venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "South Bank Skate Space",
                "House of Vans London",
                "Meanwhile Gardens Skatepark",
                "Stockwell Skatepark",
            ]
        );
        assert!(venues.iter().all(|v| v.coordinate.is_valid()));
        assert!(venues.iter().all(|v| v.reviews.len() == 2));
        assert_eq!(venues[1].cost, "Free (events)");
    }

    #[tokio::test]
    async fn test_fixed_geocoder_reverse_label() {
        let geocoder = FixedGeocoder::new(Coordinate::new(51.3762, -0.0982));
        let label = geocoder
            .reverse(Coordinate::new(51.472_04, -0.122_61))
            .await
            .unwrap();
        assert_eq!(label, "Location: 51.4720, -0.1226");
    }

    #[tokio::test]
    async fn test_unsupported_position() {
        let err = UnsupportedPosition.current_position().await.unwrap_err();
        assert!(matches!(err, SkateFinderError::UnsupportedCapability { .. }));
    }
}
