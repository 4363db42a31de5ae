//! Venue models as they flow through the ranking and enrichment stages

use serde::{Deserialize, Serialize};

use super::{Coordinate, WeatherSnapshot};

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// A user review attached to a venue
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub text: String,
    pub author: String,
}

/// A skatepark as supplied by a venue provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Venue {
    pub name: String,
    /// Postal address, used for the directions hand-off
    pub address: String,
    pub coordinate: Coordinate,
    /// Free-form cost description ("Free", "Free (events)", "£5")
    pub cost: String,
    /// Average rating between 0 and 5
    pub rating: f32,
    pub review_count: u32,
    pub reviews: Vec<Review>,
}

impl Venue {
    /// Whether the cost text advertises free entry
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.cost.to_lowercase().contains("free")
    }

    /// Five-character star bar, filled up to the whole part of the rating
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0.0, 5.0).floor() as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }

    /// Outbound link to a mapping service with this venue's address as destination
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!("{DIRECTIONS_BASE_URL}{}", urlencoding::encode(&self.address))
    }
}

/// A venue annotated with its distance from the search origin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RankedVenue {
    #[serde(flatten)]
    pub venue: Venue,
    pub distance_km: f64,
}

/// A ranked venue together with its weather snapshot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichedVenue {
    #[serde(flatten)]
    pub ranked: RankedVenue,
    pub weather: WeatherSnapshot,
}

impl EnrichedVenue {
    #[must_use]
    pub fn venue(&self) -> &Venue {
        &self.ranked.venue
    }

    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.ranked.distance_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn venue(cost: &str, rating: f32) -> Venue {
        Venue {
            name: "Stockwell Skatepark".to_string(),
            address: "Stockwell Park Walk, London SW9 0DA".to_string(),
            coordinate: Coordinate::new(51.4720, -0.1226),
            cost: cost.to_string(),
            rating,
            review_count: 267,
            reviews: vec![],
        }
    }

    #[rstest]
    #[case("Free", true)]
    #[case("Free (events)", true)]
    #[case("FREE", true)]
    #[case("£5 per session", false)]
    fn test_is_free(#[case] cost: &str, #[case] free: bool) {
        assert_eq!(venue(cost, 4.0).is_free(), free);
    }

    #[rstest]
    #[case(4.4, "★★★★☆")]
    #[case(4.7, "★★★★☆")]
    #[case(5.0, "★★★★★")]
    #[case(0.0, "☆☆☆☆☆")]
    #[case(7.0, "★★★★★")]
    fn test_stars(#[case] rating: f32, #[case] expected: &str) {
        assert_eq!(venue("Free", rating).stars(), expected);
    }

    #[test]
    fn test_directions_url_encodes_address() {
        let url = venue("Free", 4.4).directions_url();
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&destination=Stockwell%20Park%20Walk%2C%20London%20SW9%200DA"
        );
    }
}
