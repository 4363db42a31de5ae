//! Proximity ranking of candidate venues

use std::cmp::Ordering;

use crate::distance::distance_km;
use crate::models::{Coordinate, RankedVenue, Venue};

/// Annotate every venue with its distance from `origin` and order them
/// closest first.
///
/// The sort is stable: venues at equal distance keep the order the provider
/// returned them in. Nothing is filtered or de-duplicated, so the output has
/// exactly as many entries as the input. NaN distances sort last.
#[must_use]
pub fn rank(origin: Coordinate, venues: Vec<Venue>) -> Vec<RankedVenue> {
    let mut ranked: Vec<RankedVenue> = venues
        .into_iter()
        .map(|venue| RankedVenue {
            distance_km: distance_km(&origin, &venue.coordinate),
            venue,
        })
        .collect();

    ranked.sort_by(by_distance);
    ranked
}

/// Closest first; NaN after every number regardless of its sign bit
fn by_distance(a: &RankedVenue, b: &RankedVenue) -> Ordering {
    a.distance_km
        .is_nan()
        .cmp(&b.distance_km.is_nan())
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
}
