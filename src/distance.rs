//! Great-circle distance between coordinates.
//!
//! Distances come from the `haversine` crate in kilometers, which uses a
//! spherical Earth of radius [`EARTH_RADIUS_KM`].

use haversine::{Units, distance};

use crate::models::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// The result is symmetric and never negative. NaN components propagate to a
/// NaN distance.
///
/// # Example
/// ```
/// use skatefinder::{distance_km, Coordinate};
///
/// let south_bank = Coordinate::new(51.5074, -0.1278);
/// let croydon = Coordinate::new(51.3762, -0.0982);
///
/// let distance = distance_km(&south_bank, &croydon);
/// assert!((distance - 14.73).abs() < 0.1);
/// ```
#[inline]
#[must_use]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    distance(from.to_haversine(), to.to_haversine(), Units::Kilometers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SOUTH_BANK: Coordinate = Coordinate::new(51.5074, -0.1278);
    const CROYDON: Coordinate = Coordinate::new(51.3762, -0.0982);
    const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);
    const TOKYO: Coordinate = Coordinate::new(35.6762, 139.6503);
    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);

    #[rstest]
    #[case(SOUTH_BANK)]
    #[case(BERLIN)]
    #[case(Coordinate::new(90.0, 0.0))]
    #[case(Coordinate::new(-33.8688, 151.2093))]
    fn test_same_point_zero_distance(#[case] point: Coordinate) {
        assert_eq!(distance_km(&point, &point), 0.0);
    }

    #[rstest]
    #[case(SOUTH_BANK, CROYDON)]
    #[case(BERLIN, TOKYO)]
    #[case(NEW_YORK, TOKYO)]
    #[case(Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9))]
    fn test_symmetry(#[case] a: Coordinate, #[case] b: Coordinate) {
        let ab = distance_km(&a, &b);
        let ba = distance_km(&b, &a);
        assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
        assert!(ab > 0.0);
    }

    #[test]
    fn test_south_bank_to_croydon() {
        let distance = distance_km(&SOUTH_BANK, &CROYDON);
        assert!((distance - 14.73).abs() < 0.1, "South Bank-Croydon: {distance}");
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let distance = distance_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 180.0));
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_inequality() {
        let direct = distance_km(&BERLIN, &TOKYO);
        let via = distance_km(&BERLIN, &NEW_YORK) + distance_km(&NEW_YORK, &TOKYO);
        assert!(direct <= via);
    }

    #[test]
    fn test_nan_propagates() {
        let bad = Coordinate::new(f64::NAN, 0.0);
        assert!(distance_km(&bad, &BERLIN).is_nan());
    }
}
