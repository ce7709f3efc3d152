//! Great-circle distance between geographic coordinates.

use serde::{Deserialize, Serialize};

/// A decimal-degree latitude/longitude pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle (haversine) distance to another coordinate, in meters.
    pub fn distance(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        let a = Coordinate::new(55.611_87, 37.208_26);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn known_distance_is_within_tolerance() {
        // Moscow <-> Saint Petersburg, roughly 635 km as the crow flies.
        let moscow = Coordinate::new(55.751_244, 37.618_423);
        let spb = Coordinate::new(59.938_63, 30.313_42);
        let d = moscow.distance(&spb);
        assert!((d - 635_000.0).abs() < 15_000.0, "distance was {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(55.0, 37.0);
        let b = Coordinate::new(55.0, 37.02);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-9);
    }
}
