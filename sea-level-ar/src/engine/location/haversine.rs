use serde::{Deserialize, Serialize};

use constants::coordinate_system::EARTH_RADIUS_KM;

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometres.
///
/// Operation order follows the textbook haversine so results are
/// reproducible bit for bit across implementations.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = to_radians(to.latitude - from.latitude);
    let d_lon = to_radians(to.longitude - from.longitude);
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + to_radians(from.latitude).cos()
            * to_radians(to.latitude).cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::coordinate_system::{REFERENCE_LATITUDE, REFERENCE_LONGITUDE};

    const REFERENCE: GeoPoint = GeoPoint::new(REFERENCE_LATITUDE, REFERENCE_LONGITUDE);

    /// Degrees of latitude spanning `km` along a meridian.
    fn meridian_degrees(km: f64) -> f64 {
        km / (EARTH_RADIUS_KM * std::f64::consts::PI / 180.0)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(REFERENCE, REFERENCE), 0.0);
        let elsewhere = GeoPoint::new(51.5074, -0.1278);
        assert_eq!(haversine_km(elsewhere, elsewhere), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (REFERENCE, GeoPoint::new(-3.7319, -38.5267)),
            (GeoPoint::new(51.5074, -0.1278), GeoPoint::new(40.7128, -74.0060)),
            (GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(35.6762, 139.6503)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }
    }

    #[test]
    fn ten_kilometres_along_meridian() {
        let north = GeoPoint::new(
            REFERENCE.latitude + meridian_degrees(10.0),
            REFERENCE.longitude,
        );
        let distance = haversine_km(REFERENCE, north);
        assert!((distance - 10.0).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn london_to_new_york() {
        let distance = haversine_km(
            GeoPoint::new(51.5074, -0.1278),
            GeoPoint::new(40.7128, -74.0060),
        );
        assert!((distance - 5570.2).abs() < 1.0, "got {distance}");
    }
}
