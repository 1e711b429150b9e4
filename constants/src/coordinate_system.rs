/// Mean Earth radius used by the haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Reference location the demo is built for (Beberibe, Ceará).
pub const REFERENCE_LATITUDE: f64 = -4.1847;
pub const REFERENCE_LONGITUDE: f64 = -38.1307;
pub const REFERENCE_NAME: &str = "Beberibe";

/// Beyond this distance from the reference the app runs in demonstration mode.
pub const DEMO_MODE_RADIUS_KM: f64 = 10.0;

