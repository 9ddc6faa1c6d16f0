use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::error::GeoError;

/// A validated (latitude, longitude) pair in decimal degrees.
///
/// Construction rejects NaN and infinite components, so every distance
/// computed from a `GeoPoint` is finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "latitude")]
    lat: f64,
    #[serde(rename = "longitude")]
    lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GeoError::NonFiniteCoordinate {
                latitude: lat,
                longitude: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Position on the unit sphere. Chord length between two of these is
    /// monotonic in great-circle distance, which is what the R-tree
    /// detector searches on.
    pub(crate) fn unit_vector(&self) -> [f64; 3] {
        let (lat, lon) = (self.lat.to_radians(), self.lon.to_radians());
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    fn to_geo(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Great-circle distance in kilometers on a sphere of Earth's mean radius.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    Haversine::distance(a.to_geo(), b.to_geo()) / 1000.0
}

/// Euclidean distance over raw (latitude, longitude) degrees.
///
/// This is not a geodesic distance. Nearest-neighbor reporting uses it
/// on purpose and its values are in degree units.
pub fn planar_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = a.lat - b.lat;
    let dlon = a.lon - b.lon;
    (dlat * dlat + dlon * dlon).sqrt()
}

/// True when `b` lies within `radius_km` of `a`. The boundary is inclusive.
pub fn is_within_radius(a: &GeoPoint, b: &GeoPoint, radius_km: f64) -> bool {
    haversine_km(a, b) <= radius_km
}
