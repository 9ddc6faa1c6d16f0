pub mod cluster;
pub mod distance;
pub mod error;
pub mod nearest;
pub mod thresholds;

pub use cluster::{ClusterDetector, ExhaustiveDetector, IndexedDetector};
pub use distance::{haversine_km, is_within_radius, planar_distance, GeoPoint};
pub use error::GeoError;
pub use nearest::nearest_neighbor_distances;
