use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("Non-finite coordinate: ({latitude}, {longitude})")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
}
