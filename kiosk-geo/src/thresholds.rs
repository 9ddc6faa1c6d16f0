//! Spatial constants shared by the clustering detectors and the pipeline.
//!
//! The financial cutoffs (breakeven, tier boundaries) live in
//! `kiosk-pipeline/config.rs`; only geometry belongs here.

/// Default clustering radius in kilometers. Two kiosks closer than this
/// (inclusive) are considered to compete for the same foot traffic.
pub const DEFAULT_CLUSTER_RADIUS_KM: f64 = 5.0;

/// Mean Earth radius in kilometers (IUGG), the sphere used for all
/// great-circle distances.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Relative slack applied to the chord search radius of the indexed
/// detector. Candidates are always re-checked with the exact haversine
/// distance, so this only has to absorb floating-point noise.
pub const CHORD_SEARCH_SLACK: f64 = 1e-6;
