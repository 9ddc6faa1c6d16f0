//! Proximity clustering: a point is clustered when at least one *other*
//! point lies within the clustering radius (great-circle, inclusive).
//!
//! Two interchangeable detectors are provided. `ExhaustiveDetector` is the
//! reference O(N²) scan; `IndexedDetector` prunes candidates with an R-tree
//! and confirms each one with the same haversine test, so both produce
//! identical flags for any input.

use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::distance::{is_within_radius, GeoPoint};
use crate::thresholds::{CHORD_SEARCH_SLACK, EARTH_MEAN_RADIUS_KM};

/// Flags every point that has a neighbor within `radius_km`.
///
/// The output has one entry per input point, in input order. With fewer
/// than two points nothing is clustered.
pub trait ClusterDetector: Send + Sync {
    fn detect(&self, points: &[GeoPoint], radius_km: f64) -> Vec<bool>;

    /// Returns a stable name for logging.
    fn name(&self) -> &'static str;
}

/// Pairwise scan over all points, parallelized per row with Rayon.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustiveDetector;

impl ClusterDetector for ExhaustiveDetector {
    fn detect(&self, points: &[GeoPoint], radius_km: f64) -> Vec<bool> {
        points
            .par_iter()
            .enumerate()
            .map(|(i, a)| {
                points
                    .iter()
                    .enumerate()
                    .any(|(j, b)| i != j && is_within_radius(a, b, radius_km))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

/// R-tree accelerated detector.
///
/// Points are indexed as unit vectors on the sphere. The chord between two
/// unit vectors is `2 sin(θ/2)` for central angle θ, which grows with
/// great-circle distance, so a Euclidean ball query of the matching chord
/// radius returns a superset of the true neighbors. Each candidate is then
/// checked with `is_within_radius`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexedDetector;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

impl IndexedDetector {
    fn chord_radius(radius_km: f64) -> f64 {
        let theta = (radius_km / EARTH_MEAN_RADIUS_KM).clamp(0.0, std::f64::consts::PI);
        2.0 * (theta / 2.0).sin() * (1.0 + CHORD_SEARCH_SLACK) + f64::EPSILON
    }
}

impl ClusterDetector for IndexedDetector {
    fn detect(&self, points: &[GeoPoint], radius_km: f64) -> Vec<bool> {
        if points.len() < 2 || radius_km < 0.0 {
            return vec![false; points.len()];
        }

        let tree: RTree<IndexedPoint> = RTree::bulk_load(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| IndexedPoint::new(p.unit_vector(), i))
                .collect(),
        );
        let chord = Self::chord_radius(radius_km);
        let chord_sq = chord * chord;
        log::debug!(
            "indexed {} points, chord search radius {:.3e} for {} km",
            tree.size(),
            chord,
            radius_km
        );

        points
            .par_iter()
            .enumerate()
            .map(|(i, a)| {
                tree.locate_within_distance(a.unit_vector(), chord_sq)
                    .any(|candidate| {
                        candidate.data != i
                            && is_within_radius(a, &points[candidate.data], radius_km)
                    })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "indexed"
    }
}
