use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::distance::GeoPoint;

type PlanarPoint = GeomWithData<[f64; 2], usize>;

/// Exact nearest-neighbor distance for every point, measured with
/// `planar_distance` (Euclidean over raw degrees).
///
/// Equivalent to a k=2 search that drops the self match. Returns `None`
/// when fewer than two points are given, since no point has a peer.
pub fn nearest_neighbor_distances(points: &[GeoPoint]) -> Option<Vec<f64>> {
    if points.len() < 2 {
        return None;
    }

    let tree: RTree<PlanarPoint> = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .map(|(i, p)| PlanarPoint::new([p.lat(), p.lon()], i))
            .collect(),
    );

    let distances = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let query = [p.lat(), p.lon()];
            tree.nearest_neighbor_iter_with_distance_2(&query)
                .find(|(candidate, _)| candidate.data != i)
                .map(|(_, dist_sq)| dist_sq.sqrt())
                .unwrap_or(f64::INFINITY)
        })
        .collect();

    Some(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::planar_distance;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn undefined_below_two_points() {
        assert!(nearest_neighbor_distances(&[]).is_none());
        assert!(nearest_neighbor_distances(&[pt(1.0, 1.0)]).is_none());
    }

    #[test]
    fn pair_reports_mutual_distance() {
        let d = nearest_neighbor_distances(&[pt(0.0, 0.0), pt(3.0, 4.0)]).unwrap();
        assert_eq!(d.len(), 2);
        assert!((d[0] - 5.0).abs() < 1e-12);
        assert!((d[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn picks_closest_peer_not_self() {
        let points = [pt(0.0, 0.0), pt(0.0, 0.01), pt(10.0, 10.0)];
        let d = nearest_neighbor_distances(&points).unwrap();
        assert!((d[0] - 0.01).abs() < 1e-12);
        assert!((d[1] - 0.01).abs() < 1e-12);
        let expected_c = planar_distance(&points[2], &points[1]);
        assert!((d[2] - expected_c).abs() < 1e-12);
    }

    #[test]
    fn duplicates_are_zero_apart() {
        let points = [pt(5.0, 5.0), pt(5.0, 5.0), pt(6.0, 6.0)];
        let d = nearest_neighbor_distances(&points).unwrap();
        assert_eq!(d[0], 0.0);
        assert_eq!(d[1], 0.0);
    }

    #[test]
    fn matches_brute_force_search() {
        let points: Vec<GeoPoint> = (0..40)
            .map(|i| {
                let f = i as f64;
                pt((f * 7.3) % 11.0, (f * 3.1) % 13.0)
            })
            .collect();
        let fast = nearest_neighbor_distances(&points).unwrap();
        for (i, a) in points.iter().enumerate() {
            let brute = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, b)| planar_distance(a, b))
                .fold(f64::INFINITY, f64::min);
            assert!((fast[i] - brute).abs() < 1e-12, "row {}", i);
        }
    }
}
