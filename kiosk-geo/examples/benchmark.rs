//! Performance benchmark for kiosk-geo clustering.
//!
//! Generates synthetic kiosk fleets and measures the exhaustive and indexed
//! detectors, checking that both produce the same flags.
//!
//! Run with:
//!   cargo run --example benchmark --release -p kiosk-geo

use kiosk_geo::cluster::{ClusterDetector, ExhaustiveDetector, IndexedDetector};
use kiosk_geo::distance::GeoPoint;
use kiosk_geo::nearest::nearest_neighbor_distances;
use kiosk_geo::thresholds::DEFAULT_CLUSTER_RADIUS_KM;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const FLEET_SIZES: [usize; 4] = [500, 2_000, 8_000, 20_000];
const SEED: u64 = 42;

fn main() {
    println!("=== Kiosk-Geo Clustering Benchmark ===");
    println!();

    for &n in &FLEET_SIZES {
        let fleet = generate_fleet(n, SEED);
        println!("Fleet of {} kiosks", n);

        let start = Instant::now();
        let exhaustive = ExhaustiveDetector.detect(&fleet, DEFAULT_CLUSTER_RADIUS_KM);
        let exhaustive_elapsed = start.elapsed();

        let start = Instant::now();
        let indexed = IndexedDetector.detect(&fleet, DEFAULT_CLUSTER_RADIUS_KM);
        let indexed_elapsed = start.elapsed();

        let start = Instant::now();
        let nearest = nearest_neighbor_distances(&fleet).unwrap_or_default();
        let nearest_elapsed = start.elapsed();

        let clustered = indexed.iter().filter(|&&c| c).count();
        println!(
            "  exhaustive: {:>9.3}ms   indexed: {:>9.3}ms   nearest: {:>9.3}ms",
            exhaustive_elapsed.as_secs_f64() * 1000.0,
            indexed_elapsed.as_secs_f64() * 1000.0,
            nearest_elapsed.as_secs_f64() * 1000.0,
        );
        println!(
            "  clustered: {} ({:.1}%)   nearest computed: {}   results match: {}",
            clustered,
            clustered as f64 / n as f64 * 100.0,
            nearest.len(),
            if exhaustive == indexed { "yes" } else { "NO" }
        );
        println!();
    }
}

/// Kiosks spread across the continental US with extra density in a few
/// metro areas, which is roughly how a real deployment looks.
fn generate_fleet(n: usize, seed: u64) -> Vec<GeoPoint> {
    let metros = [(40.71, -74.00), (41.88, -87.63), (34.05, -118.24), (29.76, -95.37)];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .filter_map(|i| {
            let (lat, lon) = if i % 2 == 0 {
                let (lat, lon) = metros[rng.gen_range(0..metros.len())];
                (lat + rng.gen_range(-0.5..0.5), lon + rng.gen_range(-0.5..0.5))
            } else {
                (rng.gen_range(25.0..49.0), rng.gen_range(-124.0..-67.0))
            };
            GeoPoint::new(lat, lon).ok()
        })
        .collect()
}
