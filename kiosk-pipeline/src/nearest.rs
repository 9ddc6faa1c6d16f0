use kiosk_geo::{nearest_neighbor_distances, GeoPoint};

use crate::fleet::EnrichedKiosk;

/// A kiosk in the active selection together with the distance to its
/// closest peer in that same selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KioskView<'a> {
    pub kiosk: &'a EnrichedKiosk,
    /// Planar distance over raw degrees. `None` when the selection has
    /// fewer than two kiosks.
    pub nearest_km: Option<f64>,
}

/// Compute nearest-peer distances over `subset` only.
///
/// Must be recomputed whenever the selection changes: unlike the cluster
/// flag, this value depends on which kiosks are currently selected.
pub fn attach_nearest<'a>(subset: &[&'a EnrichedKiosk]) -> Vec<KioskView<'a>> {
    let points: Vec<GeoPoint> = subset.iter().map(|k| k.location()).collect();
    match nearest_neighbor_distances(&points) {
        Some(distances) => subset
            .iter()
            .zip(distances)
            .map(|(&kiosk, d)| KioskView {
                kiosk,
                nearest_km: Some(d),
            })
            .collect(),
        None => subset
            .iter()
            .map(|&kiosk| KioskView {
                kiosk,
                nearest_km: None,
            })
            .collect(),
    }
}
