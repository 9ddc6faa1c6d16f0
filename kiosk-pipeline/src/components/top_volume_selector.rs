use crate::config::DEFAULT_TOP_N;
use crate::fleet::EnrichedKiosk;
use crate::selector::Selector;
use crate::types::FleetQuery;

/// Selects the top N kiosks by average volume.
pub struct TopVolumeSelector {
    pub n: usize,
}

impl Default for TopVolumeSelector {
    fn default() -> Self {
        Self { n: DEFAULT_TOP_N }
    }
}

impl Selector<FleetQuery> for TopVolumeSelector {
    fn score(&self, kiosk: &EnrichedKiosk) -> f64 {
        kiosk.avg_volume()
    }

    fn size(&self) -> Option<usize> {
        Some(self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_fleet::small_fleet;

    #[test]
    fn orders_by_volume_descending() {
        let fleet = small_fleet();
        let top = TopVolumeSelector { n: 3 }.select(&FleetQuery::default(), fleet.kiosks().iter().collect());
        let ids: Vec<&str> = top.iter().map(|k| k.kiosk_id()).collect();
        assert_eq!(ids, vec!["MN-1", "TX-1", "MN-3"]);
    }

    #[test]
    fn fewer_kiosks_than_n_returns_all() {
        let fleet = small_fleet();
        let top = TopVolumeSelector { n: 50 }.select(&FleetQuery::default(), fleet.kiosks().iter().collect());
        assert_eq!(top.len(), fleet.len());
    }

    #[test]
    fn empty_selection_stays_empty() {
        let top = TopVolumeSelector::default().select(&FleetQuery::default(), Vec::new());
        assert!(top.is_empty());
    }
}
