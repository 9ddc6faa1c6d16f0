use crate::filter::Filter;
use crate::fleet::EnrichedKiosk;
use crate::types::FleetQuery;

/// Keeps clustered kiosks.
///
/// Reads the flag computed over the full fleet; narrowing the selection
/// never re-evaluates which kiosks are clustered.
pub struct ClusteredFilter;

impl Filter<FleetQuery> for ClusteredFilter {
    fn enable(&self, query: &FleetQuery) -> bool {
        query.clustered_only
    }

    fn keep(&self, _query: &FleetQuery, kiosk: &EnrichedKiosk) -> bool {
        kiosk.is_clustered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::state_filter::StateFilter;
    use crate::components::test_fleet::small_fleet;

    #[test]
    fn keeps_clustered_kiosks() {
        let fleet = small_fleet();
        let query = FleetQuery {
            clustered_only: true,
            ..FleetQuery::default()
        };
        let result = ClusteredFilter.filter(&query, fleet.kiosks().iter().collect());
        let kept: Vec<&str> = result.kept.iter().map(|k| k.kiosk_id()).collect();
        assert_eq!(kept, vec!["MN-1", "MN-2"]);
    }

    #[test]
    fn flags_survive_narrowing_to_a_single_kiosk() {
        // MN-1 alone in a subset still reports clustered, because its
        // neighbor MN-2 exists in the fleet.
        let fleet = small_fleet();
        let query = FleetQuery {
            state: Some("MN".into()),
            clustered_only: true,
            ..FleetQuery::default()
        };
        let by_state = StateFilter.filter(&query, fleet.kiosks().iter().collect()).kept;
        let only_mn1: Vec<_> = by_state.into_iter().filter(|k| k.kiosk_id() == "MN-1").collect();
        let result = ClusteredFilter.filter(&query, only_mn1);
        assert_eq!(result.kept.len(), 1);
        assert!(result.kept[0].is_clustered());
    }
}
