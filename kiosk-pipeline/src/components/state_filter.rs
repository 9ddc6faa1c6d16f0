use crate::filter::Filter;
use crate::fleet::EnrichedKiosk;
use crate::types::FleetQuery;

/// Keeps kiosks in the query's state. Disabled when no state is selected.
pub struct StateFilter;

impl Filter<FleetQuery> for StateFilter {
    fn enable(&self, query: &FleetQuery) -> bool {
        query.state.is_some()
    }

    fn keep(&self, query: &FleetQuery, kiosk: &EnrichedKiosk) -> bool {
        query
            .state
            .as_deref()
            .map_or(true, |state| kiosk.record().state == state)
    }
}
