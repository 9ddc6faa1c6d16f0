use crate::fleet::EnrichedKiosk;
use crate::util;

/// Result of a filter operation, partitioning kiosks into kept and removed.
pub struct FilterResult<'a> {
    pub kept: Vec<&'a EnrichedKiosk>,
    pub removed: Vec<&'a EnrichedKiosk>,
}

/// Filters run sequentially; each one narrows the selection further, so
/// the final subset is the conjunction of every enabled filter.
pub trait Filter<Q>: Send + Sync {
    /// Decide if this filter should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Predicate for a single kiosk.
    fn keep(&self, query: &Q, kiosk: &EnrichedKiosk) -> bool;

    /// Partition kiosks into kept (which continue to the next filter) and
    /// removed. Input order is preserved in both halves.
    fn filter<'a>(&self, query: &Q, kiosks: Vec<&'a EnrichedKiosk>) -> FilterResult<'a> {
        let (kept, removed) = kiosks.into_iter().partition(|k| self.keep(query, k));
        FilterResult { kept, removed }
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
