use std::cmp::Ordering;

use crate::fleet::EnrichedKiosk;
use crate::util;

/// Selectors sort and truncate a kiosk list.
pub trait Selector<Q>: Send + Sync {
    /// Default selection: sort and truncate based on provided configs.
    fn select<'a>(&self, _query: &Q, kiosks: Vec<&'a EnrichedKiosk>) -> Vec<&'a EnrichedKiosk> {
        let mut sorted = self.sort(kiosks);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Extract the score from a kiosk to use for sorting.
    fn score(&self, kiosk: &EnrichedKiosk) -> f64;

    /// Sort kiosks by score in descending order. The sort is stable, so
    /// equal scores keep their input order. NaN scores go last.
    fn sort<'a>(&self, kiosks: Vec<&'a EnrichedKiosk>) -> Vec<&'a EnrichedKiosk> {
        let mut sorted = kiosks;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
            }
        });
        sorted
    }

    /// Optionally provide a maximum number of kiosks to select.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
