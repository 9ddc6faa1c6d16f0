use crate::config::EngineConfig;
use crate::filter::Filter;
use crate::fleet::EnrichedKiosk;
use crate::types::FleetQuery;

/// Keeps kiosks at or above breakeven.
pub struct ProfitableFilter {
    config: EngineConfig,
}

/// Keeps kiosks below breakeven.
pub struct UnprofitableFilter {
    config: EngineConfig,
}

impl ProfitableFilter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl UnprofitableFilter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Filter<FleetQuery> for ProfitableFilter {
    fn enable(&self, query: &FleetQuery) -> bool {
        query.profitable_only
    }

    fn keep(&self, _query: &FleetQuery, kiosk: &EnrichedKiosk) -> bool {
        kiosk.is_profitable(&self.config)
    }
}

impl Filter<FleetQuery> for UnprofitableFilter {
    fn enable(&self, query: &FleetQuery) -> bool {
        query.unprofitable_only
    }

    fn keep(&self, _query: &FleetQuery, kiosk: &EnrichedKiosk) -> bool {
        !kiosk.is_profitable(&self.config)
    }
}
