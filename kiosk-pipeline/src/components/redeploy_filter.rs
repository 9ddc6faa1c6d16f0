use crate::config::EngineConfig;
use crate::filter::Filter;
use crate::fleet::EnrichedKiosk;
use crate::types::FleetQuery;

/// Keeps redeployment candidates: kiosks strictly below the redeploy
/// cutoff. Always enabled; it runs on the already-filtered selection when
/// building the redeployment report.
pub struct RedeployFilter {
    config: EngineConfig,
}

impl RedeployFilter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Filter<FleetQuery> for RedeployFilter {
    fn keep(&self, _query: &FleetQuery, kiosk: &EnrichedKiosk) -> bool {
        kiosk.redeploy_flag(&self.config)
    }
}
