use serde::Serialize;

use crate::aggregation::{self, KpiSummary, TierSummary};
use crate::components::cluster_filter::ClusteredFilter;
use crate::components::profitability_filter::{ProfitableFilter, UnprofitableFilter};
use crate::components::state_filter::StateFilter;
use crate::components::top_volume_selector::TopVolumeSelector;
use crate::config::EngineConfig;
use crate::error::PipelineResult;
use crate::export::{KioskRow, RedeployReport};
use crate::filter::Filter;
use crate::fleet::{EnrichedKiosk, Fleet};
use crate::nearest::{attach_nearest, KioskView};
use crate::selector::Selector;
use crate::types::{FleetQuery, Tier};

/// Everything one query produces, owned and ready to serialize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FleetReport {
    pub context: String,
    pub fleet_size: usize,
    pub filtered_out: usize,
    pub kpis: KpiSummary,
    pub tiers: TierSummary,
    pub top_tier: Tier,
    pub top_tier_share_pct: f64,
    pub top_kiosks: Vec<KioskRow>,
    pub redeploy: RedeployReport,
    pub kiosks: Vec<KioskRow>,
}

/// The per-query fleet report pipeline.
///
/// Pipeline flow:
/// 1. StateFilter, ClusteredFilter, ProfitableFilter, UnprofitableFilter
///    narrow the fleet (each only when its query flag is set)
/// 2. Nearest-neighbor distances are computed over the surviving selection
/// 3. KPI and per-tier aggregation over the selection
/// 4. TopVolumeSelector picks the top N performers
/// 5. RedeployReport collects the flagged kiosks of the selection
///
/// The fleet is only read. Running the same query twice gives the same
/// report, and independent queries can run in parallel on a shared fleet.
pub struct FleetReportPipeline {
    filters: Vec<Box<dyn Filter<FleetQuery>>>,
    selector: TopVolumeSelector,
    config: EngineConfig,
}

impl FleetReportPipeline {
    /// Pipeline with explicit thresholds. Rejects an invalid config the
    /// same way `Fleet::enrich` does.
    pub fn new(config: EngineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Pipeline for a fleet, using the thresholds it was enriched with.
    pub fn for_fleet(fleet: &Fleet) -> Self {
        // Already validated by `Fleet::enrich`.
        Self::build(fleet.config().clone())
    }

    fn build(config: EngineConfig) -> Self {
        let filters: Vec<Box<dyn Filter<FleetQuery>>> = vec![
            Box::new(StateFilter),
            Box::new(ClusteredFilter),
            Box::new(ProfitableFilter::new(&config)),
            Box::new(UnprofitableFilter::new(&config)),
        ];

        Self {
            filters,
            selector: TopVolumeSelector { n: config.top_n },
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply every enabled filter in order and return the selection.
    pub fn select<'a>(&self, fleet: &'a Fleet, query: &FleetQuery) -> Vec<&'a EnrichedKiosk> {
        let mut kept: Vec<&EnrichedKiosk> = fleet.kiosks().iter().collect();
        for filter in self.filters.iter().filter(|f| f.enable(query)) {
            let result = filter.filter(query, kept);
            log::debug!(
                "{} kept {} removed {}",
                filter.name(),
                result.kept.len(),
                result.removed.len()
            );
            kept = result.kept;
        }
        kept
    }

    pub fn execute(&self, fleet: &Fleet, query: &FleetQuery) -> FleetReport {
        let selection = self.select(fleet, query);
        let views = attach_nearest(&selection);

        let kpis = aggregation::summarize(&selection, &self.config);
        let tiers = aggregation::summarize_tiers(&selection, &self.config);

        let top = self.selector.select(query, selection.clone());
        log::debug!("{} selected {}", self.selector.name(), top.len());
        let top_views = attach_nearest_from(&views, &top);

        let redeploy = RedeployReport::from_views(&views, query, &self.config);

        log::info!(
            "report [{}]: {} of {} kiosks selected, {} redeploy candidates",
            query.context_label(),
            selection.len(),
            fleet.len(),
            redeploy.redeploy_count
        );

        FleetReport {
            context: query.context_label(),
            fleet_size: fleet.len(),
            filtered_out: fleet.len() - selection.len(),
            top_tier: tiers.top_tier(),
            top_tier_share_pct: tiers.top_share_pct(),
            kpis,
            tiers,
            top_kiosks: top_views
                .iter()
                .map(|v| KioskRow::from_view(v, &self.config))
                .collect(),
            redeploy,
            kiosks: views
                .iter()
                .map(|v| KioskRow::from_view(v, &self.config))
                .collect(),
        }
    }
}

/// Reuse the selection-wide nearest distances for a re-ordered subset of
/// the same selection.
fn attach_nearest_from<'a>(
    views: &[KioskView<'a>],
    subset: &[&'a EnrichedKiosk],
) -> Vec<KioskView<'a>> {
    subset
        .iter()
        .filter_map(|k| {
            views
                .iter()
                .find(|v| std::ptr::eq(v.kiosk, *k))
                .copied()
        })
        .collect()
}
