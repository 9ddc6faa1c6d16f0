//! KPI aggregation over an arbitrary selection of kiosks.
//!
//! Everything here is a pure read over the slice it is given: no caching,
//! no mutation, same input gives the same output. Empty selections produce
//! zero-filled results rather than errors.

use serde::Serialize;

use crate::classifier::breakeven_shortfall;
use crate::config::EngineConfig;
use crate::fleet::EnrichedKiosk;
use crate::types::{NetworkStatus, Tier};

/// Mean position of the selection, used to center a map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// Highest-volume kiosk in the selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopKiosk {
    pub kiosk_id: String,
    pub avg_volume: f64,
}

/// Network-wide KPIs for one selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_count: usize,
    pub clustered_count: usize,
    pub redeploy_count: usize,
    /// Arithmetic mean of `avg_volume`; 0 for an empty selection.
    pub avg_volume_mean: f64,
    /// `avg_volume_mean - breakeven`.
    pub profit_per_kiosk: f64,
    /// Sum of shortfalls below breakeven. Never negative.
    pub loss_total: f64,
    /// Share of Low-tier kiosks, in percent.
    pub low_performer_pct: f64,
    pub network_status: NetworkStatus,
    pub map_center: Option<MapCenter>,
    pub top_kiosk: Option<TopKiosk>,
}

/// One row of the per-tier table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TierRow {
    pub tier: Tier,
    pub total_volume: f64,
    pub kiosk_count: usize,
    pub avg_volume: f64,
    /// This tier's share of the selection's total volume, in percent.
    pub volume_share_pct: f64,
}

/// Per-tier table. Always has exactly three rows in High, Mid, Low order,
/// zero-filled for empty tiers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TierSummary {
    rows: [TierRow; 3],
}

impl TierSummary {
    pub fn rows(&self) -> &[TierRow; 3] {
        &self.rows
    }

    pub fn get(&self, tier: Tier) -> &TierRow {
        &self.rows[tier.index()]
    }

    pub fn total_volume(&self) -> f64 {
        self.rows.iter().map(|r| r.total_volume).sum()
    }

    /// Tier with the largest total volume. Ties go to the tier listed first
    /// (High, then Mid, then Low), so an all-zero table reports High.
    pub fn top_tier(&self) -> Tier {
        let mut best = &self.rows[0];
        for row in &self.rows[1..] {
            if row.total_volume > best.total_volume {
                best = row;
            }
        }
        best.tier
    }

    pub fn top_share_pct(&self) -> f64 {
        self.get(self.top_tier()).volume_share_pct
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Compute the KPI summary for a selection.
pub fn summarize(kiosks: &[&EnrichedKiosk], config: &EngineConfig) -> KpiSummary {
    let total_count = kiosks.len();
    let clustered_count = kiosks.iter().filter(|k| k.is_clustered()).count();
    let redeploy_count = kiosks.iter().filter(|k| k.redeploy_flag(config)).count();
    let low_count = kiosks
        .iter()
        .filter(|k| k.tier(config) == Tier::Low)
        .count();

    let volume_sum: f64 = kiosks.iter().map(|k| k.avg_volume()).sum();
    let avg_volume_mean = if total_count > 0 {
        volume_sum / total_count as f64
    } else {
        0.0
    };
    let loss_total: f64 = kiosks
        .iter()
        .map(|k| breakeven_shortfall(k.avg_volume(), config))
        .sum();

    let network_status = if avg_volume_mean >= config.breakeven {
        NetworkStatus::Profitable
    } else {
        NetworkStatus::NotProfitable
    };

    let map_center = (total_count > 0).then(|| {
        let n = total_count as f64;
        MapCenter {
            latitude: kiosks.iter().map(|k| k.location().lat()).sum::<f64>() / n,
            longitude: kiosks.iter().map(|k| k.location().lon()).sum::<f64>() / n,
        }
    });

    // First occurrence wins on equal volume.
    let top_kiosk = kiosks
        .iter()
        .fold(None::<&EnrichedKiosk>, |best, k| match best {
            Some(b) if b.avg_volume() >= k.avg_volume() => Some(b),
            _ => Some(*k),
        })
        .map(|k| TopKiosk {
            kiosk_id: k.kiosk_id().to_string(),
            avg_volume: k.avg_volume(),
        });

    KpiSummary {
        total_count,
        clustered_count,
        redeploy_count,
        avg_volume_mean,
        profit_per_kiosk: avg_volume_mean - config.breakeven,
        loss_total,
        low_performer_pct: percent(low_count as f64, total_count as f64),
        network_status,
        map_center,
        top_kiosk,
    }
}

/// Group a selection by tier.
pub fn summarize_tiers(kiosks: &[&EnrichedKiosk], config: &EngineConfig) -> TierSummary {
    let mut totals = [0.0f64; 3];
    let mut counts = [0usize; 3];
    for kiosk in kiosks {
        let i = kiosk.tier(config).index();
        totals[i] += kiosk.avg_volume();
        counts[i] += 1;
    }
    let grand_total: f64 = totals.iter().sum();

    let rows = Tier::ALL.map(|tier| {
        let i = tier.index();
        TierRow {
            tier,
            total_volume: totals[i],
            kiosk_count: counts[i],
            avg_volume: if counts[i] > 0 {
                totals[i] / counts[i] as f64
            } else {
                0.0
            },
            volume_share_pct: percent(totals[i], grand_total),
        }
    });

    TierSummary { rows }
}
