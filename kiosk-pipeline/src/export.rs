//! Owned output rows and the redeployment export.
//!
//! Presentation layers (dashboards, spreadsheets) consume these rows; the
//! engine itself renders nothing.

use std::io::Write;

use serde::Serialize;

use crate::classifier::breakeven_shortfall;
use crate::components::redeploy_filter::RedeployFilter;
use crate::config::EngineConfig;
use crate::error::PipelineResult;
use crate::filter::Filter;
use crate::nearest::KioskView;
use crate::types::{FleetQuery, Tier};

/// Export column order. `nearest_km` is dropped when undefined for the
/// selection.
pub static EXPORT_COLUMNS: [&str; 7] = [
    "kiosk_id",
    "state",
    "avg_volume",
    "transactions",
    "host",
    "location_type",
    "nearest_km",
];

/// A selected kiosk with every derived field attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KioskRow {
    pub kiosk_id: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub avg_volume: f64,
    pub transactions: u64,
    pub host: String,
    pub location_type: String,
    pub tier: Tier,
    pub is_clustered: bool,
    pub cluster_label: String,
    pub redeploy_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_km: Option<f64>,
}

impl KioskRow {
    pub fn from_view(view: &KioskView<'_>, config: &EngineConfig) -> Self {
        let kiosk = view.kiosk;
        let record = kiosk.record();
        Self {
            kiosk_id: record.kiosk_id.clone(),
            state: record.state.clone(),
            latitude: record.location.lat(),
            longitude: record.location.lon(),
            avg_volume: record.avg_volume,
            transactions: record.transactions,
            host: record.host.clone(),
            location_type: record.location_type.clone(),
            tier: kiosk.tier(config),
            is_clustered: kiosk.is_clustered(),
            cluster_label: kiosk.cluster_label().to_string(),
            redeploy_flag: kiosk.redeploy_flag(config),
            nearest_km: view.nearest_km,
        }
    }
}

/// One line of the redeployment export, in `EXPORT_COLUMNS` order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRow {
    pub kiosk_id: String,
    pub state: String,
    pub avg_volume: f64,
    pub transactions: u64,
    pub host: String,
    pub location_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_km: Option<f64>,
}

impl ExportRow {
    fn from_view(view: &KioskView<'_>) -> Self {
        let record = view.kiosk.record();
        Self {
            kiosk_id: record.kiosk_id.clone(),
            state: record.state.clone(),
            avg_volume: record.avg_volume,
            transactions: record.transactions,
            host: record.host.clone(),
            location_type: record.location_type.clone(),
            nearest_km: view.nearest_km,
        }
    }

    fn to_fields(&self, include_nearest: bool) -> Vec<String> {
        let mut fields = vec![
            self.kiosk_id.clone(),
            self.state.clone(),
            self.avg_volume.to_string(),
            self.transactions.to_string(),
            self.host.clone(),
            self.location_type.clone(),
        ];
        if include_nearest {
            fields.push(self.nearest_km.map(|d| d.to_string()).unwrap_or_default());
        }
        fields
    }
}

/// Redeployment candidates within the current selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RedeployReport {
    pub redeploy_count: usize,
    /// Shortfall versus breakeven summed over the candidates.
    pub redeploy_loss: f64,
    /// `redeploy_count * holding_cost_per_kiosk`.
    pub estimated_holding_cost: f64,
    /// Whether `nearest_km` is defined for this selection.
    pub has_nearest: bool,
    pub rows: Vec<ExportRow>,
}

impl RedeployReport {
    /// Build the report from nearest-annotated views of the selection.
    /// Candidates are exactly the kiosks whose `redeploy_flag` is set under
    /// `config`.
    pub fn from_views(views: &[KioskView<'_>], query: &FleetQuery, config: &EngineConfig) -> Self {
        let filter = RedeployFilter::new(config);
        let candidates: Vec<&KioskView<'_>> = views
            .iter()
            .filter(|v| filter.keep(query, v.kiosk))
            .collect();
        let redeploy_loss = candidates
            .iter()
            .map(|v| breakeven_shortfall(v.kiosk.avg_volume(), config))
            .sum();

        Self {
            redeploy_count: candidates.len(),
            redeploy_loss,
            estimated_holding_cost: candidates.len() as f64 * config.holding_cost_per_kiosk,
            has_nearest: views.iter().all(|v| v.nearest_km.is_some()) && !views.is_empty(),
            rows: candidates.into_iter().map(ExportRow::from_view).collect(),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        if self.has_nearest {
            &EXPORT_COLUMNS
        } else {
            &EXPORT_COLUMNS[..EXPORT_COLUMNS.len() - 1]
        }
    }
}

/// Write the redeployment rows as CSV with a header line.
pub fn write_export_csv<W: Write>(report: &RedeployReport, writer: W) -> PipelineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(report.columns())?;
    for row in &report.rows {
        csv_writer.write_record(row.to_fields(report.has_nearest))?;
    }
    csv_writer.flush()?;
    Ok(())
}
