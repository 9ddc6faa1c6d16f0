//! Full-fleet enrichment.
//!
//! Clustering depends on which other kiosks exist, so it is computed once
//! over the complete, unfiltered store and frozen into `EnrichedKiosk`.
//! Everything downstream (filters, nearest neighbor, aggregation) only
//! reads these values.

use std::time::Instant;

use kiosk_geo::{ClusterDetector, GeoPoint};

use crate::classifier;
use crate::config::EngineConfig;
use crate::error::PipelineResult;
use crate::kiosk_loader::KioskStore;
use crate::types::{KioskRecord, Tier};

/// A kiosk with its network-level cluster flag attached.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedKiosk {
    record: KioskRecord,
    is_clustered: bool,
}

impl EnrichedKiosk {
    pub fn record(&self) -> &KioskRecord {
        &self.record
    }

    pub fn kiosk_id(&self) -> &str {
        &self.record.kiosk_id
    }

    pub fn location(&self) -> GeoPoint {
        self.record.location
    }

    pub fn avg_volume(&self) -> f64 {
        self.record.avg_volume
    }

    pub fn is_clustered(&self) -> bool {
        self.is_clustered
    }

    /// `"C"` for clustered kiosks, empty otherwise. Used as a map marker.
    pub fn cluster_label(&self) -> &'static str {
        if self.is_clustered {
            "C"
        } else {
            ""
        }
    }

    pub fn tier(&self, config: &EngineConfig) -> Tier {
        classifier::classify_tier(self.record.avg_volume, config)
    }

    pub fn redeploy_flag(&self, config: &EngineConfig) -> bool {
        classifier::is_redeploy_candidate(self.record.avg_volume, config)
    }

    pub fn is_profitable(&self, config: &EngineConfig) -> bool {
        classifier::is_profitable(self.record.avg_volume, config)
    }
}

/// The enriched fleet. Built once per dataset and read-only afterwards,
/// so it can be shared between concurrent queries without locking.
#[derive(Clone, Debug)]
pub struct Fleet {
    kiosks: Vec<EnrichedKiosk>,
    config: EngineConfig,
}

impl Fleet {
    /// Enrich every kiosk in the store using the full fleet's geometry.
    pub fn enrich(
        store: KioskStore,
        config: EngineConfig,
        detector: &dyn ClusterDetector,
    ) -> PipelineResult<Self> {
        config.validate()?;

        let start = Instant::now();
        let records = store.into_records();
        let points: Vec<GeoPoint> = records.iter().map(|r| r.location).collect();
        let flags = detector.detect(&points, config.cluster_radius_km);

        let kiosks: Vec<EnrichedKiosk> = records
            .into_iter()
            .zip(flags)
            .map(|(record, is_clustered)| EnrichedKiosk {
                record,
                is_clustered,
            })
            .collect();

        log::info!(
            "enriched {} kiosks with {} detector in {}ms: {} clustered within {} km",
            kiosks.len(),
            detector.name(),
            start.elapsed().as_millis(),
            kiosks.iter().filter(|k| k.is_clustered).count(),
            config.cluster_radius_km
        );

        Ok(Self { kiosks, config })
    }

    pub fn kiosks(&self) -> &[EnrichedKiosk] {
        &self.kiosks
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.kiosks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kiosks.is_empty()
    }

    pub fn get(&self, kiosk_id: &str) -> Option<&EnrichedKiosk> {
        self.kiosks.iter().find(|k| k.kiosk_id() == kiosk_id)
    }

    /// Distinct states, sorted.
    pub fn states(&self) -> Vec<String> {
        let mut states: Vec<String> = self
            .kiosks
            .iter()
            .map(|k| k.record.state.clone())
            .collect();
        states.sort();
        states.dedup();
        states
    }
}
