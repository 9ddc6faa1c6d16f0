pub mod cluster_filter;
pub mod profitability_filter;
pub mod redeploy_filter;
pub mod state_filter;
pub mod top_volume_selector;

#[cfg(test)]
pub(crate) mod test_fleet {
    use kiosk_geo::ExhaustiveDetector;

    use crate::config::EngineConfig;
    use crate::fleet::Fleet;
    use crate::kiosk_loader::KioskStore;
    use crate::types::RawKioskRecord;

    fn raw(id: &str, state: &str, lat: f64, lon: f64, vol: f64) -> RawKioskRecord {
        RawKioskRecord {
            kiosk_id: id.into(),
            latitude: lat,
            longitude: lon,
            avg_volume: vol,
            state: state.into(),
            host: "Holiday".into(),
            location_type: "Gas Station".into(),
            transactions: 50,
        }
    }

    /// Two Minneapolis kiosks a few hundred meters apart, one isolated
    /// Duluth kiosk, and two Houston kiosks 30+ km apart.
    pub fn small_fleet() -> Fleet {
        let store = KioskStore::from_raw(vec![
            raw("MN-1", "MN", 44.9778, -93.2650, 7200.0),
            raw("MN-2", "MN", 44.9800, -93.2700, 2500.0),
            raw("MN-3", "MN", 46.7867, -92.1005, 4900.0),
            raw("TX-1", "TX", 29.7604, -95.3698, 5100.0),
            raw("TX-2", "TX", 30.0500, -95.3698, 3200.0),
        ])
        .unwrap();
        Fleet::enrich(store, EngineConfig::default(), &ExhaustiveDetector).unwrap()
    }

    /// Ad-hoc fleet from `(kiosk_id, latitude, longitude, avg_volume)` rows.
    pub fn fleet_from(rows: &[(&str, f64, f64, f64)]) -> Fleet {
        fleet_with_config(rows, EngineConfig::default())
    }

    /// Like `fleet_from`, enriched with custom thresholds.
    pub fn fleet_with_config(rows: &[(&str, f64, f64, f64)], config: EngineConfig) -> Fleet {
        let raw_rows = rows
            .iter()
            .map(|&(id, lat, lon, vol)| raw(id, "MN", lat, lon, vol))
            .collect();
        let store = KioskStore::from_raw(raw_rows).unwrap();
        Fleet::enrich(store, config, &ExhaustiveDetector).unwrap()
    }
}
