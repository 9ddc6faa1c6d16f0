//! Kiosk dataset loading and validation.
//!
//! Parses kiosk CSV files into a `KioskStore`. Expected CSV columns
//! (any order, extra columns ignored):
//!   kiosk_id, latitude, longitude, avg_volume, state, host,
//!   location_type, transactions
//!
//! Validation is all-or-nothing: a single bad row rejects the dataset.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use kiosk_geo::GeoPoint;

use crate::error::{DataValidationError, PipelineError, PipelineResult};
use crate::types::{KioskRecord, RawKioskRecord};

/// Columns the input table must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "kiosk_id",
    "latitude",
    "longitude",
    "avg_volume",
    "state",
    "host",
    "location_type",
    "transactions",
];

/// The loaded, validated fleet in input order.
#[derive(Clone, Debug, Default)]
pub struct KioskStore {
    records: Vec<KioskRecord>,
}

impl KioskStore {
    /// Validate already-parsed rows.
    ///
    /// Negative volumes are clamped to zero. Non-finite coordinates or
    /// volumes, negative transaction counts and duplicate ids are errors.
    pub fn from_raw(raw: Vec<RawKioskRecord>) -> Result<Self, DataValidationError> {
        let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
        let mut records = Vec::with_capacity(raw.len());
        let mut clamped = 0usize;

        for row in raw {
            let location = GeoPoint::new(row.latitude, row.longitude).map_err(|_| {
                DataValidationError::NonFiniteCoordinate {
                    kiosk_id: row.kiosk_id.clone(),
                    latitude: row.latitude,
                    longitude: row.longitude,
                }
            })?;
            if !row.avg_volume.is_finite() {
                return Err(DataValidationError::NonFiniteVolume(row.kiosk_id));
            }
            if row.transactions < 0 {
                return Err(DataValidationError::NegativeCount {
                    kiosk_id: row.kiosk_id,
                    value: row.transactions,
                });
            }
            if !seen.insert(row.kiosk_id.clone()) {
                return Err(DataValidationError::DuplicateKioskId(row.kiosk_id));
            }

            let avg_volume = if row.avg_volume < 0.0 {
                clamped += 1;
                0.0
            } else {
                row.avg_volume
            };

            records.push(KioskRecord {
                kiosk_id: row.kiosk_id,
                location,
                avg_volume,
                state: row.state,
                host: row.host,
                location_type: row.location_type,
                transactions: row.transactions as u64,
            });
        }

        if clamped > 0 {
            log::warn!("clamped negative avg_volume to 0 for {} kiosks", clamped);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[KioskRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<KioskRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load and validate kiosks from a CSV reader.
pub fn load_kiosks<R: Read>(reader: R) -> PipelineResult<KioskStore> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(DataValidationError::MissingColumn(missing.to_string()).into());
    }

    let mut raw = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: RawKioskRecord = result.map_err(|e| DataValidationError::MalformedRow {
            line: line_num + 2,
            reason: e.to_string(),
        })?;
        raw.push(record);
    }

    let store = KioskStore::from_raw(raw)?;
    log::info!("loaded {} kiosks", store.len());
    Ok(store)
}

/// Load and validate kiosks from a CSV file path.
pub fn load_kiosks_file(path: impl AsRef<Path>) -> PipelineResult<KioskStore> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_kiosks(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
kiosk_id,latitude,longitude,avg_volume,state,host,location_type,transactions
NBA-001,44.9778,-93.2650,7200,MN,Holiday,Gas Station,310
NBA-002,44.9800,-93.2700,-150,MN,Cub Foods,Grocery,12
NBA-003,29.7604,-95.3698,4100,TX,Shell,Gas Station,188
";

    fn raw(id: &str, lat: f64, lon: f64, vol: f64, tx: i64) -> RawKioskRecord {
        RawKioskRecord {
            kiosk_id: id.into(),
            latitude: lat,
            longitude: lon,
            avg_volume: vol,
            state: "MN".into(),
            host: "Holiday".into(),
            location_type: "Gas Station".into(),
            transactions: tx,
        }
    }

    #[test]
    fn load_sample_csv() {
        let store = load_kiosks(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);
        let first = &store.records()[0];
        assert_eq!(first.kiosk_id, "NBA-001");
        assert!((first.location.lat() - 44.9778).abs() < 1e-9);
        assert!((first.location.lon() - (-93.2650)).abs() < 1e-9);
        assert_eq!(first.transactions, 310);
        assert_eq!(store.records()[2].state, "TX");
    }

    #[test]
    fn negative_volume_is_clamped() {
        let store = load_kiosks(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(store.records()[1].avg_volume, 0.0);
        assert!(store.records().iter().all(|r| r.avg_volume >= 0.0));
    }

    #[test]
    fn missing_column_fails_fast() {
        let csv_data = "\
kiosk_id,latitude,longitude,state,host,location_type,transactions
NBA-001,44.9,-93.2,MN,Holiday,Gas Station,310
";
        let err = load_kiosks(csv_data.as_bytes()).unwrap_err();
        match err {
            PipelineError::Validation(DataValidationError::MissingColumn(col)) => {
                assert_eq!(col, "avg_volume")
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn extra_columns_and_reordering_are_accepted() {
        let csv_data = "\
state,kiosk_id,notes,longitude,latitude,avg_volume,host,location_type,transactions
MN,NBA-009,new unit,-93.2,44.9,5000,Holiday,Gas Station,42
";
        let store = load_kiosks(csv_data.as_bytes()).unwrap();
        assert_eq!(store.records()[0].kiosk_id, "NBA-009");
        assert!((store.records()[0].location.lon() - (-93.2)).abs() < 1e-9);
    }

    #[test]
    fn incompatible_type_reports_line() {
        let csv_data = "\
kiosk_id,latitude,longitude,avg_volume,state,host,location_type,transactions
NBA-001,44.9,-93.2,7200,MN,Holiday,Gas Station,310
NBA-002,north,-93.2,7200,MN,Holiday,Gas Station,310
";
        let err = load_kiosks(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(DataValidationError::MalformedRow { line: 3, .. })
        ));
    }

    #[test]
    fn non_finite_coordinate_rejects_dataset() {
        let err = KioskStore::from_raw(vec![
            raw("A", 1.0, 1.0, 5000.0, 1),
            raw("B", f64::NAN, 1.0, 5000.0, 1),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DataValidationError::NonFiniteCoordinate { ref kiosk_id, .. } if kiosk_id == "B"
        ));
    }

    #[test]
    fn negative_transactions_reject_dataset() {
        let err = KioskStore::from_raw(vec![raw("A", 1.0, 1.0, 5000.0, -3)]).unwrap_err();
        assert!(matches!(err, DataValidationError::NegativeCount { value: -3, .. }));
    }

    #[test]
    fn duplicate_ids_reject_dataset() {
        let err = KioskStore::from_raw(vec![
            raw("A", 1.0, 1.0, 5000.0, 1),
            raw("A", 2.0, 2.0, 5000.0, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, DataValidationError::DuplicateKioskId(ref id) if id == "A"));
    }

    #[test]
    fn nan_volume_is_not_clamped_silently() {
        let err = KioskStore::from_raw(vec![raw("A", 1.0, 1.0, f64::NAN, 1)]).unwrap_err();
        assert!(matches!(err, DataValidationError::NonFiniteVolume(_)));
    }
}
