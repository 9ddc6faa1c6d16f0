use std::fmt;

use serde::{Deserialize, Serialize};

use kiosk_geo::GeoPoint;

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One row of the input table, exactly as parsed.
///
/// Nothing is validated yet; `KioskStore::from_raw` turns these into
/// `KioskRecord`s or rejects the dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct RawKioskRecord {
    pub kiosk_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub avg_volume: f64,
    pub state: String,
    pub host: String,
    pub location_type: String,
    pub transactions: i64,
}

/// A validated kiosk. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KioskRecord {
    pub kiosk_id: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Monthly throughput in currency units, never negative.
    pub avg_volume: f64,
    pub state: String,
    pub host: String,
    pub location_type: String,
    pub transactions: u64,
}

// ---------------------------------------------------------------------------
// Classification types
// ---------------------------------------------------------------------------

/// Performance tier derived from `avg_volume`.
///
/// Declaration order is the canonical order (High, Mid, Low) and doubles
/// as the tie-break priority when picking the top tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    High,
    Mid,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Mid, Tier::Low];

    pub fn index(self) -> usize {
        match self {
            Tier::High => 0,
            Tier::Mid => 1,
            Tier::Low => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::High => write!(f, "High"),
            Tier::Mid => write!(f, "Mid"),
            Tier::Low => write!(f, "Low"),
        }
    }
}

/// Whether the selection as a whole clears breakeven on average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NetworkStatus {
    Profitable,
    NotProfitable,
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkStatus::Profitable => write!(f, "Profitable \u{2013} look to optimize and grow"),
            NetworkStatus::NotProfitable => {
                write!(f, "Not Profitable \u{2013} analyze and redeploy")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Selection criteria for one report. Every active criterion must hold
/// (logical AND); the default query selects the whole fleet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FleetQuery {
    /// Keep kiosks in this state only.
    pub state: Option<String>,
    /// Keep clustered kiosks only.
    pub clustered_only: bool,
    /// Keep kiosks at or above breakeven.
    pub profitable_only: bool,
    /// Keep kiosks below breakeven.
    pub unprofitable_only: bool,
}

impl FleetQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.state.is_none()
            && !self.clustered_only
            && !self.profitable_only
            && !self.unprofitable_only
    }

    /// Human-readable description of the active filters, e.g.
    /// `"State: MN | Only Clustered"`, or `"All Kiosks"`.
    pub fn context_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref state) = self.state {
            parts.push(format!("State: {}", state));
        }
        if self.clustered_only {
            parts.push("Only Clustered".to_string());
        }
        if self.profitable_only {
            parts.push("Only Profitable".to_string());
        }
        if self.unprofitable_only {
            parts.push("Only Unprofitable".to_string());
        }
        if parts.is_empty() {
            "All Kiosks".to_string()
        } else {
            parts.join(" | ")
        }
    }
}
