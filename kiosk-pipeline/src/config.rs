//! Engine configuration.
//!
//! Every threshold the engine applies is carried in `EngineConfig` and
//! passed in explicitly. The defaults below are calibrated for a
//! Bitcoin ATM network with monthly volume in US dollars.

use std::path::Path;

use serde::{Deserialize, Serialize};

use kiosk_geo::thresholds::DEFAULT_CLUSTER_RADIUS_KM;

use crate::error::{PipelineError, PipelineResult};

/// Monthly volume at which a kiosk covers its own costs.
pub const BREAKEVEN_VOLUME: f64 = 4900.0;

/// Minimum volume for the High tier.
pub const HIGH_TIER_MIN: f64 = 6500.0;

/// Minimum volume for the Mid tier. Anything below is Low.
pub const MID_TIER_MIN: f64 = 4000.0;

/// Kiosks strictly below this volume are redeployment candidates.
pub const REDEPLOY_BELOW: f64 = 3000.0;

/// Estimated monthly cost of keeping one flagged kiosk in place.
pub const HOLDING_COST_PER_KIOSK: f64 = 100.0;

/// Number of kiosks in the top-performers list.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub breakeven: f64,
    pub cluster_radius_km: f64,
    pub high_tier_min: f64,
    pub mid_tier_min: f64,
    pub redeploy_below: f64,
    pub holding_cost_per_kiosk: f64,
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakeven: BREAKEVEN_VOLUME,
            cluster_radius_km: DEFAULT_CLUSTER_RADIUS_KM,
            high_tier_min: HIGH_TIER_MIN,
            mid_tier_min: MID_TIER_MIN,
            redeploy_below: REDEPLOY_BELOW,
            holding_cost_per_kiosk: HOLDING_COST_PER_KIOSK,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing keys fall back to the defaults.
    pub fn from_json_str(json: &str) -> PipelineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        let values = [
            ("breakeven", self.breakeven),
            ("cluster_radius_km", self.cluster_radius_km),
            ("high_tier_min", self.high_tier_min),
            ("mid_tier_min", self.mid_tier_min),
            ("redeploy_below", self.redeploy_below),
            ("holding_cost_per_kiosk", self.holding_cost_per_kiosk),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PipelineError::Config(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.cluster_radius_km <= 0.0 {
            return Err(PipelineError::Config(format!(
                "cluster_radius_km must be positive, got {}",
                self.cluster_radius_km
            )));
        }
        if self.mid_tier_min > self.high_tier_min {
            return Err(PipelineError::Config(format!(
                "mid_tier_min ({}) exceeds high_tier_min ({})",
                self.mid_tier_min, self.high_tier_min
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_network_calibration() {
        let c = EngineConfig::default();
        assert_eq!(c.breakeven, 4900.0);
        assert_eq!(c.cluster_radius_km, 5.0);
        assert_eq!(c.high_tier_min, 6500.0);
        assert_eq!(c.mid_tier_min, 4000.0);
        assert_eq!(c.redeploy_below, 3000.0);
        assert_eq!(c.top_n, 5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = EngineConfig::from_json_str(r#"{ "breakeven": 5200, "top_n": 3 }"#).unwrap();
        assert_eq!(c.breakeven, 5200.0);
        assert_eq!(c.top_n, 3);
        assert_eq!(c.cluster_radius_km, 5.0);
    }

    #[test]
    fn rejects_inverted_tier_cutoffs() {
        let c = EngineConfig {
            mid_tier_min: 7000.0,
            ..EngineConfig::default()
        };
        assert!(matches!(c.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let c = EngineConfig {
            cluster_radius_km: 0.0,
            ..EngineConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ breakeven: }").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse(_)));
    }
}
