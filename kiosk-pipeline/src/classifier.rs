//! Performance classification from volume alone.
//!
//! Tier and redeployment flag are total, pure functions of `avg_volume`
//! and the configured cutoffs. They are recomputed on every read and never
//! stored next to the volume they derive from.

use crate::config::EngineConfig;
use crate::types::Tier;

/// `>= high_tier_min` is High, `>= mid_tier_min` is Mid, everything else Low.
pub fn classify_tier(avg_volume: f64, config: &EngineConfig) -> Tier {
    if avg_volume >= config.high_tier_min {
        Tier::High
    } else if avg_volume >= config.mid_tier_min {
        Tier::Mid
    } else {
        Tier::Low
    }
}

/// Strictly below `redeploy_below`.
pub fn is_redeploy_candidate(avg_volume: f64, config: &EngineConfig) -> bool {
    avg_volume < config.redeploy_below
}

/// At or above breakeven.
pub fn is_profitable(avg_volume: f64, config: &EngineConfig) -> bool {
    avg_volume >= config.breakeven
}

/// How far the volume falls short of breakeven; zero when profitable.
pub fn breakeven_shortfall(avg_volume: f64, config: &EngineConfig) -> f64 {
    (config.breakeven - avg_volume).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn tier_boundaries() {
        let c = cfg();
        assert_eq!(classify_tier(6500.0, &c), Tier::High);
        assert_eq!(classify_tier(6499.99, &c), Tier::Mid);
        assert_eq!(classify_tier(4000.0, &c), Tier::Mid);
        assert_eq!(classify_tier(3999.99, &c), Tier::Low);
        assert_eq!(classify_tier(0.0, &c), Tier::Low);
        assert_eq!(classify_tier(1_000_000.0, &c), Tier::High);
    }

    #[test]
    fn redeploy_boundary() {
        let c = cfg();
        assert!(!is_redeploy_candidate(3000.0, &c));
        assert!(is_redeploy_candidate(2999.99, &c));
        assert!(is_redeploy_candidate(0.0, &c));
    }

    #[test]
    fn profitability_and_shortfall() {
        let c = cfg();
        assert!(is_profitable(4900.0, &c));
        assert!(!is_profitable(4899.0, &c));
        assert_eq!(breakeven_shortfall(2000.0, &c), 2900.0);
        assert_eq!(breakeven_shortfall(4900.0, &c), 0.0);
        assert_eq!(breakeven_shortfall(7000.0, &c), 0.0);
    }

    #[test]
    fn custom_cutoffs_are_respected() {
        let c = EngineConfig {
            high_tier_min: 10_000.0,
            mid_tier_min: 5_000.0,
            redeploy_below: 1_000.0,
            ..EngineConfig::default()
        };
        assert_eq!(classify_tier(7000.0, &c), Tier::Mid);
        assert_eq!(classify_tier(4999.0, &c), Tier::Low);
        assert!(!is_redeploy_candidate(2000.0, &c));
    }

    #[test]
    fn classification_is_idempotent() {
        let c = cfg();
        for v in [0.0, 2999.99, 3000.0, 3999.99, 4000.0, 6500.0, 9000.0] {
            assert_eq!(classify_tier(v, &c), classify_tier(v, &c));
            assert_eq!(is_redeploy_candidate(v, &c), is_redeploy_candidate(v, &c));
        }
    }
}
