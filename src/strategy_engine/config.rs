//! Tunable constants of the strategy engine.
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```json
//! { "nut_advantage_cap": 4.0, "sample_combo_limit": 12 }
//! ```

use serde::{Deserialize, Serialize};

use crate::strategy_engine::error::EngineError;

fn default_nut_advantage_cap() -> f64 {
    5.0
}

fn default_hero_only_nut_advantage() -> f64 {
    2.0
}

fn default_zero_pot_spr() -> f64 {
    999.0
}

fn default_sample_combo_limit() -> usize {
    8
}

fn default_flop_capped_nut_share() -> f64 {
    0.035
}

fn default_river_capped_nut_share() -> f64 {
    0.03
}

fn default_negligible_range_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for the nut-advantage ratio.
    #[serde(default = "default_nut_advantage_cap")]
    pub nut_advantage_cap: f64,

    /// Nut advantage reported when hero has nut combos and villain has none.
    #[serde(default = "default_hero_only_nut_advantage")]
    pub hero_only_nut_advantage: f64,

    /// SPR used when the pot is empty.
    #[serde(default = "default_zero_pot_spr")]
    pub zero_pot_spr: f64,

    /// How many representative combos `math_data` lists per player.
    #[serde(default = "default_sample_combo_limit")]
    pub sample_combo_limit: usize,

    /// Villain nut share under which the flop range is called capped.
    #[serde(default = "default_flop_capped_nut_share")]
    pub flop_capped_nut_share: f64,

    /// Villain nut share under which the river range is called capped.
    #[serde(default = "default_river_capped_nut_share")]
    pub river_capped_nut_share: f64,

    /// Total range weight below which a filtered range is logged as negligible.
    #[serde(default = "default_negligible_range_weight")]
    pub negligible_range_weight: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nut_advantage_cap: default_nut_advantage_cap(),
            hero_only_nut_advantage: default_hero_only_nut_advantage(),
            zero_pot_spr: default_zero_pot_spr(),
            sample_combo_limit: default_sample_combo_limit(),
            flop_capped_nut_share: default_flop_capped_nut_share(),
            river_capped_nut_share: default_river_capped_nut_share(),
            negligible_range_weight: default_negligible_range_weight(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "sample_combo_limit": 3 }"#).unwrap();
        assert_eq!(cfg.sample_combo_limit, 3);
        assert_eq!(cfg.nut_advantage_cap, 5.0);
        assert_eq!(cfg.zero_pot_spr, 999.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = EngineConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
