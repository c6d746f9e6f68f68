use log::{debug, warn};

use crate::strategy_engine::config::EngineConfig;
use crate::strategy_engine::error::EngineError;
use crate::strategy_engine::formatter;
use crate::strategy_engine::helpers::{board_str, hand_str};
use crate::strategy_engine::models::{HandState, Recommendation, Street};
use crate::strategy_engine::situation::Situation;
use crate::strategy_engine::streets;

/// Entry point: one [`Recommendation`] per [`HandState`].
#[derive(Debug, Clone, Default)]
pub struct StrategyEngine {
    config: EngineConfig,
}

impl StrategyEngine {
    pub fn new(config: EngineConfig) -> Self {
        StrategyEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Like [`StrategyEngine::recommend`] but surfaces the failure instead
    /// of folding.
    pub fn try_recommend(&self, state: &HandState) -> Result<Recommendation, EngineError> {
        let street: Street = state.street.parse()?;
        let situation = Situation::analyze(state, street, &self.config)?;
        debug!(
            "{street}: {} vs {}, {} on [{}] is {} ({}), pot {:.1}, to call {:.1}, spr {:.2}",
            state.hero_position,
            state.villain_position,
            hand_str(situation.hero_cards),
            board_str(&situation.board),
            situation.evaluation.category,
            situation.effective,
            situation.pot,
            situation.to_call,
            situation.spr
        );
        let (decision, advantage) = streets::decide(&situation);
        Ok(formatter::build(&situation, advantage.as_ref(), decision))
    }

    /// Never fails: any error becomes a pure fold carrying the error text.
    pub fn recommend(&self, state: &HandState) -> Recommendation {
        match self.try_recommend(state) {
            Ok(rec) => rec,
            Err(err) => {
                warn!("falling back to fold on {:?}: {err}", state.street);
                formatter::fallback(&state.street, &err.to_string())
            }
        }
    }
}

/// Recommend with the default configuration.
pub fn recommend_action(state: &HandState) -> Recommendation {
    StrategyEngine::default().recommend(state)
}
