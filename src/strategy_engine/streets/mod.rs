//! One decision module per street.
//!
//! Preflop works off the static tables alone. The postflop streets also
//! take the [`AdvantageContext`] built from both players' replayed ranges.

pub mod flop;
pub mod preflop;
pub mod river;
pub mod turn;

use log::debug;

use crate::strategy_engine::advantage::AdvantageContext;
use crate::strategy_engine::helpers::StreetDecision;
use crate::strategy_engine::math::calculate_mdf;
use crate::strategy_engine::models::Street;
use crate::strategy_engine::situation::Situation;

type PostflopModule = fn(&Situation, &AdvantageContext) -> StreetDecision;

/// Route to the street module. The advantage context is returned for the
/// formatter; preflop has none.
pub fn decide(situation: &Situation) -> (StreetDecision, Option<AdvantageContext>) {
    let module: PostflopModule = match situation.street {
        Street::Preflop => return (preflop::recommend(situation), None),
        Street::Flop => flop::recommend,
        Street::Turn => turn::recommend,
        Street::River => river::recommend,
    };
    let advantage = AdvantageContext::build(situation);
    let decision = module(situation, &advantage);
    debug!(
        "{} decision {} ({} reasons)",
        situation.street,
        decision.action,
        decision.reasons.len()
    );
    (decision, Some(advantage))
}

/// MDF against the pending bet, plus the opening rationale line.
fn defense_header(situation: &Situation) -> (f64, String) {
    let mdf = calculate_mdf(situation.base_pot(), situation.to_call);
    let line = format!("Facing a {} bet, MDF is {:.1}%.", situation.street, mdf * 100.0);
    (mdf, line)
}
