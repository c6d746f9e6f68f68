use crate::strategy_engine::advantage::AdvantageContext;
use crate::strategy_engine::evaluator::HandCategory;
use crate::strategy_engine::helpers::{pct, StreetDecision};
use crate::strategy_engine::math::bluff_ratio;
use crate::strategy_engine::models::{ActionMatrix, Decision};
use crate::strategy_engine::situation::Situation;
use crate::strategy_engine::streets::defense_header;

pub fn recommend(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    if situation.facing_bet() {
        return facing_bet(situation, advantage);
    }
    open_action(situation, advantage)
}

/// Sizing ladder, strongest condition first.
fn sizing(effective: HandCategory, nut_adv: f64) -> (f64, &'static str) {
    if nut_adv >= 1.4 {
        (2.0, "a double-pot overbet (200%)")
    } else if nut_adv >= 1.3 {
        (1.5, "an overbet (150%)")
    } else if nut_adv >= 1.2 {
        (1.0, "a pot-sized bet")
    } else if matches!(
        effective,
        HandCategory::TwoPair | HandCategory::Straight | HandCategory::Flush | HandCategory::Set
    ) {
        (0.5, "a half-pot bet")
    } else if matches!(effective, HandCategory::TopPair | HandCategory::MiddlePair) {
        (0.33, "a thin value bet")
    } else {
        (0.75, "a standard bet")
    }
}

fn open_action(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    let summary = advantage.summary();
    let (range_adv, nut_adv) = (summary.range_advantage, summary.nut_advantage);
    let effective = situation.effective;
    let blockers = situation.blockers;
    let is_monotone = situation.board_info.is_monotone;

    let mut reasons = Vec::new();
    if advantage.report.villain.nut_share() < situation.config.river_capped_nut_share && nut_adv > 1.2 {
        reasons.push("Villain's river range is capped with almost no nuts: polarized betting is at its best.".to_string());
    }
    if nut_adv >= 1.2 {
        reasons.push(format!("Clear nut advantage ({nut_adv:.2})."));
    }

    let (mut ratio, size_desc) = sizing(effective, nut_adv);

    let matrix = match effective {
        HandCategory::StraightFlush | HandCategory::Quads => {
            reasons.push(format!("Holding the near nuts ({effective}): use {size_desc}."));
            ActionMatrix::new(&[(Decision::Bet, 0.95), (Decision::Check, 0.05)])
        }
        HandCategory::FullHouse if nut_adv > 1.3 => {
            reasons.push(format!("Holding the near nuts ({effective}): use {size_desc}."));
            ActionMatrix::new(&[(Decision::Bet, 0.95), (Decision::Check, 0.05)])
        }
        HandCategory::FullHouse | HandCategory::Flush => {
            reasons.push(format!("Strong made hand: value bet with {size_desc}."));
            ActionMatrix::new(&[(Decision::Bet, 0.85), (Decision::Check, 0.15)])
        }
        HandCategory::Straight | HandCategory::Set | HandCategory::TwoPair if is_monotone => {
            reasons.push("Monotone board is a big threat to non-flush strong hands: check conservatively.".to_string());
            ActionMatrix::new(&[(Decision::Check, 0.8), (Decision::Bet, 0.2)])
        }
        HandCategory::Straight | HandCategory::Set | HandCategory::TwoPair => {
            reasons.push(format!("Strong made hand: value bet with {size_desc}."));
            ActionMatrix::new(&[(Decision::Bet, 0.7), (Decision::Check, 0.3)])
        }
        HandCategory::TopPair if is_monotone => {
            reasons.push("Monotone board is a big threat to top pair: check for pot control.".to_string());
            ActionMatrix::pure(Decision::Check)
        }
        HandCategory::TopPair => {
            ratio = 0.33;
            reasons.push("Top pair looks for thin value with a small size.".to_string());
            ActionMatrix::new(&[(Decision::Bet, 0.4), (Decision::Check, 0.6)])
        }
        _ if range_adv >= 0.9 && (blockers.nut_flush || blockers.straight) => {
            let bluff = bluff_ratio(ratio);
            let blocker = if blockers.nut_flush { "the nut flush blocker" } else { "a key straight blocker" };
            reasons.push(format!("Holding {blocker}: balanced bluff with {size_desc} ({}).", pct(bluff)));
            ActionMatrix::new(&[(Decision::Bet, bluff), (Decision::Check, 1.0 - bluff)])
        }
        _ => {
            reasons.push("Too weak and no key blockers, check.".to_string());
            ActionMatrix::pure(Decision::Check)
        }
    };

    if ratio > 1.0 && !reasons.iter().any(|r| r.contains(size_desc)) {
        reasons.push(format!("Extreme nut advantage: {size_desc} for maximum polarization."));
    } else if ratio == 1.0 && !reasons.iter().any(|r| r.contains(size_desc)) {
        reasons.push("Nut advantage: pot-sized polarized bet.".to_string());
    }

    StreetDecision::new(matrix, reasons).with_bet_size(ratio, situation.pot)
}

fn facing_bet(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    let (_, header) = defense_header(situation);
    let mut reasons = vec![header];
    let effective = situation.effective;
    let nut_adv = advantage.summary().nut_advantage;

    let matrix = if effective.is_nut_class() || effective == HandCategory::TwoPair {
        reasons.push("Strong hand, continue.".to_string());
        ActionMatrix::new(&[(Decision::Call, 0.9), (Decision::Raise, 0.1)])
    } else if effective == HandCategory::TopPair {
        reasons.push("Top pair is a bluff catcher: call.".to_string());
        ActionMatrix::new(&[(Decision::Call, 0.7), (Decision::Fold, 0.3)])
    } else if situation.blockers.nut_flush && nut_adv > 0.9 {
        reasons.push("Holding the nut flush blocker: mix in calls to catch bluffs.".to_string());
        ActionMatrix::new(&[(Decision::Call, 0.4), (Decision::Fold, 0.6)])
    } else {
        reasons.push("Not strong enough, fold.".to_string());
        ActionMatrix::pure(Decision::Fold)
    };

    StreetDecision::new(matrix, reasons)
        .with_bet_size(0.0, 0.0)
        .with_call(situation.to_call)
        .with_raise_over(situation.to_call, 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::config::EngineConfig;
    use crate::strategy_engine::models::{ActionRecord, ActionVerb, HandState, Player, Position, Street};

    fn run(state: &HandState) -> StreetDecision {
        let cfg = EngineConfig::default();
        let sit = Situation::analyze(state, Street::River, &cfg).unwrap();
        let adv = AdvantageContext::build(&sit);
        recommend(&sit, &adv)
    }

    fn checked_down(hero: Position, villain: Position, hole: &[&str], board: &[&str]) -> HandState {
        let mut state = HandState::new(hero, villain, hole, board);
        state.actions = vec![
            ActionRecord::new(Street::Preflop, Player::Hero, ActionVerb::Open).sized(2.5),
            ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Call).sized(2.5),
            ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check),
            ActionRecord::new(Street::Flop, Player::Hero, ActionVerb::Check),
            ActionRecord::new(Street::Turn, Player::Villain, ActionVerb::Check),
            ActionRecord::new(Street::Turn, Player::Hero, ActionVerb::Check),
        ];
        state.pot_bb = 5.5;
        state.hero_stack_bb = 97.5;
        state.villain_stack_bb = 97.5;
        state
    }

    #[test]
    fn sizing_ladder_order() {
        assert_eq!(sizing(HandCategory::Air, 1.45).0, 2.0);
        assert_eq!(sizing(HandCategory::Air, 1.35).0, 1.5);
        assert_eq!(sizing(HandCategory::Air, 1.2).0, 1.0);
        assert_eq!(sizing(HandCategory::Set, 1.0).0, 0.5);
        assert_eq!(sizing(HandCategory::MiddlePair, 1.0).0, 0.33);
        assert_eq!(sizing(HandCategory::Air, 1.0).0, 0.75);
    }

    #[test]
    fn top_pair_checks_but_plans_small() {
        let mut state = checked_down(Position::BTN, Position::BB, &["Ah", "Qd"], &["Ad", "9c", "6s", "3h", "Jc"]);
        state.actions.push(ActionRecord::new(Street::River, Player::Villain, ActionVerb::Check));
        let d = run(&state);
        assert_eq!(d.action, Decision::Check);
        assert_eq!(d.size_details.map(|s| s.bet_ratio), Some(0.33));
    }

    #[test]
    fn top_pair_catches_bluffs() {
        let mut state = checked_down(Position::BTN, Position::BB, &["Ah", "Qd"], &["Ad", "9c", "6s", "3h", "Jc"]);
        state.actions.push(ActionRecord::new(Street::River, Player::Villain, ActionVerb::Bet).sized(4.0));
        state.pot_bb = 9.5;
        state.amount_to_call = 4.0;
        let d = run(&state);
        assert_eq!(d.action, Decision::Call);
        assert!((d.matrix.probability(Decision::Fold) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn air_gives_up_facing_river_bet() {
        let mut state = checked_down(Position::BTN, Position::BB, &["8h", "7d"], &["Ad", "Kc", "4s", "3h", "Jc"]);
        state.actions.push(ActionRecord::new(Street::River, Player::Villain, ActionVerb::Bet).sized(4.0));
        state.pot_bb = 9.5;
        state.amount_to_call = 4.0;
        assert_eq!(run(&state).action, Decision::Fold);
    }
}
