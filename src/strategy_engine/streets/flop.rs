use crate::strategy_engine::advantage::AdvantageContext;
use crate::strategy_engine::board::Archetype;
use crate::strategy_engine::evaluator::HandCategory;
use crate::strategy_engine::helpers::{pct, StreetDecision};
use crate::strategy_engine::math::geometric_sizing;
use crate::strategy_engine::models::{ActionMatrix, Decision};
use crate::strategy_engine::situation::Situation;
use crate::strategy_engine::streets::defense_header;

pub fn recommend(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    if situation.facing_bet() {
        return facing_bet(situation, advantage);
    }
    open_action(situation, advantage)
}

// ---------------------------------------------------------------------------
// First to act or checked to
// ---------------------------------------------------------------------------

fn bet_size(situation: &Situation, range_adv: f64, nut_adv: f64) -> (f64, String) {
    let board = &situation.board_info;
    let spr = situation.spr;

    if nut_adv >= 1.2 && (2.5..=8.0).contains(&spr) {
        let ratio = geometric_sizing(spr, situation.street.streets_remaining());
        return (
            ratio,
            format!("Clear nut advantage ({nut_adv:.2}) at a moderate SPR ({spr:.1}): geometric sizing to get stacks in over three streets."),
        );
    }
    if (range_adv >= 1.15 && !board.is_monotone) || (!board.is_dynamic && board.connectedness_score < 50) {
        let tag = if range_adv >= 1.15 { "a clear range advantage" } else { "a dry, static board" };
        return (0.33, format!("With {tag}, prefer the small 33% sizing (range bet / dry board c-bet)."));
    }
    if board.is_dynamic || board.connectedness_score >= 60 {
        return (0.75, "Wet, dynamic board without a range edge: bet big to protect equity and build value.".to_string());
    }
    if spr < 2.0 {
        return (1.0, "Low SPR: go straight to a committing size.".to_string());
    }
    (0.33, "Standard sizing for this board and advantage.".to_string())
}

fn open_action(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    let summary = advantage.summary();
    let (range_adv, nut_adv) = (summary.range_advantage, summary.nut_advantage);
    let board = &situation.board_info;
    let villain = situation.state.villain_position;

    let mut reasons = Vec::new();
    let villain_nut_share = advantage.report.villain.nut_share();
    if villain_nut_share < situation.config.flop_capped_nut_share && range_adv > 1.1 {
        reasons.push("Villain's range looks capped: it holds very few strong combos.".to_string());
    }

    let (mut ratio, size_reason) = bet_size(situation, range_adv, nut_adv);
    reasons.push(size_reason);

    let matrix = if situation.has_initiative() {
        let effective = situation.effective;
        let (bet, line) = if situation.villain_synergy >= 30 && range_adv < 1.2 {
            (0.35, format!("This board hits the {villain} range hard: check at high frequency to protect equity."))
        } else if board.has(Archetype::AHighDry) && range_adv >= 1.0 {
            (0.9, "A-High Dry board strongly favours the raiser: high-frequency small c-bet.".to_string())
        } else if board.is_monotone {
            (0.4, "Monotone board threatens both ranges: c-bet less often and more polarized.".to_string())
        } else if range_adv >= 1.2 {
            (0.8, "Clear range advantage: continuation bet at high frequency.".to_string())
        } else if nut_adv >= 1.25 && !situation.is_three_bet_pot() {
            (0.6, "Large nut advantage: polarized betting.".to_string())
        } else if effective.is_value_hand() {
            (0.7, "Strong made hand, bet for value.".to_string())
        } else if effective.is_draw() {
            (0.5, "Semi-bluff with the draw.".to_string())
        } else {
            (0.0, "No edge to press, check.".to_string())
        };
        reasons.push(line);
        ActionMatrix::new(&[(Decision::Bet, bet), (Decision::Check, 1.0 - bet)])
    } else if nut_adv >= 1.3 {
        ratio = 0.33;
        reasons.push("Extreme nut advantage out of position: small donk bet.".to_string());
        ActionMatrix::new(&[(Decision::Bet, 0.25), (Decision::Check, 0.75)])
    } else {
        reasons.push("Defending without the initiative, check by default.".to_string());
        ActionMatrix::pure(Decision::Check)
    };

    StreetDecision::new(matrix, reasons).with_bet_size(ratio, situation.pot)
}

// ---------------------------------------------------------------------------
// Facing a bet
// ---------------------------------------------------------------------------

fn facing_bet(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    let (mdf, header) = defense_header(situation);
    let mut reasons = vec![header, format!("Hero range advantage: {:.2}", advantage.summary().range_advantage)];
    let effective = situation.effective;
    let synergy = situation.hero_synergy;

    let matrix = if effective.is_premium_made() || effective == HandCategory::TopPair {
        reasons.push("Strong hand, continue.".to_string());
        ActionMatrix::new(&[(Decision::Call, 0.85), (Decision::Raise, 0.1), (Decision::Fold, 0.05)])
    } else if effective.is_draw() {
        if synergy >= 30 {
            reasons.push("This board suits your defending range: check-raise draws more often as semi-bluffs.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.6), (Decision::Raise, 0.4)])
        } else {
            reasons.push("Drawing hand: mostly call, sometimes raise for balance.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.8), (Decision::Raise, 0.2)])
        }
    } else if matches!(effective, HandCategory::Set | HandCategory::TwoPair) {
        if synergy >= 30 {
            reasons.push("Strong made hand on a board that favours you: raise for value at high frequency.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.3), (Decision::Raise, 0.7)])
        } else {
            reasons.push("Strong hand, continue.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.6), (Decision::Raise, 0.4)])
        }
    } else if mdf > 0.8 {
        reasons.push(format!("Tiny bet (MDF {}): pot odds force a wide defence.", pct(mdf)));
        ActionMatrix::new(&[(Decision::Call, 0.9), (Decision::Fold, 0.1)])
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
        let sit = Situation::analyze(state, Street::Flop, &cfg).unwrap();
        let adv = AdvantageContext::build(&sit);
        recommend(&sit, &adv)
    }

    fn srp(hero: Position, villain: Position, hole: &[&str], board: &[&str], opener: Player) -> HandState {
        let mut state = HandState::new(hero, villain, hole, board);
        state.actions = vec![
            ActionRecord::new(Street::Preflop, opener, ActionVerb::Open).sized(2.5),
            ActionRecord::new(Street::Preflop, opener.opponent(), ActionVerb::Call).sized(2.5),
        ];
        state.pot_bb = 5.5;
        state.hero_stack_bb = 97.5;
        state.villain_stack_bb = 97.5;
        state
    }

    #[test]
    fn raiser_cbets_small_with_top_pair() {
        let mut state = srp(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"], Player::Hero);
        state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check));
        let d = run(&state);
        assert_eq!(d.action, Decision::Bet);
        assert_eq!(d.sizing_ratio, 0.33);
        assert!((d.amount - 1.82).abs() < 0.011);
        assert!((d.matrix.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn caller_checks_out_of_position() {
        let state = srp(Position::BB, Position::BTN, &["7h", "3c"], &["As", "Kd", "5c"], Player::Villain);
        let d = run(&state);
        assert_eq!(d.action, Decision::Check);
        assert!(d.size_details.is_some());
        assert_eq!(d.amount, 0.0);
    }

    #[test]
    fn air_folds_to_a_real_bet() {
        let mut state = srp(Position::BB, Position::BTN, &["7h", "3c"], &["Ks", "9d", "2c"], Player::Villain);
        state.actions.push(ActionRecord::new(Street::Flop, Player::Hero, ActionVerb::Check));
        state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Bet).sized(3.5));
        state.pot_bb = 9.0;
        state.amount_to_call = 3.5;
        let d = run(&state);
        assert_eq!(d.action, Decision::Fold);
        assert!(d.reasons[0].contains("MDF is 61.1%"));
    }

    #[test]
    fn air_defends_against_a_tiny_bet() {
        let mut state = srp(Position::BB, Position::BTN, &["7h", "3c"], &["Ks", "9d", "2c"], Player::Villain);
        state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Bet).sized(0.5));
        state.pot_bb = 6.0;
        state.amount_to_call = 0.5;
        let d = run(&state);
        assert_eq!(d.action, Decision::Call);
        assert_eq!(d.amount, 0.5);
    }

    #[test]
    fn top_pair_calls_a_bet() {
        let mut state = srp(Position::BB, Position::BTN, &["Kh", "Qc"], &["Ks", "9d", "2c"], Player::Villain);
        state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Bet).sized(3.5));
        state.pot_bb = 9.0;
        state.amount_to_call = 3.5;
        let d = run(&state);
        assert_eq!(d.action, Decision::Call);
        assert!((d.matrix.probability(Decision::Raise) - 0.1).abs() < 1e-9);
    }
}
