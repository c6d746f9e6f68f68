use crate::strategy_engine::advantage::AdvantageContext;
use crate::strategy_engine::evaluator::HandCategory;
use crate::strategy_engine::helpers::StreetDecision;
use crate::strategy_engine::math::geometric_sizing;
use crate::strategy_engine::models::{ActionMatrix, Decision};
use crate::strategy_engine::situation::Situation;
use crate::strategy_engine::streets::defense_header;

pub fn recommend(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    if situation.facing_bet() {
        return facing_bet(situation);
    }
    open_action(situation, advantage)
}

fn flush_class(category: HandCategory) -> bool {
    matches!(
        category,
        HandCategory::Flush | HandCategory::FullHouse | HandCategory::Quads | HandCategory::StraightFlush
    )
}

fn barrel_size(situation: &Situation, nut_adv: f64) -> (f64, String) {
    let board = &situation.board_info;
    let spr = situation.spr;

    if board.is_monotone {
        return (0.33, "Monotone board: small 33% bet to exploit and keep the pot controlled.".to_string());
    }
    if nut_adv >= 1.2 && (1.5..=6.0).contains(&spr) {
        let ratio = geometric_sizing(spr, situation.street.streets_remaining());
        return (
            ratio,
            format!("Nut advantage ({nut_adv:.2}) at a moderate SPR ({spr:.1}): geometric sizing over the last two streets."),
        );
    }
    if nut_adv >= 1.5 && !situation.turn_scare {
        return (1.25, "Extreme nut advantage on a blank turn: overbet for maximum polar pressure.".to_string());
    }
    if nut_adv >= 1.2 || situation.turn_scare || board.connectedness_score >= 60 {
        return (0.75, "Dynamic board or an edge worth protecting: standard 75% bet.".to_string());
    }
    if situation.is_three_bet_pot() && spr > 4.0 {
        return (0.33, "Deep 3-bet pot: small bet to control the pot and keep frequency.".to_string());
    }
    (0.75, "Standard turn value / bluff sizing.".to_string())
}

fn open_action(situation: &Situation, advantage: &AdvantageContext) -> StreetDecision {
    let summary = advantage.summary();
    let (range_adv, nut_adv) = (summary.range_advantage, summary.nut_advantage);
    let board = &situation.board_info;
    let blockers = situation.blockers;
    let effective = situation.effective;
    let is_wet = board.connectedness_score >= 60;

    let mut reasons = Vec::new();
    let mut ratio = 0.75;

    if situation.has_initiative() {
        let barrel = if nut_adv >= 1.1 || effective.is_nut_class() {
            if board.is_monotone && !flush_class(effective) {
                reasons.push("Monotone board is a big threat to non-flush strong hands: check often for pot control.".to_string());
                Some(0.3)
            } else {
                reasons.push("Advantage holds: keep betting (double barrel).".to_string());
                Some(0.75)
            }
        } else if (situation.turn_scare || blockers.nut_flush || blockers.straight) && range_adv >= 0.9 {
            if is_wet && !(blockers.nut_flush || blockers.straight) {
                reasons.push("Very wet board and no key blocker: barrel bluffs less.".to_string());
                Some(0.2)
            } else {
                let line = if blockers.nut_flush {
                    "Holding the nut flush blocker: balanced bluff."
                } else if blockers.straight {
                    "Holding a key straight blocker cuts villain's strong combos: good second barrel."
                } else {
                    "Scare card favours the aggressor's range: keep bluffing."
                };
                reasons.push(line.to_string());
                Some(0.55)
            }
        } else if effective.is_draw() && range_adv > 1.05 {
            reasons.push("Strong draw: second barrel as a semi-bluff.".to_string());
            Some(0.4)
        } else {
            reasons.push("Nothing worth barrelling, check back.".to_string());
            None
        };

        let matrix = match barrel {
            Some(bet) => {
                let (size, size_reason) = barrel_size(situation, nut_adv);
                ratio = size;
                reasons.push(size_reason);
                ActionMatrix::new(&[(Decision::Bet, bet), (Decision::Check, 1.0 - bet)])
            }
            None => ActionMatrix::pure(Decision::Check),
        };
        return StreetDecision::new(matrix, reasons).with_bet_size(ratio, situation.pot);
    }

    let matrix = if nut_adv >= 1.3 {
        ratio = 0.33;
        reasons.push("Nut advantage swung your way: consider a lead (donk bet).".to_string());
        ActionMatrix::new(&[(Decision::Bet, 0.25), (Decision::Check, 0.75)])
    } else if blockers.trips && range_adv > 1.1 {
        ratio = 0.25;
        reasons.push("Holding a board-pair blocker: light probing lead.".to_string());
        ActionMatrix::new(&[(Decision::Bet, 0.2), (Decision::Check, 0.8)])
    } else {
        reasons.push("Out of position: standard check.".to_string());
        ActionMatrix::pure(Decision::Check)
    };
    StreetDecision::new(matrix, reasons).with_bet_size(ratio, situation.pot)
}

fn facing_bet(situation: &Situation) -> StreetDecision {
    let (_, header) = defense_header(situation);
    let mut reasons = vec![header];
    let effective = situation.effective;

    let matrix = if effective.is_value_hand() {
        reasons.push("Strong hand: call or raise.".to_string());
        ActionMatrix::new(&[(Decision::Call, 0.8), (Decision::Raise, 0.1), (Decision::Fold, 0.1)])
    } else if effective.is_draw() {
        if situation.hero_synergy >= 30 {
            reasons.push("Strong draw: check-raise as a semi-bluff to balance the nutted hands.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.6), (Decision::Raise, 0.4)])
        } else {
            reasons.push("Draw: call on pot odds.".to_string());
            ActionMatrix::new(&[(Decision::Call, 0.8), (Decision::Fold, 0.2)])
        }
    } else {
        reasons.push("Not strong enough, fold.".to_string());
        ActionMatrix::pure(Decision::Fold)
    };

    StreetDecision::new(matrix, reasons)
        .with_bet_size(0.0, 0.0)
        .with_call(situation.to_call)
        .with_raise_over(situation.to_call, 3.0)
}
