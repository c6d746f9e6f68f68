//! Preflop: classify the betting so far, then look the hand up in the
//! matching static table.

use log::debug;

use crate::strategy_engine::cards::HandCode;
use crate::strategy_engine::helpers::StreetDecision;
use crate::strategy_engine::models::{ActionMatrix, Decision, Player, Position, Street};
use crate::strategy_engine::ranges::tables::{self, ActionRange};
use crate::strategy_engine::situation::Situation;

/// Which preflop table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopSpot {
    RaiseFirstIn,
    Isolate { limps: usize },
    FacingOpen,
    FacingThreeBet,
    ColdFourBet,
    FacingFourBetPlus,
    Unspecified,
}

struct RaiseHistory {
    spot: PreflopSpot,
    last_raise: f64,
}

fn classify(situation: &Situation) -> RaiseHistory {
    let preflop: Vec<_> = situation.state.street_actions(Street::Preflop).collect();
    let raises: Vec<_> = preflop.iter().filter(|a| a.action.is_aggressive()).collect();
    let limps = preflop.iter().filter(|a| a.action.is_passive_entry()).count();

    let last_raise = match raises.last() {
        Some(r) => r.amount.unwrap_or(3.0),
        None => 1.0,
    };
    let last_is_villain = raises.last().is_some_and(|r| r.player != Player::Hero);
    let first_is_hero = raises.first().is_some_and(|r| r.player == Player::Hero);

    let spot = match raises.len() {
        0 if limps > 0 => PreflopSpot::Isolate { limps },
        0 => PreflopSpot::RaiseFirstIn,
        1 if last_is_villain => PreflopSpot::FacingOpen,
        2 if last_is_villain && first_is_hero => PreflopSpot::FacingThreeBet,
        2 if last_is_villain => PreflopSpot::ColdFourBet,
        n if n >= 3 && last_is_villain => PreflopSpot::FacingFourBetPlus,
        _ => PreflopSpot::Unspecified,
    };
    RaiseHistory { spot, last_raise }
}

fn open_size(position: Position) -> f64 {
    match position {
        Position::SB => 3.0,
        Position::BTN => 2.5,
        _ => 2.3,
    }
}

fn three_bet_size(open: f64, is_ip: bool) -> f64 {
    open * if is_ip { 3.0 } else { 4.0 }
}

fn four_bet_size(last_raise: f64, is_ip: bool) -> f64 {
    last_raise * if is_ip { 2.3 } else { 2.7 }
}

fn ip_label(is_ip: bool) -> &'static str {
    if is_ip { "IP" } else { "OOP" }
}

pub fn recommend(situation: &Situation) -> StreetDecision {
    let state = situation.state;
    let code = HandCode::from_cards(situation.hero_cards[0], situation.hero_cards[1]);
    let history = classify(situation);
    debug!("preflop spot {:?} for {code} ({} vs {})", history.spot, state.hero_position, state.villain_position);

    match history.spot {
        PreflopSpot::RaiseFirstIn | PreflopSpot::Isolate { .. } => raise_first_in(situation, code, history.spot),
        PreflopSpot::ColdFourBet => {
            let table = tables::cold_four_bet(state.hero_position);
            respond(situation, code, table, four_bet_size(history.last_raise, situation.hero_is_ip), "Cold 4-bet", "vs 3-bet cold")
        }
        PreflopSpot::FacingOpen => {
            let table = tables::facing_open(state.hero_position, state.villain_position);
            let size = three_bet_size(history.last_raise, situation.hero_is_ip);
            let label = format!("3-bet vs open ({})", ip_label(situation.hero_is_ip));
            respond(situation, code, table, size, &label, "vs open")
        }
        PreflopSpot::FacingThreeBet => {
            let table = tables::facing_three_bet(state.hero_position, state.villain_position);
            respond(situation, code, table, four_bet_size(history.last_raise, situation.hero_is_ip), "4-bet vs 3-bet", "vs 3-bet")
        }
        PreflopSpot::FacingFourBetPlus => facing_four_bet(situation, code),
        PreflopSpot::Unspecified => StreetDecision::fold("Unspecified preflop sequence, fold."),
    }
}

fn raise_first_in(situation: &Situation, code: HandCode, spot: PreflopSpot) -> StreetDecision {
    let position = situation.state.hero_position;
    let weight = tables::rfi_range(position).and_then(|r| r.get(&code)).copied().unwrap_or(0.0);

    if weight >= 0.5 {
        let matrix = ActionMatrix::new(&[(Decision::Raise, weight), (Decision::Fold, 1.0 - weight)]);
        let (size, reason) = match spot {
            PreflopSpot::Isolate { limps } => {
                let mut size = 3.0 + limps.max(1) as f64;
                if !situation.hero_is_ip {
                    size += 1.0;
                }
                (size, format!("ISO raise ({position}) over {limps} limper(s), size {size:.1}bb."))
            }
            _ => {
                let size = open_size(position);
                (size, format!("RFI ({position}), size {size:.1}bb."))
            }
        };
        return StreetDecision::new(matrix, vec![reason])
            .with_raise_to(size)
            .with_aggressor(Some(Player::Hero));
    }

    if situation.to_call <= 0.0 {
        return StreetDecision::check("Check option.");
    }
    StreetDecision::fold(format!("Fold: {code} is not in range to open from {position}."))
}

fn respond(
    situation: &Situation,
    code: HandCode,
    table: Option<&ActionRange>,
    raise_size: f64,
    raise_label: &str,
    fold_label: &str,
) -> StreetDecision {
    let state = situation.state;
    let Some(matrix) = table.and_then(|t| t.action_map(code)) else {
        return StreetDecision::fold(format!(
            "Fold {fold_label}: {code} is not in range for {} vs {}.",
            state.hero_position, state.villain_position
        ));
    };

    let decision = StreetDecision::new(matrix, Vec::new());
    match decision.action {
        Decision::Raise => decision
            .reason(format!("{raise_label}. Size: {raise_size:.1}bb."))
            .with_raise_to(raise_size)
            .with_aggressor(Some(Player::Hero)),
        _ => decision
            .reason(format!("Flat call {fold_label}."))
            .with_call(situation.to_call)
            .with_aggressor(Some(Player::Villain)),
    }
}

fn facing_four_bet(situation: &Situation, code: HandCode) -> StreetDecision {
    let table = tables::facing_four_bet();
    let jam_territory = situation.to_call > 20.0 || situation.state.hero_stack_bb < 40.0;

    if table.raise.contains(&code) {
        return StreetDecision::new(ActionMatrix::pure(Decision::Raise), vec!["5-bet jam for value (KK+, AK).".to_string()])
            .with_raise_to(situation.state.hero_stack_bb)
            .with_aggressor(Some(Player::Hero));
    }
    if table.call.contains(&code) && !jam_territory {
        return StreetDecision::new(ActionMatrix::pure(Decision::Call), vec!["Call the 4-bet.".to_string()])
            .with_call(situation.to_call)
            .with_aggressor(Some(Player::Villain));
    }
    StreetDecision::fold(format!("Fold vs 4-bet+: {code} is not in range."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::config::EngineConfig;
    use crate::strategy_engine::models::{ActionRecord, ActionVerb, HandState};

    fn decide(state: &HandState) -> StreetDecision {
        let cfg = EngineConfig::default();
        let sit = Situation::analyze(state, Street::Preflop, &cfg).unwrap();
        recommend(&sit)
    }

    fn open(player: Player, amount: f64) -> ActionRecord {
        ActionRecord::new(Street::Preflop, player, ActionVerb::Open).sized(amount)
    }

    fn raise(player: Player, amount: f64) -> ActionRecord {
        ActionRecord::new(Street::Preflop, player, ActionVerb::Raise).sized(amount)
    }

    #[test]
    fn button_opens_premium() {
        let mut state = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &[]);
        state.amount_to_call = 1.0;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Raise);
        assert_eq!(d.amount, 2.5);
        assert_eq!(d.preflop_aggressor, Some(Player::Hero));
    }

    #[test]
    fn junk_folds_or_checks() {
        let mut state = HandState::new(Position::UTG, Position::BB, &["7h", "2c"], &[]);
        state.amount_to_call = 1.0;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Fold);
        assert!(d.reasons[0].contains("not in range"));

        let option = HandState::new(Position::BB, Position::SB, &["7h", "2c"], &[]);
        assert_eq!(decide(&option).action, Decision::Check);
    }

    #[test]
    fn button_folds_nines_to_utg_open() {
        let mut state = HandState::new(Position::BTN, Position::UTG, &["9c", "9d"], &[]);
        state.actions = vec![open(Player::Villain, 2.3)];
        state.amount_to_call = 2.3;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Fold);
        assert!(d.reasons.iter().any(|r| r.contains("not in range")));
    }

    #[test]
    fn three_bet_sizing_by_position() {
        let mut ip = HandState::new(Position::BTN, Position::CO, &["Ac", "Ad"], &[]);
        ip.actions = vec![open(Player::Villain, 2.5)];
        ip.amount_to_call = 2.5;
        let d = decide(&ip);
        assert_eq!(d.action, Decision::Raise);
        assert_eq!(d.amount, 7.5);

        let mut oop = HandState::new(Position::BB, Position::CO, &["Ac", "Ad"], &[]);
        oop.actions = vec![open(Player::Villain, 2.5)];
        oop.amount_to_call = 1.5;
        assert_eq!(decide(&oop).amount, 10.0);
    }

    #[test]
    fn flat_calls_mark_villain_as_aggressor() {
        let mut state = HandState::new(Position::BB, Position::BTN, &["9c", "8c"], &[]);
        state.actions = vec![open(Player::Villain, 2.5)];
        state.amount_to_call = 1.5;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Call);
        assert_eq!(d.amount, 1.5);
        assert_eq!(d.preflop_aggressor, Some(Player::Villain));
    }

    #[test]
    fn isolation_raise_over_limper() {
        let mut state = HandState::new(Position::BTN, Position::UTG, &["Ah", "Qh"], &[]);
        state.actions = vec![ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Limp).sized(1.0)];
        state.amount_to_call = 1.0;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Raise);
        assert_eq!(d.amount, 4.0);
    }

    #[test]
    fn four_bet_after_three_bet() {
        let mut state = HandState::new(Position::CO, Position::BTN, &["Kc", "Kd"], &[]);
        state.actions = vec![open(Player::Hero, 2.3), raise(Player::Villain, 7.5)];
        state.amount_to_call = 5.2;
        let d = decide(&state);
        assert_eq!(d.action, Decision::Raise);
        assert_eq!(d.amount, 20.25);
    }

    #[test]
    fn facing_four_bet_jams_or_folds() {
        let history = vec![raise(Player::Villain, 2.5), raise(Player::Hero, 8.0), raise(Player::Villain, 20.0)];
        let mut kings = HandState::new(Position::BB, Position::BTN, &["Kc", "Kd"], &[]);
        kings.actions = history.clone();
        kings.amount_to_call = 12.0;
        let d = decide(&kings);
        assert_eq!(d.action, Decision::Raise);
        assert_eq!(d.amount, 100.0);

        let mut tens = HandState::new(Position::BB, Position::BTN, &["Tc", "Td"], &[]);
        tens.actions = history.clone();
        tens.amount_to_call = 12.0;
        assert_eq!(decide(&tens).action, Decision::Fold);

        let mut jacks = HandState::new(Position::BB, Position::BTN, &["Jc", "Jd"], &[]);
        jacks.actions = history;
        jacks.amount_to_call = 12.0;
        assert_eq!(decide(&jacks).action, Decision::Call);
    }
}
