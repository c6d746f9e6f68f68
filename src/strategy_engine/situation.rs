//! Everything derived once per call from the caller's [`HandState`].

use std::collections::HashSet;

use crate::strategy_engine::advantage::synergy;
use crate::strategy_engine::board::{analyze_board, is_turn_scare_card, BoardInfo};
use crate::strategy_engine::cards::parse_cards;
use crate::strategy_engine::config::EngineConfig;
use crate::strategy_engine::error::EngineError;
use crate::strategy_engine::evaluator::{evaluate, Blockers, HandCategory, HandEvaluation};
use crate::strategy_engine::math::{pot_odds, stack_to_pot};
use crate::strategy_engine::models::{ActionVerb, Card, HandState, Player, Street};

#[derive(Debug, Clone)]
pub struct Situation<'a> {
    pub state: &'a HandState,
    pub config: &'a EngineConfig,
    pub street: Street,
    pub hero_cards: [Card; 2],
    pub board: Vec<Card>,
    pub board_info: BoardInfo,
    pub evaluation: HandEvaluation,
    pub effective: HandCategory,
    pub blockers: Blockers,
    pub hero_is_ip: bool,
    pub pot: f64,
    pub to_call: f64,
    pub spr: f64,
    pub pot_odds: f64,
    /// Villain's last verb on this street; check when villain has not acted.
    pub villain_action: ActionVerb,
    pub preflop_aggressor: Option<Player>,
    pub hero_synergy: i32,
    pub villain_synergy: i32,
    pub turn_scare: bool,
}

impl<'a> Situation<'a> {
    pub fn analyze(state: &'a HandState, street: Street, config: &'a EngineConfig) -> Result<Self, EngineError> {
        let hero = parse_cards(&state.hero_cards)
            .filter(|cards| cards.len() == 2)
            .ok_or_else(|| EngineError::HandNotEvaluable(state.hero_cards.clone()))?;
        let hero_cards = [hero[0], hero[1]];

        let board = parse_cards(&state.board_cards).ok_or_else(|| EngineError::InvalidBoard(state.board_cards.clone()))?;
        if board.len() != street.board_len() {
            return Err(EngineError::BoardStreetMismatch { street: street.to_string(), cards: board.len() });
        }

        let mut seen = HashSet::new();
        for card in hero_cards.iter().chain(board.iter()) {
            if !seen.insert(*card) {
                return Err(EngineError::DuplicateCard(card.to_string()));
            }
        }

        let board_info = analyze_board(&board);
        let evaluation = evaluate(&hero_cards, &board);
        let blockers = Blockers::detect(&hero_cards, &board_info);
        let hero_is_ip = state
            .hero_is_ip
            .unwrap_or_else(|| state.hero_position.is_in_position_against(state.villain_position));

        let pot = state.pot_bb.max(0.0);
        let to_call = state.amount_to_call.max(0.0);
        let effective_stack = state.hero_stack_bb.min(state.villain_stack_bb);
        let spr = match state.spr {
            Some(spr) if spr.is_finite() && spr >= 0.0 => spr,
            _ => stack_to_pot(effective_stack, pot, config.zero_pot_spr),
        };

        let villain_action = state
            .street_actions(street)
            .filter(|a| a.player == Player::Villain)
            .last()
            .map_or(ActionVerb::Check, |a| a.action);

        let preflop_aggressor = state
            .street_actions(Street::Preflop)
            .filter(|a| a.action.is_aggressive())
            .last()
            .map(|a| a.player)
            .or_else(|| state.previous.as_ref().and_then(|p| p.preflop_aggressor));

        Ok(Situation {
            state,
            config,
            street,
            hero_cards,
            effective: evaluation.effective_category(),
            hero_synergy: synergy(state.hero_position, &board_info),
            villain_synergy: synergy(state.villain_position, &board_info),
            turn_scare: street == Street::Turn && is_turn_scare_card(&board),
            board,
            board_info,
            evaluation,
            blockers,
            hero_is_ip,
            pot,
            to_call,
            spr,
            pot_odds: pot_odds(pot, to_call),
            villain_action,
            preflop_aggressor,
        })
    }

    /// A bet or raise is pending against hero.
    pub fn facing_bet(&self) -> bool {
        self.to_call > 0.0 || matches!(self.villain_action, ActionVerb::Bet | ActionVerb::Raise)
    }

    /// Hero may bet first into an unbet pot: in position, or the last
    /// aggressor of the previous street.
    pub fn has_initiative(&self) -> bool {
        if self.hero_is_ip {
            return true;
        }
        let last_aggressor = match self.street.previous() {
            Some(Street::Preflop) => self.preflop_aggressor,
            Some(prev) => self
                .state
                .street_actions(prev)
                .filter(|a| a.action.is_aggressive())
                .last()
                .map(|a| a.player),
            None => None,
        };
        last_aggressor == Some(Player::Hero)
    }

    /// Pot before the pending bet.
    pub fn base_pot(&self) -> f64 {
        (self.pot - self.to_call).max(0.0)
    }

    pub fn is_three_bet_pot(&self) -> bool {
        if self.state.is_3bet_pot {
            return true;
        }
        self.state
            .street_actions(Street::Preflop)
            .filter(|a| a.action.is_aggressive())
            .count()
            >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::models::{ActionRecord, Position};

    #[test]
    fn rejects_bad_input() {
        let cfg = EngineConfig::default();
        let bad_hand = HandState::new(Position::BTN, Position::BB, &["Ah"], &[]);
        assert!(matches!(
            Situation::analyze(&bad_hand, Street::Preflop, &cfg),
            Err(EngineError::HandNotEvaluable(_))
        ));

        let mismatch = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d"]);
        assert!(matches!(
            Situation::analyze(&mismatch, Street::Flop, &cfg),
            Err(EngineError::BoardStreetMismatch { cards: 2, .. })
        ));

        let dup = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Kh", "7d", "2c"]);
        assert!(matches!(
            Situation::analyze(&dup, Street::Flop, &cfg),
            Err(EngineError::DuplicateCard(_))
        ));

        let junk = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Zz", "7d", "2c"]);
        assert!(matches!(Situation::analyze(&junk, Street::Flop, &cfg), Err(EngineError::InvalidBoard(_))));
    }

    #[test]
    fn derives_spr_and_position() {
        let cfg = EngineConfig::default();
        let mut state = HandState::new(Position::BB, Position::BTN, &["AhKh"], &["Ks", "7d", "2c"]);
        state.pot_bb = 10.0;
        state.hero_stack_bb = 95.0;
        state.villain_stack_bb = 120.0;
        let sit = Situation::analyze(&state, Street::Flop, &cfg).unwrap();
        assert_eq!(sit.spr, 9.5);
        assert!(!sit.hero_is_ip);
        assert_eq!(sit.villain_action, ActionVerb::Check);
        assert!(!sit.facing_bet());
        assert!(!sit.has_initiative());

        state.pot_bb = 0.0;
        let empty = Situation::analyze(&state, Street::Flop, &cfg).unwrap();
        assert_eq!(empty.spr, 999.0);
    }

    #[test]
    fn out_of_position_raiser_keeps_initiative() {
        let cfg = EngineConfig::default();
        let mut state = HandState::new(Position::UTG, Position::BTN, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
        state.actions = vec![
            ActionRecord::new(Street::Preflop, Player::Hero, ActionVerb::Open).sized(2.3),
            ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Call),
        ];
        let sit = Situation::analyze(&state, Street::Flop, &cfg).unwrap();
        assert!(!sit.hero_is_ip);
        assert_eq!(sit.preflop_aggressor, Some(Player::Hero));
        assert!(sit.has_initiative());
    }

    #[test]
    fn villain_bet_means_facing_bet() {
        let cfg = EngineConfig::default();
        let mut state = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
        state.actions = vec![ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Bet).sized(2.0)];
        let sit = Situation::analyze(&state, Street::Flop, &cfg).unwrap();
        assert!(sit.facing_bet());
        assert_eq!(sit.villain_synergy, -20);
    }
}
