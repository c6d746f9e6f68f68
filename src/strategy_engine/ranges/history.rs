//! Starting ranges from the preflop structure, narrowed street by street by
//! the postflop action history.

use log::{debug, warn};

use crate::strategy_engine::board::analyze_board;
use crate::strategy_engine::models::{Player, Position, Street};
use crate::strategy_engine::ranges::analyzer::filter_by_action;
use crate::strategy_engine::ranges::combos::{expand_to_combos, total_weight, CodeRange, ComboRange};
use crate::strategy_engine::ranges::tables;
use crate::strategy_engine::situation::Situation;

/// How the preflop betting went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotType {
    Limped,
    SingleRaised { opener: Player },
    ThreeBet { opener: Player, three_bettor: Player },
    FourBet { aggressor: Player },
}

impl PotType {
    pub fn classify(situation: &Situation) -> PotType {
        let raisers: Vec<Player> = situation
            .state
            .street_actions(Street::Preflop)
            .filter(|a| a.action.is_aggressive())
            .map(|a| a.player)
            .collect();

        match raisers.as_slice() {
            [] => match situation.preflop_aggressor {
                Some(p) if situation.state.is_3bet_pot => PotType::ThreeBet { opener: p.opponent(), three_bettor: p },
                Some(p) => PotType::SingleRaised { opener: p },
                None => PotType::Limped,
            },
            [opener] => PotType::SingleRaised { opener: *opener },
            [opener, second] if opener != second => PotType::ThreeBet { opener: *opener, three_bettor: *second },
            [opener, _] => PotType::SingleRaised { opener: *opener },
            [.., last] => PotType::FourBet { aggressor: *last },
        }
    }
}

impl std::fmt::Display for PotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PotType::Limped => write!(f, "limped pot"),
            PotType::SingleRaised { .. } => write!(f, "SRP"),
            PotType::ThreeBet { .. } => write!(f, "3-bet pot"),
            PotType::FourBet { .. } => write!(f, "4-bet pot"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RangePair {
    pub pot_type: PotType,
    pub hero: ComboRange,
    pub villain: ComboRange,
}

/// Code-level starting range for `player`, before any card removal.
fn starting_range(pot_type: PotType, player: Player, own: Position, other: Position) -> CodeRange {
    let range = match pot_type {
        PotType::Limped => None,
        PotType::SingleRaised { opener } if opener == player => tables::rfi_range(own).cloned(),
        PotType::SingleRaised { .. } => tables::facing_open(own, other).map(|t| t.call_range()),
        PotType::ThreeBet { three_bettor, .. } if three_bettor == player => {
            tables::facing_open(own, other).map(|t| t.raise_range())
        }
        PotType::ThreeBet { .. } => tables::facing_three_bet(own, other).map(|t| t.call_range()),
        PotType::FourBet { aggressor } if aggressor == player => Some(tables::facing_four_bet().raise_range()),
        PotType::FourBet { .. } => Some(tables::facing_four_bet().call_range()),
    };
    match range {
        Some(r) if !r.is_empty() => r,
        _ => tables::limped_range(),
    }
}

/// Both players' combo ranges at the current decision point.
pub fn build_ranges(situation: &Situation) -> RangePair {
    let state = situation.state;
    let pot_type = PotType::classify(situation);
    let (hero_pos, villain_pos) = (state.hero_position, state.villain_position);

    let hero_start = starting_range(pot_type, Player::Hero, hero_pos, villain_pos);
    let villain_start = starting_range(pot_type, Player::Villain, villain_pos, hero_pos);

    let board = &situation.board;
    let mut villain_dead = board.clone();
    villain_dead.extend_from_slice(&situation.hero_cards);

    let mut hero = expand_to_combos(&hero_start, board);
    let mut villain = expand_to_combos(&villain_start, &villain_dead);
    debug!(
        "{pot_type}: hero {hero_pos} starts with {} combos, villain {villain_pos} with {}",
        hero.len(),
        villain.len()
    );

    for record in state.actions.iter().filter(|a| a.street != Street::Preflop) {
        let visible = record.street.board_len();
        if board.len() < visible {
            continue;
        }
        let street_board = &board[..visible];
        let info = analyze_board(street_board);
        let target = match record.player {
            Player::Hero => &mut hero,
            Player::Villain => &mut villain,
        };
        *target = filter_by_action(target, record.action, record.street, street_board, &info);
    }

    let threshold = situation.config.negligible_range_weight;
    for (who, range) in [("hero", &hero), ("villain", &villain)] {
        let weight = total_weight(range);
        if weight < threshold {
            warn!("{who} range weight {weight:.3} is negligible; advantage figures are low-confidence");
        }
    }

    RangePair { pot_type, hero, villain }
}
