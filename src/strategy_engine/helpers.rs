//! Shared builders for the street modules.
//!
//! Every street assembles the same pieces: a strategy matrix, the reasons
//! behind it and, for betting lines, a planned size. [`StreetDecision`]
//! carries those to the formatter so street files focus on poker logic only.

use crate::strategy_engine::math::round_to;
use crate::strategy_engine::models::{ActionMatrix, Card, Decision, Player, SizeDetails};

/// What a street module decided, before formatting.
#[derive(Debug, Clone)]
pub struct StreetDecision {
    pub action: Decision,
    pub matrix: ActionMatrix,
    /// Chips behind the chosen action in bb; 0 for check and fold.
    pub amount: f64,
    /// Pot fraction of the chosen bet; 0 unless betting.
    pub sizing_ratio: f64,
    pub reasons: Vec<String>,
    /// The planned bet, reported even when the chosen action is check.
    pub size_details: Option<SizeDetails>,
    /// Set by the preflop module once the aggressor is known.
    pub preflop_aggressor: Option<Player>,
}

impl StreetDecision {
    /// The best action of `matrix` with no sizing attached.
    pub fn new(matrix: ActionMatrix, reasons: Vec<String>) -> Self {
        StreetDecision {
            action: matrix.best(),
            matrix,
            amount: 0.0,
            sizing_ratio: 0.0,
            reasons,
            size_details: None,
            preflop_aggressor: None,
        }
    }

    pub fn fold(reason: impl Into<String>) -> Self {
        StreetDecision::new(ActionMatrix::pure(Decision::Fold), vec![reason.into()])
    }

    pub fn check(reason: impl Into<String>) -> Self {
        StreetDecision::new(ActionMatrix::pure(Decision::Check), vec![reason.into()])
    }

    /// Attach a planned bet of `ratio` times `pot`. Amount and ratio only
    /// stick when the chosen action is a bet.
    pub fn with_bet_size(mut self, ratio: f64, pot: f64) -> Self {
        let bet_amount = round_to(ratio * pot, 2);
        self.size_details = Some(SizeDetails { bet_ratio: ratio, bet_amount });
        if self.action == Decision::Bet {
            self.amount = bet_amount;
            self.sizing_ratio = ratio;
        }
        self
    }

    /// Preflop sizing: the total raise-to amount in bb.
    pub fn with_raise_to(mut self, amount: f64) -> Self {
        if self.action == Decision::Raise {
            self.amount = round_to(amount, 2);
        }
        self
    }

    pub fn with_call(mut self, to_call: f64) -> Self {
        if self.action == Decision::Call {
            self.amount = round_to(to_call, 2);
        }
        self
    }

    /// Postflop raise sized relative to the bet faced.
    pub fn with_raise_over(mut self, to_call: f64, multiple: f64) -> Self {
        if self.action == Decision::Raise && to_call > 0.0 {
            self.amount = round_to(to_call * multiple, 2);
        }
        self
    }

    pub fn with_aggressor(mut self, aggressor: Option<Player>) -> Self {
        self.preflop_aggressor = aggressor;
        self
    }

    pub fn reason(mut self, text: impl Into<String>) -> Self {
        self.reasons.push(text.into());
        self
    }
}

/// Format hero hand as string (e.g. "AcKs").
pub fn hand_str(hand: [Card; 2]) -> String {
    format!("{}{}", hand[0], hand[1])
}

/// Format board as space-separated string (e.g. "Ac Ks 7h").
pub fn board_str(board: &[Card]) -> String {
    board.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

/// Whole-number percentage, truncated ("33%").
pub fn pct(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0 + 1e-9) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::cards::parse_card;

    #[test]
    fn bet_size_sticks_only_to_bets() {
        let bet = StreetDecision::new(ActionMatrix::new(&[(Decision::Bet, 0.7), (Decision::Check, 0.3)]), vec![])
            .with_bet_size(0.33, 6.0);
        assert_eq!(bet.action, Decision::Bet);
        assert_eq!(bet.amount, 1.98);
        assert_eq!(bet.sizing_ratio, 0.33);

        let check = StreetDecision::check("nothing to do").with_bet_size(0.75, 6.0);
        assert_eq!(check.amount, 0.0);
        assert_eq!(check.size_details.map(|s| s.bet_amount), Some(4.5));
    }

    #[test]
    fn formatting_helpers() {
        let hand = [parse_card("Ac").unwrap(), parse_card("Ks").unwrap()];
        assert_eq!(hand_str(hand), "AcKs");
        assert_eq!(board_str(&[parse_card("7h").unwrap(), parse_card("2d").unwrap()]), "7h 2d");
        assert_eq!(pct(0.33), "33%");
        assert_eq!(pct(0.9), "90%");
    }
}
