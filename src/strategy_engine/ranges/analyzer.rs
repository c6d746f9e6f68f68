//! Range summaries, strength scores and action-based range filtering.

use std::collections::BTreeMap;

use log::trace;
use serde::Serialize;

use crate::strategy_engine::board::BoardInfo;
use crate::strategy_engine::evaluator::{evaluate, HandCategory};
use crate::strategy_engine::models::{ActionVerb, Card, Street};
use crate::strategy_engine::ranges::combos::ComboRange;

/// Coarse strength classes a range is summarized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    StraightFlush,
    Quads,
    FullHouse,
    Flush,
    Straight,
    Set,
    TwoPair,
    Overpair,
    TopPair,
    MiddlePair,
    WeakPair,
    Draw,
    Air,
}

impl Bucket {
    pub const ALL: [Bucket; 13] = [
        Bucket::StraightFlush,
        Bucket::Quads,
        Bucket::FullHouse,
        Bucket::Flush,
        Bucket::Straight,
        Bucket::Set,
        Bucket::TwoPair,
        Bucket::Overpair,
        Bucket::TopPair,
        Bucket::MiddlePair,
        Bucket::WeakPair,
        Bucket::Draw,
        Bucket::Air,
    ];

    pub fn from_category(category: HandCategory) -> Bucket {
        use HandCategory as C;
        match category {
            C::StraightFlush => Bucket::StraightFlush,
            C::Quads => Bucket::Quads,
            C::FullHouse => Bucket::FullHouse,
            C::Flush => Bucket::Flush,
            C::Straight => Bucket::Straight,
            C::Set => Bucket::Set,
            C::TwoPair => Bucket::TwoPair,
            C::Overpair => Bucket::Overpair,
            C::TopPair => Bucket::TopPair,
            C::MiddlePair => Bucket::MiddlePair,
            C::BottomPair | C::Pair => Bucket::WeakPair,
            C::ComboDraw | C::NutFlushDraw | C::FlushDraw | C::OpenStraightDraw | C::GutshotDraw => Bucket::Draw,
            C::HighCard | C::Air => Bucket::Air,
        }
    }

    pub fn score_weight(self) -> f64 {
        match self {
            Bucket::StraightFlush => 1.2,
            Bucket::Quads => 1.1,
            Bucket::FullHouse => 1.0,
            Bucket::Flush => 0.95,
            Bucket::Straight => 0.85,
            Bucket::Set => 0.8,
            Bucket::TwoPair => 0.7,
            Bucket::Overpair => 0.65,
            Bucket::TopPair => 0.6,
            Bucket::MiddlePair => 0.45,
            Bucket::WeakPair => 0.3,
            Bucket::Draw => 0.25,
            Bucket::Air => 0.1,
        }
    }

    /// Set or better.
    pub fn is_nut(self) -> bool {
        matches!(
            self,
            Bucket::StraightFlush | Bucket::Quads | Bucket::FullHouse | Bucket::Flush | Bucket::Straight | Bucket::Set
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub buckets: BTreeMap<Bucket, f64>,
    pub total_active_combos: f64,
}

impl Default for RangeSummary {
    fn default() -> Self {
        RangeSummary {
            buckets: Bucket::ALL.iter().map(|&b| (b, 0.0)).collect(),
            total_active_combos: 0.0,
        }
    }
}

impl RangeSummary {
    pub fn weight(&self, bucket: Bucket) -> f64 {
        self.buckets.get(&bucket).copied().unwrap_or(0.0)
    }

    /// Combined weight of the set-or-better buckets.
    pub fn nut_weight(&self) -> f64 {
        self.buckets.iter().filter(|(b, _)| b.is_nut()).map(|(_, w)| w).sum()
    }

    /// Nut weight as a fraction of the active weight.
    pub fn nut_share(&self) -> f64 {
        if self.total_active_combos <= 0.0 {
            return 0.0;
        }
        self.nut_weight() / self.total_active_combos
    }
}

/// Bucket every live combo by its effective category on `board`.
pub fn summarize(range: &ComboRange, board: &[Card]) -> RangeSummary {
    let mut summary = RangeSummary::default();
    for (combo, &weight) in range {
        if combo.conflicts_with(board) {
            continue;
        }
        let category = evaluate(&combo.cards(), board).effective_category();
        *summary.buckets.entry(Bucket::from_category(category)).or_insert(0.0) += weight;
        summary.total_active_combos += weight;
    }
    summary
}

/// Weighted mean of bucket strengths; 0.5 for an empty range.
pub fn score(summary: &RangeSummary) -> f64 {
    let total = summary.total_active_combos;
    if total <= 0.0 {
        return 0.5;
    }
    summary.buckets.iter().map(|(b, w)| w / total * b.score_weight()).sum()
}

pub fn nut_combos(summary: &RangeSummary) -> f64 {
    summary.nut_weight()
}

/// Scale combo weights by what `action` reveals on `board`.
///
/// Checking caps the range (strong hands rarely check), calling trims the
/// very top and pure air, betting or raising thins out the weak pairs.
/// Weights are scaled in place and never renormalized.
pub fn filter_by_action(
    range: &ComboRange,
    action: ActionVerb,
    street: Street,
    board: &[Card],
    info: &BoardInfo,
) -> ComboRange {
    let wet = info.is_wet();
    trace!("filtering {} combos by {action} on the {street} (wet: {wet})", range.len());

    range
        .iter()
        .map(|(&combo, &weight)| {
            let category = evaluate(&combo.cards(), board).effective_category();
            (combo, weight * action_multiplier(action, category, wet))
        })
        .collect()
}

fn action_multiplier(action: ActionVerb, category: HandCategory, wet: bool) -> f64 {
    use HandCategory as C;
    match action {
        ActionVerb::Check if category.is_nut_class() => {
            if wet { 0.05 } else { 0.2 }
        }
        ActionVerb::Check if matches!(category, C::TwoPair | C::TopPair) => {
            if wet { 0.6 } else { 0.8 }
        }
        ActionVerb::Call if category.is_premium_made() => {
            if wet { 0.15 } else { 0.4 }
        }
        ActionVerb::Call if category == C::Air => 0.4,
        ActionVerb::Bet | ActionVerb::Raise
            if matches!(category, C::MiddlePair | C::BottomPair) =>
        {
            0.4
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::board::analyze_board;
    use crate::strategy_engine::cards::{parse_card, HandCode};
    use crate::strategy_engine::ranges::combos::{expand_to_combos, total_weight, CodeRange};

    fn cards(text: &[&str]) -> Vec<Card> {
        text.iter().map(|c| parse_card(c).unwrap()).collect()
    }

    fn range(codes: &[&str]) -> CodeRange {
        codes.iter().map(|c| (HandCode::parse(c).unwrap(), 1.0)).collect()
    }

    #[test]
    fn summary_buckets_by_effective_category() {
        let board = cards(&["Ks", "7d", "2c"]);
        let combos = expand_to_combos(&range(&["77", "AKs", "QJs"]), &board);
        let summary = summarize(&combos, &board);
        assert_eq!(summary.weight(Bucket::Set), 3.0);
        assert_eq!(summary.weight(Bucket::TopPair), 3.0);
        assert_eq!(summary.weight(Bucket::Air), 4.0);
        assert_eq!(summary.total_active_combos, 10.0);
        assert_eq!(nut_combos(&summary), 3.0);
    }

    #[test]
    fn empty_range_scores_half() {
        let summary = summarize(&ComboRange::new(), &cards(&["Ks", "7d", "2c"]));
        assert_eq!(score(&summary), 0.5);
        assert_eq!(summary.nut_share(), 0.0);
    }

    #[test]
    fn score_weights_air_low_and_sets_high() {
        let board = cards(&["Ks", "7d", "2c"]);
        let strong = summarize(&expand_to_combos(&range(&["77"]), &board), &board);
        let weak = summarize(&expand_to_combos(&range(&["QJs"]), &board), &board);
        assert!((score(&strong) - 0.8).abs() < 1e-9);
        assert!((score(&weak) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn check_caps_strong_hands_on_dry_board() {
        let board = cards(&["Ks", "7d", "2c"]);
        let info = analyze_board(&board);
        let combos = expand_to_combos(&range(&["77", "QJs"]), &board);
        let filtered = filter_by_action(&combos, ActionVerb::Check, Street::Flop, &board, &info);
        for (combo, w) in &filtered {
            let expected = if combo.hand_code() == HandCode::parse("77").unwrap() { 0.2 } else { 1.0 };
            assert!((w - expected).abs() < 1e-9);
        }
        assert!(total_weight(&filtered) < total_weight(&combos));
    }

    #[test]
    fn bet_thins_weak_pairs() {
        let board = cards(&["Ks", "7d", "2c"]);
        let info = analyze_board(&board);
        let combos = expand_to_combos(&range(&["A7s"]), &board);
        let filtered = filter_by_action(&combos, ActionVerb::Bet, Street::Flop, &board, &info);
        assert!(filtered.values().all(|&w| (w - 0.4).abs() < 1e-9));
    }
}
