//! Hand strength classification for hero's two cards on a board.
//!
//! The classifier walks the categories from strongest to weakest and stops
//! at the first hit, so every hand lands in exactly one category. The
//! `detail` refines the category: whether hero actually holds the made hand
//! (as opposed to the board playing for everyone), the kicker, the pair's
//! relation to the board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::strategy_engine::board::BoardInfo;
use crate::strategy_engine::models::{Card, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
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
    BottomPair,
    ComboDraw,
    NutFlushDraw,
    FlushDraw,
    OpenStraightDraw,
    GutshotDraw,
    Pair,
    HighCard,
    Air,
}

impl HandCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::Quads => "quads",
            HandCategory::FullHouse => "full_house",
            HandCategory::Flush => "flush",
            HandCategory::Straight => "straight",
            HandCategory::Set => "set",
            HandCategory::TwoPair => "two_pair",
            HandCategory::Overpair => "overpair",
            HandCategory::TopPair => "top_pair",
            HandCategory::MiddlePair => "middle_pair",
            HandCategory::BottomPair => "bottom_pair",
            HandCategory::ComboDraw => "combo_draw",
            HandCategory::NutFlushDraw => "nut_flush_draw",
            HandCategory::FlushDraw => "flush_draw",
            HandCategory::OpenStraightDraw => "open_straight_draw",
            HandCategory::GutshotDraw => "gutshot_draw",
            HandCategory::Pair => "pair",
            HandCategory::HighCard => "high_card",
            HandCategory::Air => "air",
        }
    }

    /// Set or better.
    pub fn is_nut_class(self) -> bool {
        matches!(
            self,
            HandCategory::StraightFlush
                | HandCategory::Quads
                | HandCategory::FullHouse
                | HandCategory::Flush
                | HandCategory::Straight
                | HandCategory::Set
        )
    }

    /// Straight or better.
    pub fn is_premium_made(self) -> bool {
        self.is_nut_class() && self != HandCategory::Set
    }

    /// Any made hand from top pair upward.
    pub fn is_value_hand(self) -> bool {
        self.is_nut_class() || matches!(self, HandCategory::TwoPair | HandCategory::TopPair)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            HandCategory::ComboDraw
                | HandCategory::NutFlushDraw
                | HandCategory::FlushDraw
                | HandCategory::OpenStraightDraw
                | HandCategory::GutshotDraw
        )
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandDetail {
    NoCards,
    PocketPair,
    Premium,
    #[serde(rename = "")]
    Plain,
    MadeStraightFlush,
    BoardStraightFlush,
    Quads,
    BoardQuads,
    FullHouse,
    BoardFullHouse,
    NutFlush,
    MadeFlush,
    BoardFlush,
    MadeStraight,
    BoardStraight,
    Set,
    Trips,
    BoardTrips,
    TwoPair,
    TopAndBoard,
    PairAndBoard,
    BoardTwoPair,
    Overpair,
    Underpair,
    TopKicker,
    WeakKicker,
    BoardPairTopKicker,
    BoardPairWeakKicker,
    MiddlePair,
    BottomPair,
    BoardPair,
    ComboDraw,
    NutFlushDraw,
    FlushDraw,
    Oesd,
    Gutshot,
    HighCard,
}

impl HandDetail {
    pub fn as_str(self) -> &'static str {
        match self {
            HandDetail::NoCards => "no_cards",
            HandDetail::PocketPair => "pocket_pair",
            HandDetail::Premium => "premium",
            HandDetail::Plain => "",
            HandDetail::MadeStraightFlush => "made_straight_flush",
            HandDetail::BoardStraightFlush => "board_straight_flush",
            HandDetail::Quads => "quads",
            HandDetail::BoardQuads => "board_quads",
            HandDetail::FullHouse => "full_house",
            HandDetail::BoardFullHouse => "board_full_house",
            HandDetail::NutFlush => "nut_flush",
            HandDetail::MadeFlush => "made_flush",
            HandDetail::BoardFlush => "board_flush",
            HandDetail::MadeStraight => "made_straight",
            HandDetail::BoardStraight => "board_straight",
            HandDetail::Set => "set",
            HandDetail::Trips => "trips",
            HandDetail::BoardTrips => "board_trips",
            HandDetail::TwoPair => "two_pair",
            HandDetail::TopAndBoard => "top_and_board",
            HandDetail::PairAndBoard => "pair_and_board",
            HandDetail::BoardTwoPair => "board_two_pair",
            HandDetail::Overpair => "overpair",
            HandDetail::Underpair => "underpair",
            HandDetail::TopKicker => "top_kicker",
            HandDetail::WeakKicker => "weak_kicker",
            HandDetail::BoardPairTopKicker => "board_pair_top_kicker",
            HandDetail::BoardPairWeakKicker => "board_pair_weak_kicker",
            HandDetail::MiddlePair => "middle_pair",
            HandDetail::BottomPair => "bottom_pair",
            HandDetail::BoardPair => "board_pair",
            HandDetail::ComboDraw => "combo_draw",
            HandDetail::NutFlushDraw => "nut_flush_draw",
            HandDetail::FlushDraw => "flush_draw",
            HandDetail::Oesd => "oesd",
            HandDetail::Gutshot => "gutshot",
            HandDetail::HighCard => "high_card",
        }
    }

    /// The made hand lives entirely on the board. A board straight flush is
    /// not listed: it is still played as a straight flush.
    pub fn is_board_only(self) -> bool {
        matches!(
            self,
            HandDetail::BoardQuads
                | HandDetail::BoardFullHouse
                | HandDetail::BoardFlush
                | HandDetail::BoardStraight
                | HandDetail::BoardTrips
                | HandDetail::BoardTwoPair
        )
    }
}

impl fmt::Display for HandDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandEvaluation {
    pub category: HandCategory,
    pub detail: HandDetail,
}

impl HandEvaluation {
    fn new(category: HandCategory, detail: HandDetail) -> Self {
        HandEvaluation { category, detail }
    }

    /// Category the strategy should actually play.
    ///
    /// Made hands that live on the board, and pairs that lean on a board
    /// pair, are played as a pair of the matching strength.
    pub fn effective_category(&self) -> HandCategory {
        use HandCategory as C;
        use HandDetail as D;

        match (self.category, self.detail) {
            (C::Set | C::TwoPair | C::Flush | C::Straight | C::FullHouse | C::Quads, detail)
                if detail.is_board_only() =>
            {
                C::TopPair
            }
            (C::TwoPair, D::TopAndBoard) => C::TopPair,
            (C::TwoPair, D::PairAndBoard) => C::MiddlePair,
            (C::TopPair, D::BoardPairTopKicker) => C::MiddlePair,
            (C::TopPair, D::BoardPairWeakKicker) => C::BottomPair,
            (category, _) => category,
        }
    }
}

pub fn evaluate(hole: &[Card], board: &[Card]) -> HandEvaluation {
    use HandCategory as C;
    use HandDetail as D;

    if hole.len() < 2 {
        return HandEvaluation::new(C::Air, D::NoCards);
    }
    if board.is_empty() {
        return evaluate_preflop(hole[0], hole[1]);
    }

    let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    let hero_ranks: Vec<u8> = hole.iter().map(|c| c.rank.0).collect();
    let board_ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    let all_ranks: Vec<u8> = all.iter().map(|c| c.rank.0).collect();

    let counts = |ranks: &[u8]| {
        let mut out = [0u8; 15];
        for &r in ranks {
            out[r as usize] += 1;
        }
        out
    };
    let rank_counts = counts(&all_ranks);
    let hero_counts = counts(&hero_ranks);
    let board_counts = counts(&board_ranks);

    let mut board_unique = board_ranks.clone();
    board_unique.sort_unstable_by(|a, b| b.cmp(a));
    board_unique.dedup();
    let board_is_paired = board_counts.iter().any(|&c| c >= 2);

    // Straight flush
    for suit in Suit::ALL {
        let suited: Vec<u8> = all.iter().filter(|c| c.suit == suit).map(|c| c.rank.0).collect();
        if suited.len() < 5 {
            continue;
        }
        if let Some((_, seq)) = find_straight(&suited) {
            let hero_in = hole.iter().any(|c| c.suit == suit && in_sequence(c.rank.0, &seq));
            let detail = if hero_in { D::MadeStraightFlush } else { D::BoardStraightFlush };
            return HandEvaluation::new(C::StraightFlush, detail);
        }
    }

    // Quads
    if let Some(q) = (2..=14).rev().find(|&r| rank_counts[r] == 4) {
        let detail = if hero_counts[q] > 0 { D::Quads } else { D::BoardQuads };
        return HandEvaluation::new(C::Quads, detail);
    }

    let trips: Vec<usize> = (2..=14).rev().filter(|&r| rank_counts[r] == 3).collect();
    let pairs: Vec<usize> = (2..=14).rev().filter(|&r| rank_counts[r] == 2).collect();

    // Full house
    if let Some(&trip) = trips.first() {
        let filler = pairs.first().or_else(|| trips.get(1)).copied();
        if let Some(filler) = filler {
            let detail = if hero_counts[trip] > 0 || hero_counts[filler] > 0 {
                D::FullHouse
            } else {
                D::BoardFullHouse
            };
            return HandEvaluation::new(C::FullHouse, detail);
        }
    }

    // Flush
    for suit in Suit::ALL {
        if all.iter().filter(|c| c.suit == suit).count() < 5 {
            continue;
        }
        let detail = match hole.iter().filter(|c| c.suit == suit).map(|c| c.rank.0).max() {
            None => D::BoardFlush,
            Some(14) => D::NutFlush,
            Some(_) => D::MadeFlush,
        };
        return HandEvaluation::new(C::Flush, detail);
    }

    // Straight
    if let Some((high, seq)) = find_straight(&all_ranks) {
        let board_covers = find_straight(&board_ranks).is_some_and(|(board_high, _)| board_high >= high);
        let hero_in = hero_ranks.iter().any(|&r| in_sequence(r, &seq));
        let detail = if board_covers && !hero_in { D::BoardStraight } else { D::MadeStraight };
        return HandEvaluation::new(C::Straight, detail);
    }

    // Set / trips
    if let Some(&trip) = trips.first() {
        let detail = match hero_counts[trip] {
            2 => D::Set,
            1 => D::Trips,
            _ => D::BoardTrips,
        };
        return HandEvaluation::new(C::Set, detail);
    }

    // Two pair
    if pairs.len() >= 2 {
        let hero_pairs: Vec<usize> = pairs.iter().copied().filter(|&r| hero_counts[r] > 0).collect();
        let board_pairs: Vec<usize> = pairs.iter().copied().filter(|&r| board_counts[r] > 0).collect();
        if board_pairs.len() >= 2 && hero_pairs.is_empty() {
            return HandEvaluation::new(C::TwoPair, D::BoardTwoPair);
        }
        if board_pairs.len() == 1 && hero_pairs.len() == 1 {
            let detail = if hero_pairs[0] as u8 == board_unique[0] { D::TopAndBoard } else { D::PairAndBoard };
            return HandEvaluation::new(C::TwoPair, detail);
        }
        return HandEvaluation::new(C::TwoPair, D::TwoPair);
    }

    // One pair
    if let Some(&pair) = pairs.first() {
        let pair_rank = pair as u8;
        let top = board_unique[0];
        let bottom = board_unique[board_unique.len() - 1];
        match hero_counts[pair] {
            2 => {
                return if pair_rank > top {
                    HandEvaluation::new(C::Overpair, D::Overpair)
                } else if pair_rank < bottom {
                    HandEvaluation::new(C::BottomPair, D::Underpair)
                } else {
                    HandEvaluation::new(C::MiddlePair, D::PocketPair)
                };
            }
            1 => {
                if pair_rank == top {
                    let kicker = hero_ranks.iter().copied().filter(|&r| r != pair_rank).max().unwrap_or(0);
                    let detail = match (board_is_paired, kicker >= 13) {
                        (false, true) => D::TopKicker,
                        (false, false) => D::WeakKicker,
                        (true, true) => D::BoardPairTopKicker,
                        (true, false) => D::BoardPairWeakKicker,
                    };
                    return HandEvaluation::new(C::TopPair, detail);
                }
                return if pair_rank > bottom {
                    HandEvaluation::new(C::MiddlePair, D::MiddlePair)
                } else {
                    HandEvaluation::new(C::BottomPair, D::BottomPair)
                };
            }
            _ => {
                if board_counts[pair] >= 2 {
                    return HandEvaluation::new(C::BottomPair, D::BoardPair);
                }
            }
        }
    }

    // Draws
    let flush_draw = find_flush_draw(hole, &all);
    let straight_draw = find_straight_draw(&all_ranks, &hero_ranks);
    match (flush_draw, straight_draw) {
        (Some(_), Some(_)) => HandEvaluation::new(C::ComboDraw, D::ComboDraw),
        (Some(true), None) => HandEvaluation::new(C::NutFlushDraw, D::NutFlushDraw),
        (Some(false), None) => HandEvaluation::new(C::FlushDraw, D::FlushDraw),
        (None, Some(true)) => HandEvaluation::new(C::OpenStraightDraw, D::Oesd),
        (None, Some(false)) => HandEvaluation::new(C::GutshotDraw, D::Gutshot),
        (None, None) => HandEvaluation::new(C::Air, D::HighCard),
    }
}

fn evaluate_preflop(a: Card, b: Card) -> HandEvaluation {
    if a.rank == b.rank {
        HandEvaluation::new(HandCategory::Pair, HandDetail::PocketPair)
    } else if a.rank.0 >= 13 && b.rank.0 >= 13 {
        HandEvaluation::new(HandCategory::HighCard, HandDetail::Premium)
    } else {
        HandEvaluation::new(HandCategory::HighCard, HandDetail::Plain)
    }
}

/// Ace doubles as 1 inside a wheel sequence.
fn in_sequence(rank: u8, seq: &[u8]) -> bool {
    seq.contains(&rank) || (rank == 14 && seq.contains(&1))
}

/// Highest five-rank run. Returns the straight's top (5 for the wheel) and
/// its ranks.
fn find_straight(ranks: &[u8]) -> Option<(u8, Vec<u8>)> {
    if ranks.len() < 5 {
        return None;
    }
    let mut unique = ranks.to_vec();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();
    if unique.contains(&14) {
        unique.push(1);
    }
    unique.windows(5).find(|w| w[0] - w[4] == 4).map(|w| (w[0], w.to_vec()))
}

/// `Some(is_nut)` when four cards of one suit include one of hero's.
fn find_flush_draw(hole: &[Card], all: &[Card]) -> Option<bool> {
    for suit in Suit::ALL {
        if all.iter().filter(|c| c.suit == suit).count() != 4 {
            continue;
        }
        if let Some(best) = hole.iter().filter(|c| c.suit == suit).map(|c| c.rank.0).max() {
            return Some(best == 14);
        }
    }
    None
}

/// `Some(is_open_ended)` for the highest four-of-five window that uses a
/// hero rank.
fn find_straight_draw(all_ranks: &[u8], hero_ranks: &[u8]) -> Option<bool> {
    let mut ranks = all_ranks.to_vec();
    let mut hero = hero_ranks.to_vec();
    if ranks.contains(&14) {
        ranks.push(1);
    }
    if hero.contains(&14) {
        hero.push(1);
    }
    for high in (5u8..=14).rev() {
        let window = (high - 4)..=high;
        let missing: Vec<u8> = window.clone().filter(|r| !ranks.contains(r)).collect();
        if missing.len() != 1 || !window.clone().any(|r| hero.contains(&r)) {
            continue;
        }
        let gap = missing[0];
        return Some(gap == high || gap == high - 4);
    }
    None
}

/// Cards hero holds that take nut combos away from villain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Blockers {
    /// Ace of the monotone suit.
    pub nut_flush: bool,
    /// A rank that completes the board's straight windows.
    pub straight: bool,
    /// A card matching a board pair.
    pub trips: bool,
}

impl Blockers {
    pub fn detect(hole: &[Card], board: &BoardInfo) -> Blockers {
        let nut_flush = board.is_monotone
            && board
                .dominant_suit
                .is_some_and(|suit| hole.iter().any(|c| c.suit == suit && c.rank.0 == 14));
        let straight = hole.iter().any(|c| board.straight_key_ranks.contains(&c.rank));
        let trips = hole.iter().any(|c| board.paired_ranks.contains(&c.rank));
        Blockers { nut_flush, straight, trips }
    }

    pub fn any(&self) -> bool {
        self.nut_flush || self.straight || self.trips
    }
}
