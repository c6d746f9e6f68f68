//! Board texture: connectivity, suit concentration, pairing and archetypes.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::strategy_engine::models::{Card, Rank, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Archetype {
    #[serde(rename = "A-High Dry")]
    AHighDry,
    #[serde(rename = "Monotone")]
    Monotone,
    #[serde(rename = "Two-Tone")]
    TwoTone,
    #[serde(rename = "Rainbow")]
    Rainbow,
    #[serde(rename = "Trips-Board")]
    TripsBoard,
    #[serde(rename = "Double-Paired")]
    DoublePaired,
    #[serde(rename = "High-Paired")]
    HighPaired,
    #[serde(rename = "Low-Paired")]
    LowPaired,
    #[serde(rename = "Highly-Connected")]
    HighlyConnected,
    #[serde(rename = "Connected")]
    Connected,
    #[serde(rename = "Wheel-Board")]
    WheelBoard,
    #[serde(rename = "Broadway-Dry")]
    BroadwayDry,
    #[serde(rename = "Ragged")]
    Ragged,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Archetype::AHighDry => "A-High Dry",
            Archetype::Monotone => "Monotone",
            Archetype::TwoTone => "Two-Tone",
            Archetype::Rainbow => "Rainbow",
            Archetype::TripsBoard => "Trips-Board",
            Archetype::DoublePaired => "Double-Paired",
            Archetype::HighPaired => "High-Paired",
            Archetype::LowPaired => "Low-Paired",
            Archetype::HighlyConnected => "Highly-Connected",
            Archetype::Connected => "Connected",
            Archetype::WheelBoard => "Wheel-Board",
            Archetype::BroadwayDry => "Broadway-Dry",
            Archetype::Ragged => "Ragged",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    #[default]
    Safe,
    Dynamic,
    Wet,
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DangerLevel::Safe => write!(f, "SAFE"),
            DangerLevel::Dynamic => write!(f, "DYNAMIC"),
            DangerLevel::Wet => write!(f, "WET"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoardInfo {
    /// Distinct ranks, highest first.
    pub ranks: Vec<Rank>,
    pub max_suit_count: u8,
    /// Most frequent suit; `None` on an empty board.
    pub dominant_suit: Option<Suit>,
    pub is_monotone: bool,
    pub is_paired: bool,
    /// Ranks showing at least twice, highest first.
    pub paired_ranks: Vec<Rank>,
    pub is_connected: bool,
    /// 0..=90, how tightly the ranks cluster into straight windows.
    pub connectedness_score: u32,
    pub draw_density: u32,
    pub is_dynamic: bool,
    /// Ranks that complete or nearly complete a straight on this board.
    pub straight_key_ranks: Vec<Rank>,
    pub high_card: Option<Rank>,
    pub danger: DangerLevel,
    pub archetypes: Vec<Archetype>,
}

impl BoardInfo {
    pub fn has(&self, archetype: Archetype) -> bool {
        self.archetypes.contains(&archetype)
    }

    /// Highest rank value, 0 on an empty board.
    pub fn high_value(&self) -> u8 {
        self.high_card.map_or(0, |r| r.0)
    }

    /// Dynamic or well connected; drives the range filters.
    pub fn is_wet(&self) -> bool {
        self.connectedness_score >= 60 || self.is_dynamic
    }
}

pub fn analyze_board(board: &[Card]) -> BoardInfo {
    if board.is_empty() {
        return BoardInfo::default();
    }

    let mut rank_counts = [0u8; 15];
    for c in board {
        rank_counts[c.rank.0 as usize] += 1;
    }
    let ranks: Vec<Rank> = (2u8..=14).rev().filter(|&r| rank_counts[r as usize] > 0).map(Rank).collect();
    let paired_ranks: Vec<Rank> = (2u8..=14).rev().filter(|&r| rank_counts[r as usize] >= 2).map(Rank).collect();
    let is_paired = !paired_ranks.is_empty();

    let mut dominant_suit = None;
    let mut max_suit_count = 0u8;
    for suit in Suit::ALL {
        let count = board.iter().filter(|c| c.suit == suit).count() as u8;
        if count > max_suit_count {
            max_suit_count = count;
            dominant_suit = Some(suit);
        }
    }
    let is_monotone = max_suit_count >= 3;

    let present: BTreeSet<u8> = ranks.iter().map(|r| r.0).collect();
    let mut connectedness_score = 0u32;
    let mut draw_density = 0u32;
    let mut is_connected = false;
    let mut key_ranks: BTreeSet<u8> = BTreeSet::new();

    if present.len() >= 2 {
        for start in 2u8..=10 {
            let window: Vec<u8> = (start..start + 5).collect();
            let hits: Vec<u8> = window.iter().copied().filter(|r| present.contains(r)).collect();
            let (Some(&lo), Some(&hi)) = (hits.first(), hits.last()) else {
                continue;
            };
            let span = hi - lo;
            if hits.len() >= 3 {
                is_connected = true;
                let score = if hits.len() >= 4 {
                    90
                } else if span == 2 {
                    80
                } else if span == 3 {
                    60
                } else {
                    40
                };
                connectedness_score = connectedness_score.max(score);
                draw_density += if hits.len() == 3 { 2 } else { 5 };
                key_ranks.extend(window.iter().copied().filter(|r| !present.contains(r)));
            } else if hits.len() == 2 && span <= 4 {
                let score = if span <= 2 { 40 } else { 20 };
                connectedness_score = connectedness_score.max(score);
                draw_density += 1;
            }
        }
    }

    let dynamic_value = connectedness_score as f64 * 0.5 + (max_suit_count as f64 - 1.0) * 20.0;
    let is_dynamic = dynamic_value >= 50.0;

    let danger = if is_monotone || (is_connected && max_suit_count >= 2) {
        DangerLevel::Wet
    } else if is_paired || is_dynamic {
        DangerLevel::Dynamic
    } else {
        DangerLevel::Safe
    };

    let high_card = ranks.first().copied();
    let high = high_card.map_or(0, |r| r.0);
    let mut archetypes = Vec::new();

    if high == 14 && !is_monotone && !is_connected && !is_paired {
        archetypes.push(Archetype::AHighDry);
    }

    if is_monotone {
        archetypes.push(Archetype::Monotone);
    } else if max_suit_count == 2 {
        archetypes.push(Archetype::TwoTone);
    } else {
        archetypes.push(Archetype::Rainbow);
    }

    if is_paired {
        if rank_counts.iter().any(|&c| c >= 3) {
            archetypes.push(Archetype::TripsBoard);
        } else if paired_ranks.len() >= 2 {
            archetypes.push(Archetype::DoublePaired);
        } else if paired_ranks[0].0 >= 10 {
            archetypes.push(Archetype::HighPaired);
        } else {
            archetypes.push(Archetype::LowPaired);
        }
    }

    if is_connected {
        if connectedness_score >= 80 {
            archetypes.push(Archetype::HighlyConnected);
        }
        archetypes.push(Archetype::Connected);
    }

    let has = |r: u8| present.contains(&r);
    if (has(14) && has(2) && has(3)) || (has(2) && has(3) && has(4)) {
        archetypes.push(Archetype::WheelBoard);
    }

    if (11..=13).contains(&high) && !is_monotone && !is_connected && !is_paired {
        archetypes.push(Archetype::BroadwayDry);
    }

    if high <= 9 && !is_connected && !is_paired && !is_monotone {
        archetypes.push(Archetype::Ragged);
    }

    BoardInfo {
        ranks,
        max_suit_count,
        dominant_suit,
        is_monotone,
        is_paired,
        paired_ranks,
        is_connected,
        connectedness_score,
        draw_density,
        is_dynamic,
        straight_key_ranks: key_ranks.into_iter().map(Rank).collect(),
        high_card,
        danger,
        archetypes,
    }
}

/// Did the turn card change the picture for the flop aggressor?
///
/// Overcards of Jack or better, the third card of a suit and a jump into
/// highly connected territory all count.
pub fn is_turn_scare_card(board: &[Card]) -> bool {
    if board.len() != 4 {
        return false;
    }
    let flop = analyze_board(&board[..3]);
    let turn = analyze_board(board);
    let card = board[3];

    let overcard = card.rank.0 > flop.high_value() && card.rank.0 >= 11;
    let flush_arrives = turn.max_suit_count >= 3 && flop.max_suit_count < 3;
    let straight_arrives = turn.connectedness_score >= 80 && flop.connectedness_score < 80;
    overcard || flush_arrives || straight_arrives
}
