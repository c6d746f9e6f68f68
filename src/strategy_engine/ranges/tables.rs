// Static preflop ranges for a 6-max table at 100bb.
//
// Opening ranges carry a weight per hand (fringe hands are mixed at 0.5).
// Response tables list the hands that re-raise and the hands that flat.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::strategy_engine::cards::HandCode;
use crate::strategy_engine::models::{ActionMatrix, Decision, Position};
use crate::strategy_engine::ranges::combos::CodeRange;

/// Raise and flat lists for one preflop spot.
#[derive(Debug, Clone, Default)]
pub struct ActionRange {
    pub raise: Vec<HandCode>,
    pub call: Vec<HandCode>,
}

impl ActionRange {
    fn from_lists(raise: &[&str], call: &[&str]) -> Self {
        ActionRange { raise: codes(raise), call: codes(call) }
    }

    /// Strategy for `code`, or `None` when the hand folds.
    pub fn action_map(&self, code: HandCode) -> Option<ActionMatrix> {
        let mut entries = Vec::new();
        if self.raise.contains(&code) {
            entries.push((Decision::Raise, 1.0));
        }
        if self.call.contains(&code) {
            entries.push((Decision::Call, 1.0));
        }
        (!entries.is_empty()).then(|| ActionMatrix::new(&entries))
    }

    pub fn raise_range(&self) -> CodeRange {
        self.raise.iter().map(|&c| (c, 1.0)).collect()
    }

    pub fn call_range(&self) -> CodeRange {
        self.call.iter().map(|&c| (c, 1.0)).collect()
    }

    /// Every hand that stays in, raising or flatting.
    pub fn continuing_range(&self) -> CodeRange {
        self.raise.iter().chain(self.call.iter()).map(|&c| (c, 1.0)).collect()
    }
}

fn codes(list: &[&str]) -> Vec<HandCode> {
    list.iter().filter_map(|s| HandCode::parse(s)).collect()
}

fn weighted(full: &[&str], mixed: &[&str]) -> CodeRange {
    let mut range: CodeRange = codes(full).into_iter().map(|c| (c, 1.0)).collect();
    range.extend(codes(mixed).into_iter().map(|c| (c, 0.5)));
    range
}

// ---------------------------------------------------------------------------
// Raise first in
// ---------------------------------------------------------------------------

const UTG_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77",
    "AKs", "AQs", "AJs", "ATs", "A5s", "A4s",
    "KQs", "KJs", "KTs", "QJs", "QTs", "JTs", "T9s",
    "AKo", "AQo", "AJo", "KQo",
];
const UTG_MIXED: &[&str] = &["66", "55", "A9s", "98s", "ATo"];

const HJ_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A5s", "A4s", "A3s",
    "KQs", "KJs", "KTs", "K9s", "QJs", "QTs", "Q9s", "JTs", "J9s", "T9s", "98s",
    "AKo", "AQo", "AJo", "ATo", "KQo", "KJo",
];
const HJ_MIXED: &[&str] = &["44", "33", "A7s", "87s", "76s", "QJo"];

const CO_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "K8s", "K7s", "K6s",
    "QJs", "QTs", "Q9s", "Q8s", "JTs", "J9s", "J8s", "T9s", "T8s", "98s", "97s", "87s", "76s", "65s",
    "AKo", "AQo", "AJo", "ATo", "A9o", "KQo", "KJo", "KTo", "QJo", "QTo", "JTo",
];
const CO_MIXED: &[&str] = &["K5s", "86s", "54s", "A8o", "K9o"];

const BTN_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "K8s", "K7s", "K6s", "K5s", "K4s", "K3s", "K2s",
    "QJs", "QTs", "Q9s", "Q8s", "Q7s", "Q6s", "Q5s",
    "JTs", "J9s", "J8s", "J7s", "T9s", "T8s", "T7s", "98s", "97s", "96s", "87s", "86s", "76s", "75s", "65s", "54s",
    "AKo", "AQo", "AJo", "ATo", "A9o", "A8o", "A7o", "A5o",
    "KQo", "KJo", "KTo", "K9o", "QJo", "QTo", "Q9o", "JTo", "J9o", "T9o",
];
const BTN_MIXED: &[&str] = &["Q4s", "J6s", "64s", "53s", "A6o", "A4o", "K8o", "98o"];

const SB_OPEN: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "K8s", "K7s", "K6s", "K5s",
    "QJs", "QTs", "Q9s", "Q8s", "JTs", "J9s", "J8s", "T9s", "T8s", "98s", "97s", "87s", "76s", "65s", "54s",
    "AKo", "AQo", "AJo", "ATo", "A9o", "A8o", "KQo", "KJo", "KTo", "QJo", "QTo", "JTo",
];
const SB_MIXED: &[&str] = &["K4s", "Q7s", "86s", "75s", "A7o", "A5o", "K9o", "T9o"];

static RFI_RANGES: Lazy<HashMap<Position, CodeRange>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(Position::UTG, weighted(UTG_OPEN, UTG_MIXED));
    table.insert(Position::HJ, weighted(HJ_OPEN, HJ_MIXED));
    table.insert(Position::CO, weighted(CO_OPEN, CO_MIXED));
    table.insert(Position::BTN, weighted(BTN_OPEN, BTN_MIXED));
    table.insert(Position::SB, weighted(SB_OPEN, SB_MIXED));
    table
});

// ---------------------------------------------------------------------------
// Facing an open
// ---------------------------------------------------------------------------

const VS_EARLY_3BET: &[&str] = &["AA", "KK", "QQ", "AKs", "AKo", "A5s"];
const VS_EARLY_CALL_IP: &[&str] = &["JJ", "TT", "AQs", "AJs", "KQs", "KJs", "QJs", "JTs", "T9s", "AQo"];
const VS_EARLY_CALL_SB: &[&str] = &["JJ", "TT", "AQs", "KQs"];
const VS_EARLY_CALL_BB: &[&str] = &[
    "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "QJs", "QTs", "Q9s", "JTs", "J9s", "T9s", "98s", "87s", "76s", "65s", "54s",
    "AQo", "AJo", "KQo",
];

const VS_LATE_3BET: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "AKs", "AQs", "AJs", "KQs", "AKo", "AQo", "A5s", "A4s", "K9s", "76s",
];
const VS_LATE_CALL_IP: &[&str] = &[
    "99", "88", "77", "66", "55", "ATs", "A9s", "KJs", "KTs", "QJs", "QTs", "JTs", "T9s", "98s", "87s", "AJo", "KQo",
];
const VS_LATE_CALL_SB: &[&str] = &["99", "88", "77", "ATs", "KJs", "QJs", "JTs", "AJo"];
const VS_LATE_CALL_BB: &[&str] = &[
    "99", "88", "77", "66", "55", "44", "33", "22",
    "ATs", "A9s", "A8s", "A7s", "A6s", "A3s", "A2s",
    "KJs", "KTs", "K8s", "K7s", "K6s", "K5s", "K4s", "K3s", "K2s",
    "QJs", "QTs", "Q9s", "Q8s", "Q7s", "Q6s", "JTs", "J9s", "J8s", "J7s",
    "T9s", "T8s", "T7s", "98s", "97s", "96s", "87s", "86s", "75s", "65s", "64s", "54s", "53s", "43s",
    "AJo", "ATo", "A9o", "A8o", "A7o", "A5o", "KQo", "KJo", "KTo", "K9o", "QJo", "QTo", "Q9o", "JTo", "J9o", "T9o", "98o",
];

fn opens_early(opener: Position) -> bool {
    matches!(opener, Position::UTG | Position::HJ)
}

/// Keyed by (defender, opener). Only seats acting after the opener appear.
static FACING_OPEN: Lazy<HashMap<(Position, Position), ActionRange>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for opener in Position::ALL {
        for defender in Position::ALL.into_iter().filter(|&d| d > opener) {
            let (raise, call) = match (opens_early(opener), defender) {
                (true, Position::BB) => (VS_EARLY_3BET, VS_EARLY_CALL_BB),
                (true, Position::SB) => (VS_EARLY_3BET, VS_EARLY_CALL_SB),
                (true, _) => (VS_EARLY_3BET, VS_EARLY_CALL_IP),
                (false, Position::BB) => (VS_LATE_3BET, VS_LATE_CALL_BB),
                (false, Position::SB) => (VS_LATE_3BET, VS_LATE_CALL_SB),
                (false, _) => (VS_LATE_3BET, VS_LATE_CALL_IP),
            };
            table.insert((defender, opener), ActionRange::from_lists(raise, call));
        }
    }
    table
});

// ---------------------------------------------------------------------------
// Facing a 3-bet, cold 4-bet, facing a 4-bet
// ---------------------------------------------------------------------------

const VS_3BET_4BET: &[&str] = &["AA", "KK", "QQ", "AKs", "AKo", "A5s"];
const VS_3BET_CALL_IP: &[&str] = &["JJ", "TT", "99", "AQs", "AJs", "KQs", "QJs", "JTs", "AQo"];
const VS_3BET_CALL_OOP: &[&str] = &["JJ", "TT", "AQs", "KQs", "AQo"];

/// Keyed by (opener, 3-bettor).
static FACING_3BET: Lazy<HashMap<(Position, Position), ActionRange>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for opener in Position::ALL {
        for three_bettor in Position::ALL.into_iter().filter(|&p| p > opener) {
            let call = if opener.is_in_position_against(three_bettor) {
                VS_3BET_CALL_IP
            } else {
                VS_3BET_CALL_OOP
            };
            table.insert((opener, three_bettor), ActionRange::from_lists(VS_3BET_4BET, call));
        }
    }
    table
});

const COLD_4BET_RAISE: &[&str] = &["AA", "KK", "QQ", "AKs", "AKo"];
const COLD_4BET_CALL_IP: &[&str] = &["JJ", "AQs", "KQs"];
const COLD_4BET_CALL_BLINDS: &[&str] = &["JJ", "AQs"];

static COLD_4BET: Lazy<HashMap<Position, ActionRange>> = Lazy::new(|| {
    Position::ALL
        .into_iter()
        .map(|pos| {
            let call = match pos {
                Position::SB | Position::BB => COLD_4BET_CALL_BLINDS,
                _ => COLD_4BET_CALL_IP,
            };
            (pos, ActionRange::from_lists(COLD_4BET_RAISE, call))
        })
        .collect()
});

static FACING_4BET: Lazy<ActionRange> =
    Lazy::new(|| ActionRange::from_lists(&["AA", "KK", "QQ", "AKs", "AKo"], &["JJ", "AQs"]));

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn rfi_range(position: Position) -> Option<&'static CodeRange> {
    RFI_RANGES.get(&position)
}

pub fn facing_open(defender: Position, opener: Position) -> Option<&'static ActionRange> {
    FACING_OPEN.get(&(defender, opener))
}

pub fn facing_three_bet(opener: Position, three_bettor: Position) -> Option<&'static ActionRange> {
    FACING_3BET.get(&(opener, three_bettor))
}

pub fn cold_four_bet(position: Position) -> Option<&'static ActionRange> {
    COLD_4BET.get(&position)
}

pub fn facing_four_bet() -> &'static ActionRange {
    &FACING_4BET
}

/// Limped or unraised pot: the button's opening hands without the
/// premiums, all at reduced weight.
pub fn limped_range() -> CodeRange {
    let premiums = codes(&["AA", "KK", "QQ", "JJ", "TT", "AKs", "AKo", "AQs"]);
    weighted(BTN_OPEN, BTN_MIXED)
        .into_keys()
        .filter(|c| !premiums.contains(c))
        .map(|c| (c, 0.8))
        .collect()
}
