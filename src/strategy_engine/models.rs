use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::strategy_engine::advantage::AdvantageSummary;
use crate::strategy_engine::error::EngineError;
use crate::strategy_engine::evaluator::{HandCategory, HandDetail};
use crate::strategy_engine::ranges::RangeSummary;

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(14);
    pub const KING: Rank = Rank(13);

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }

    /// Case-insensitive; `T` stands for ten.
    pub fn from_char(c: char) -> Option<Rank> {
        let value = match c.to_ascii_uppercase() {
            '2' => 2, '3' => 3, '4' => 4, '5' => 5, '6' => 6,
            '7' => 7, '8' => 8, '9' => 9, 'T' => 10,
            'J' => 11, 'Q' => 12, 'K' => 13, 'A' => 14,
            _ => return None,
        };
        Some(Rank(value))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Card {
        Card { rank: Rank(rank), suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// ---------------------------------------------------------------------------
// Table metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    HJ,  // Hijack
    CO,  // Cutoff
    BTN, // Button
    SB,  // Small Blind
    BB,  // Big Blind
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::UTG => "UTG",
            Position::HJ => "HJ",
            Position::CO => "CO",
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTG" => Ok(Position::UTG),
            "HJ" => Ok(Position::HJ),
            "CO" => Ok(Position::CO),
            "BTN" => Ok(Position::BTN),
            "SB" => Ok(Position::SB),
            "BB" => Ok(Position::BB),
            other => Err(format!("unknown position {other}")),
        }
    }
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::UTG,
        Position::HJ,
        Position::CO,
        Position::BTN,
        Position::SB,
        Position::BB,
    ];

    /// Postflop seniority: the higher value acts later.
    fn postflop_order(self) -> u8 {
        match self {
            Position::SB => 0,
            Position::BB => 1,
            Position::UTG => 2,
            Position::HJ => 5,
            Position::CO => 6,
            Position::BTN => 7,
        }
    }

    /// Does this seat act after `other` on every postflop street?
    pub fn is_in_position_against(self, other: Position) -> bool {
        match (self, other) {
            (Position::BTN, _) => true,
            (Position::SB, _) => false,
            (Position::BB, Position::SB) => true,
            _ => self.postflop_order() > other.postflop_order(),
        }
    }

    /// Seats that open-raise often enough to own the high-card boards.
    pub fn is_offensive(self) -> bool {
        matches!(self, Position::UTG | Position::HJ | Position::CO | Position::BTN)
    }

    pub fn is_tight(self) -> bool {
        matches!(self, Position::UTG | Position::HJ)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Street {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preflop" => Ok(Street::Preflop),
            "flop" => Ok(Street::Flop),
            "turn" => Ok(Street::Turn),
            "river" => Ok(Street::River),
            _ => Err(EngineError::UnknownStreet(s.to_string())),
        }
    }
}

impl Street {
    /// Number of community cards visible on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Betting streets left including this one.
    pub fn streets_remaining(self) -> u32 {
        match self {
            Street::Preflop => 4,
            Street::Flop => 3,
            Street::Turn => 2,
            Street::River => 1,
        }
    }

    pub fn previous(self) -> Option<Street> {
        match self {
            Street::Preflop => None,
            Street::Flop => Some(Street::Preflop),
            Street::Turn => Some(Street::Flop),
            Street::River => Some(Street::Turn),
        }
    }
}

// ---------------------------------------------------------------------------
// Hand history input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Hero,
    Villain,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Hero => Player::Villain,
            Player::Villain => Player::Hero,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Hero => write!(f, "hero"),
            Player::Villain => write!(f, "villain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVerb {
    Open,
    Limp,
    Raise,
    Bet,
    Call,
    Check,
    Fold,
}

impl ActionVerb {
    /// Verbs that put in a new price (counted as raises preflop).
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionVerb::Open | ActionVerb::Raise | ActionVerb::Bet)
    }

    /// Verbs that only match the current price (limps preflop).
    pub fn is_passive_entry(self) -> bool {
        matches!(self, ActionVerb::Call | ActionVerb::Limp)
    }
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionVerb::Open => "open",
            ActionVerb::Limp => "limp",
            ActionVerb::Raise => "raise",
            ActionVerb::Bet => "bet",
            ActionVerb::Call => "call",
            ActionVerb::Check => "check",
            ActionVerb::Fold => "fold",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub street: Street,
    pub player: Player,
    pub action: ActionVerb,
    /// Size in big blinds (total raise-to for preflop raises).
    #[serde(default)]
    pub amount: Option<f64>,
    /// Size as a fraction of the pot.
    #[serde(default)]
    pub ratio: Option<f64>,
}

impl ActionRecord {
    pub fn new(street: Street, player: Player, action: ActionVerb) -> Self {
        ActionRecord { street, player, action, amount: None, ratio: None }
    }

    pub fn sized(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

fn default_stack() -> f64 {
    100.0
}

/// Everything the caller knows about the hand at the decision point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandState {
    pub hero_position: Position,
    pub villain_position: Position,
    #[serde(default = "default_stack")]
    pub hero_stack_bb: f64,
    #[serde(default = "default_stack")]
    pub villain_stack_bb: f64,
    /// Either two 2-char cards or one concatenated 4-char string.
    pub hero_cards: Vec<String>,
    #[serde(default)]
    pub board_cards: Vec<String>,
    /// Kept as text so an unknown value degrades to the fold fallback.
    pub street: String,
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub pot_bb: f64,
    #[serde(default)]
    pub amount_to_call: f64,
    #[serde(default)]
    pub spr: Option<f64>,
    #[serde(default)]
    pub is_3bet_pot: bool,
    /// Overrides the seat-based position matchup when set.
    #[serde(default)]
    pub hero_is_ip: Option<bool>,
    /// Context handed back by the previous street's recommendation.
    #[serde(default)]
    pub previous: Option<ContinuityContext>,
}

impl HandState {
    /// A fresh hand with 100bb stacks and no action yet.
    pub fn new(
        hero_position: Position,
        villain_position: Position,
        hero_cards: &[&str],
        board_cards: &[&str],
    ) -> Self {
        let street = match board_cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        };
        HandState {
            hero_position,
            villain_position,
            hero_stack_bb: default_stack(),
            villain_stack_bb: default_stack(),
            hero_cards: hero_cards.iter().map(|c| c.to_string()).collect(),
            board_cards: board_cards.iter().map(|c| c.to_string()).collect(),
            street: street.to_string(),
            actions: Vec::new(),
            pot_bb: 0.0,
            amount_to_call: 0.0,
            spr: None,
            is_3bet_pot: false,
            hero_is_ip: None,
            previous: None,
        }
    }

    pub fn street_actions(&self, street: Street) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.actions.iter().filter(move |a| a.street == street)
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl Decision {
    pub fn key(self) -> &'static str {
        match self {
            Decision::Fold => "fold",
            Decision::Check => "check",
            Decision::Call => "call",
            Decision::Bet => "bet",
            Decision::Raise => "raise",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Fold => "Fold",
            Decision::Check => "Check",
            Decision::Call => "Call",
            Decision::Bet => "Bet",
            Decision::Raise => "Raise",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_ascii_uppercase())
    }
}

/// Mixed strategy over decisions. Entries keep insertion order and always
/// sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMatrix {
    entries: Vec<(Decision, f64)>,
}

impl ActionMatrix {
    /// Merges repeated decisions, clamps negatives to zero and normalizes.
    /// An all-zero input collapses to a pure check.
    pub fn new(entries: &[(Decision, f64)]) -> Self {
        let mut merged: Vec<(Decision, f64)> = Vec::new();
        for &(decision, p) in entries {
            let p = if p.is_finite() { p.max(0.0) } else { 0.0 };
            match merged.iter_mut().find(|(d, _)| *d == decision) {
                Some(slot) => slot.1 += p,
                None => merged.push((decision, p)),
            }
        }
        let total: f64 = merged.iter().map(|(_, p)| p).sum();
        if total <= 0.0 {
            return ActionMatrix::pure(Decision::Check);
        }
        for slot in merged.iter_mut() {
            slot.1 /= total;
        }
        ActionMatrix { entries: merged }
    }

    pub fn pure(decision: Decision) -> Self {
        ActionMatrix { entries: vec![(decision, 1.0)] }
    }

    pub fn probability(&self, decision: Decision) -> f64 {
        self.entries
            .iter()
            .find(|(d, _)| *d == decision)
            .map_or(0.0, |(_, p)| *p)
    }

    /// Highest-probability decision; the first listed wins ties.
    pub fn best(&self) -> Decision {
        let mut best: Option<(Decision, f64)> = None;
        for &(d, p) in &self.entries {
            match best {
                Some((_, bp)) if p <= bp => {}
                _ => best = Some((d, p)),
            }
        }
        best.map_or(Decision::Check, |(d, _)| d)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    pub fn entries(&self) -> &[(Decision, f64)] {
        &self.entries
    }

    /// Entries by descending probability, stable for ties.
    pub fn sorted_desc(&self) -> Vec<(Decision, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted
    }
}

impl Serialize for ActionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (d, p) in &self.entries {
            map.serialize_entry(d.key(), p)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Recommendation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeDetails {
    pub bet_ratio: f64,
    pub bet_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StrategicRadar {
    pub danger_meter: String,
    pub synergy_balance: String,
    pub advantage_summary: String,
    pub realization_balance: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MathData {
    pub street: Option<Street>,
    pub base_pot: f64,
    pub current_pot: f64,
    pub amount_to_call: f64,
    pub pot_odds: f64,
    pub spr: f64,
    pub mdf: Option<f64>,
    pub hero_range_summary: Option<RangeSummary>,
    pub villain_range_summary: Option<RangeSummary>,
    pub advantage: Option<AdvantageSummary>,
    pub hero_combos_sample: String,
    pub villain_combos_sample: String,
    pub note: String,
}

/// Carried from one street's recommendation into the next street's input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContinuityContext {
    #[serde(default)]
    pub hand_category: Option<HandCategory>,
    #[serde(default)]
    pub kicker_strength: Option<HandDetail>,
    #[serde(default)]
    pub spr: f64,
    #[serde(default)]
    pub adv_ratio: f64,
    #[serde(default)]
    pub advantage_data: Option<AdvantageSummary>,
    /// Who put in the last preflop raise.
    #[serde(default)]
    pub preflop_aggressor: Option<Player>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub street: String,
    pub action: Decision,
    pub action_desc: String,
    pub amount: f64,
    pub sizing_ratio: f64,
    pub strategy_matrix: ActionMatrix,
    pub reasons: Vec<String>,
    pub suggestion: String,
    pub stats: String,
    pub hand_info: String,
    pub size_details: Option<SizeDetails>,
    pub radar: Option<StrategicRadar>,
    pub math_data: MathData,
    pub context: ContinuityContext,
}
