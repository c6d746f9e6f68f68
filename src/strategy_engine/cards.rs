//! Card parsing and the 169 starting-hand codes.

use std::fmt;

use crate::strategy_engine::models::{Card, Rank, Suit};

/// Parse a two-character card such as `"Ah"` or `"td"`.
///
/// The rank is read case-insensitively and the suit as lowercase; anything
/// that is not exactly two characters is rejected.
pub fn parse_card(text: &str) -> Option<Card> {
    let mut chars = text.chars();
    let (r, s) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    Some(Card { rank: Rank::from_char(r)?, suit: Suit::from_char(s)? })
}

/// Split caller card input into two-character tokens.
///
/// Accepts `["Ah", "Kh"]`, `["AhKh"]` or `["Ah Kh"]`. Returns `None` for an
/// odd-length chunk or a card that does not parse.
pub fn parse_cards(input: &[String]) -> Option<Vec<Card>> {
    let mut cards = Vec::new();
    for chunk in input {
        let cleaned: Vec<char> = chunk.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
        if cleaned.len() % 2 != 0 {
            return None;
        }
        for pair in cleaned.chunks(2) {
            let token: String = pair.iter().collect();
            cards.push(parse_card(&token)?);
        }
    }
    Some(cards)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandShape {
    Pair,
    Suited,
    Offsuit,
}

/// Suit-free label for a starting hand, e.g. `AKs`, `T9o`, `77`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandCode {
    high: Rank,
    low: Rank,
    shape: HandShape,
}

impl HandCode {
    pub fn pair(rank: Rank) -> HandCode {
        HandCode { high: rank, low: rank, shape: HandShape::Pair }
    }

    /// Two distinct ranks in either order. `None` when the ranks match.
    pub fn unpaired(a: Rank, b: Rank, suited: bool) -> Option<HandCode> {
        if a == b {
            return None;
        }
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        let shape = if suited { HandShape::Suited } else { HandShape::Offsuit };
        Some(HandCode { high, low, shape })
    }

    pub fn from_cards(a: Card, b: Card) -> HandCode {
        if a.rank == b.rank {
            return HandCode::pair(a.rank);
        }
        let (high, low) = if a.rank > b.rank { (a.rank, b.rank) } else { (b.rank, a.rank) };
        let shape = if a.suit == b.suit { HandShape::Suited } else { HandShape::Offsuit };
        HandCode { high, low, shape }
    }

    /// Parse `"99"`, `"AKs"`, `"kqo"` or a concrete `"AhKh"`.
    pub fn parse(text: &str) -> Option<HandCode> {
        let chars: Vec<char> = text.chars().collect();
        match chars.len() {
            2 => {
                let (a, b) = (Rank::from_char(chars[0])?, Rank::from_char(chars[1])?);
                (a == b).then(|| HandCode::pair(a))
            }
            3 => {
                let (a, b) = (Rank::from_char(chars[0])?, Rank::from_char(chars[1])?);
                match chars[2].to_ascii_lowercase() {
                    's' => HandCode::unpaired(a, b, true),
                    'o' => HandCode::unpaired(a, b, false),
                    _ => None,
                }
            }
            4 => {
                let first = parse_card(&chars[..2].iter().collect::<String>())?;
                let second = parse_card(&chars[2..].iter().collect::<String>())?;
                Some(HandCode::from_cards(first, second))
            }
            _ => None,
        }
    }

    pub fn high(self) -> Rank {
        self.high
    }

    pub fn low(self) -> Rank {
        self.low
    }

    pub fn shape(self) -> HandShape {
        self.shape
    }

    /// Concrete two-card holdings behind this code.
    pub fn combo_count(self) -> usize {
        match self.shape {
            HandShape::Pair => 6,
            HandShape::Suited => 4,
            HandShape::Offsuit => 12,
        }
    }

    /// All 169 codes.
    pub fn all() -> Vec<HandCode> {
        let mut codes = Vec::with_capacity(169);
        for high in (2u8..=14).rev() {
            codes.push(HandCode::pair(Rank(high)));
            for low in (2u8..high).rev() {
                codes.push(HandCode { high: Rank(high), low: Rank(low), shape: HandShape::Suited });
                codes.push(HandCode { high: Rank(high), low: Rank(low), shape: HandShape::Offsuit });
            }
        }
        codes
    }
}

impl fmt::Display for HandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            HandShape::Pair => write!(f, "{}{}", self.high, self.low),
            HandShape::Suited => write!(f, "{}{}s", self.high, self.low),
            HandShape::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

/// Normalize loose hand text to its canonical code.
///
/// Spaces and commas are dropped and an `off` suffix becomes `o`. Input that
/// does not describe a hand comes back unchanged.
pub fn canonicalize_hand(code: &str) -> String {
    let cleaned: String = code
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != ',')
        .collect::<String>()
        .replace("OFF", "o")
        .replace("off", "o");
    match HandCode::parse(&cleaned) {
        Some(hand) => hand.to_string(),
        None => code.to_string(),
    }
}
