//! The 1326 concrete two-card combos and conversions between code-level
//! and combo-level ranges.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::strategy_engine::cards::HandCode;
use crate::strategy_engine::deck::Deck;
use crate::strategy_engine::models::Card;

/// Weight per starting-hand code.
pub type CodeRange = BTreeMap<HandCode, f64>;

/// Weight per concrete combo.
pub type ComboRange = BTreeMap<Combo, f64>;

/// Two distinct cards, stored higher card first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combo {
    high: Card,
    low: Card,
}

impl Combo {
    pub fn new(a: Card, b: Card) -> Combo {
        if a >= b {
            Combo { high: a, low: b }
        } else {
            Combo { high: b, low: a }
        }
    }

    pub fn cards(self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn hand_code(self) -> HandCode {
        HandCode::from_cards(self.high, self.low)
    }

    pub fn conflicts_with(self, dead: &[Card]) -> bool {
        dead.contains(&self.high) || dead.contains(&self.low)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

pub struct ComboTable {
    by_code: BTreeMap<HandCode, Vec<Combo>>,
}

static COMBO_TABLE: Lazy<ComboTable> = Lazy::new(ComboTable::build);

impl ComboTable {
    pub fn global() -> &'static ComboTable {
        &COMBO_TABLE
    }

    fn build() -> Self {
        let deck = Deck::ordered();
        let cards = deck.cards();
        let mut by_code: BTreeMap<HandCode, Vec<Combo>> = BTreeMap::new();
        for (i, &a) in cards.iter().enumerate() {
            for &b in &cards[i + 1..] {
                let combo = Combo::new(a, b);
                by_code.entry(combo.hand_code()).or_default().push(combo);
            }
        }
        ComboTable { by_code }
    }

    pub fn combos(&self, code: HandCode) -> &[Combo] {
        self.by_code.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn codes(&self) -> impl Iterator<Item = &HandCode> {
        self.by_code.keys()
    }

    pub fn len(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Expand a code range to every combo that avoids `dead`.
///
/// Each surviving combo carries its code's weight unchanged; zero-weight
/// codes are left out.
pub fn expand_to_combos(range: &CodeRange, dead: &[Card]) -> ComboRange {
    let table = ComboTable::global();
    let mut out = ComboRange::new();
    for (&code, &weight) in range {
        if weight <= 0.0 {
            continue;
        }
        for &combo in table.combos(code) {
            if !combo.conflicts_with(dead) {
                out.insert(combo, weight);
            }
        }
    }
    out
}

/// Sum combo weights back up to their codes.
pub fn aggregate_by_code(range: &ComboRange) -> CodeRange {
    let mut out = CodeRange::new();
    for (combo, &weight) in range {
        *out.entry(combo.hand_code()).or_insert(0.0) += weight;
    }
    out
}

pub fn total_weight(range: &ComboRange) -> f64 {
    range.values().sum()
}

/// The `limit` heaviest combos, ties kept in combo order.
pub fn sample_combos(range: &ComboRange, limit: usize) -> Vec<Combo> {
    let mut entries: Vec<(&Combo, &f64)> = range.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(a.1));
    entries.into_iter().take(limit).map(|(c, _)| *c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::cards::parse_card;
    use std::collections::HashSet;

    fn code(s: &str) -> HandCode {
        HandCode::parse(s).unwrap()
    }

    #[test]
    fn table_partitions_1326_combos() {
        let table = ComboTable::global();
        assert_eq!(table.len(), 1326);
        assert_eq!(table.codes().count(), 169);

        let mut seen = HashSet::new();
        for &c in table.codes() {
            assert_eq!(table.combos(c).len(), c.combo_count());
            for combo in table.combos(c) {
                assert_eq!(combo.hand_code(), c);
                assert!(seen.insert(*combo), "combo {combo} listed twice");
            }
        }
        assert_eq!(seen.len(), 1326);
    }

    #[test]
    fn expansion_keeps_weight_and_drops_dead_cards() {
        let mut range = CodeRange::new();
        range.insert(code("AKs"), 0.5);
        range.insert(code("QQ"), 1.0);
        range.insert(code("72o"), 0.0);

        let dead = vec![parse_card("Ah").unwrap(), parse_card("Qs").unwrap()];
        let combos = expand_to_combos(&range, &dead);
        assert_eq!(combos.len(), 3 + 3);
        assert!(combos.iter().all(|(c, _)| !c.conflicts_with(&dead)));
        assert!(combos.iter().filter(|(c, _)| c.hand_code() == code("AKs")).all(|(_, &w)| w == 0.5));
    }

    #[test]
    fn aggregation_round_trip() {
        let mut range = CodeRange::new();
        range.insert(code("JTs"), 1.0);
        range.insert(code("88"), 0.25);

        let full = aggregate_by_code(&expand_to_combos(&range, &[]));
        assert_eq!(full.get(&code("JTs")), Some(&4.0));
        assert_eq!(full.get(&code("88")), Some(&1.5));

        let dead = vec![parse_card("8c").unwrap()];
        let blocked = aggregate_by_code(&expand_to_combos(&range, &dead));
        assert_eq!(blocked.get(&code("88")), Some(&0.75));
    }

    #[test]
    fn sample_prefers_heavier_combos() {
        let mut range = CodeRange::new();
        range.insert(code("AA"), 1.0);
        range.insert(code("32o"), 0.1);
        let combos = expand_to_combos(&range, &[]);
        let sample = sample_combos(&combos, 8);
        assert_eq!(sample.len(), 8);
        assert_eq!(sample.iter().filter(|c| c.hand_code() == code("AA")).count(), 6);
    }
}
