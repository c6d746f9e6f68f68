use rand::Rng;

use crate::strategy_engine::models::{Card, Rank, Suit};

/// A standard 52-card deck that can be shuffled and dealt from.
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Unshuffled deck, clubs first, deuces first within a suit.
    pub fn ordered() -> Self {
        let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
        let cards: Vec<Card> = suits
            .iter()
            .flat_map(|&suit| (2u8..=14).map(move |r| Card { rank: Rank(r), suit }))
            .collect();
        Deck { cards, cursor: 0 }
    }

    /// Build a fresh ordered deck and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Deck::ordered();

        // Fisher-Yates shuffle
        for i in (1..deck.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            deck.cards.swap(i, j);
        }

        deck
    }

    /// Deal one card, or `None` once the deck is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Deal up to `n` cards.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.deal()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn deck_has_52_unique_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = Deck::new_shuffled(&mut rng);
        let dealt = deck.deal_n(52);
        let unique: HashSet<Card> = dealt.iter().copied().collect();
        assert_eq!(unique.len(), 52);
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal().is_none());
    }

    #[test]
    fn same_seed_same_order() {
        let a = Deck::new_shuffled(&mut StdRng::seed_from_u64(7)).cards().to_vec();
        let b = Deck::new_shuffled(&mut StdRng::seed_from_u64(7)).cards().to_vec();
        assert_eq!(a, b);
    }
}
