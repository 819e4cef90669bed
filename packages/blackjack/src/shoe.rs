use crate::card::{Card, Rank, Suit};
use crate::error::EngineError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Fraction of the shoe dealt before the next draw forces a reshuffle.
pub const SHUFFLE_PENETRATION: f64 = 0.75;

/// Standard table setup.
pub const DEFAULT_DECK_COUNT: u8 = 4;

/// Multi-deck dealing shoe with Hi-Lo count tracking.
///
/// Cards leave in shuffle order via [`Shoe::draw`]. The shoe reshuffles
/// itself: once 75% of its cards have been dealt, the draw that notices it
/// rebuilds every deck, re-randomizes the order and zeroes both counters.
/// Callers never shuffle.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Undealt cards; the back of the vec is the next card out.
    cards: Vec<Card>,
    deck_count: u8,
    total_cards: usize,
    cards_dealt: usize,
    running_count: i32,
    rng: StdRng,
}

impl Shoe {
    pub fn new(deck_count: u8) -> Result<Self, EngineError> {
        if deck_count == 0 {
            return Err(EngineError::InvalidDeckCount(deck_count));
        }
        Ok(Self::with_rng(deck_count, StdRng::from_entropy()))
    }

    /// Deterministic shoe for tests and replay: the same seed yields the
    /// same draw order.
    pub fn seeded(deck_count: u8, seed: u64) -> Result<Self, EngineError> {
        if deck_count == 0 {
            return Err(EngineError::InvalidDeckCount(deck_count));
        }
        Ok(Self::with_rng(deck_count, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(deck_count: u8, rng: StdRng) -> Self {
        let total_cards = 52 * deck_count as usize;
        let mut shoe = Self {
            cards: Vec::with_capacity(total_cards),
            deck_count,
            total_cards,
            cards_dealt: 0,
            running_count: 0,
            rng,
        };
        shoe.shuffle();
        shoe
    }

    /// Rebuild all decks, randomize the order and zero both counters.
    fn shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.deck_count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
        self.cards.shuffle(&mut self.rng);
        self.cards_dealt = 0;
        self.running_count = 0;
    }

    /// Deal the next card, reshuffling first if penetration has reached the
    /// threshold. The drawn card's weight goes into the running count.
    pub fn draw(&mut self) -> Card {
        if self.cards_dealt as f64 >= self.total_cards as f64 * SHUFFLE_PENETRATION {
            self.shuffle();
        }
        let card = self
            .cards
            .pop()
            .expect("shoe holds cards after the penetration check");
        self.cards_dealt += 1;
        self.running_count += card.count_weight();
        card
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Running count normalized by the decks still in the shoe. Defined as 0
    /// when no cards remain, so the exhaustion bound never divides by zero.
    pub fn true_count(&self) -> f64 {
        let remaining_decks = (self.total_cards - self.cards_dealt) as f64 / 52.0;
        if remaining_decks > 0.0 {
            self.running_count as f64 / remaining_decks
        } else {
            0.0
        }
    }

    /// Fraction of the shoe dealt since the last shuffle.
    pub fn penetration(&self) -> f64 {
        self.cards_dealt as f64 / self.total_cards as f64
    }

    pub fn cards_dealt(&self) -> usize {
        self.cards_dealt
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::with_rng(DEFAULT_DECK_COUNT, StdRng::from_entropy())
    }
}

#[cfg(test)]
impl Shoe {
    /// Test hook: place cards on top of the shoe so they come out next,
    /// first listed drawn first.
    pub(crate) fn stack_top(&mut self, cards: &[Card]) {
        for card in cards.iter().rev() {
            self.cards.push(*card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rejects_zero_decks() {
        assert_eq!(Shoe::new(0).unwrap_err(), EngineError::InvalidDeckCount(0));
        assert_eq!(
            Shoe::seeded(0, 7).unwrap_err(),
            EngineError::InvalidDeckCount(0)
        );
    }

    #[test]
    fn test_fresh_shoe_counters() {
        let shoe = Shoe::new(4).unwrap();
        assert_eq!(shoe.total_cards(), 208);
        assert_eq!(shoe.cards_dealt(), 0);
        assert_eq!(shoe.running_count(), 0);
        assert_eq!(shoe.true_count(), 0.0);
        assert_eq!(shoe.cards.len(), 208);
    }

    #[test]
    fn test_composition_has_every_card_per_deck() {
        let shoe = Shoe::seeded(2, 1).unwrap();
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in &shoe.cards {
            *counts.entry(*card).or_default() += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_running_count_sums_dealt_weights() {
        let mut shoe = Shoe::seeded(4, 42).unwrap();
        let mut expected = 0;
        for _ in 0..60 {
            expected += shoe.draw().count_weight();
        }
        assert_eq!(shoe.running_count(), expected);
        assert_eq!(shoe.cards_dealt(), 60);
    }

    #[test]
    fn test_seeded_shoes_deal_identically() {
        let mut a = Shoe::seeded(4, 99).unwrap();
        let mut b = Shoe::seeded(4, 99).unwrap();
        for _ in 0..30 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_penetration_triggers_reshuffle() {
        // Single deck: the threshold sits at 39 cards. Draw 39 without a
        // reshuffle, then the 40th draw must reshuffle first.
        let mut shoe = Shoe::seeded(1, 5).unwrap();
        for _ in 0..39 {
            shoe.draw();
        }
        assert_eq!(shoe.cards_dealt(), 39);

        let card = shoe.draw();
        assert_eq!(shoe.cards_dealt(), 1);
        assert_eq!(shoe.running_count(), card.count_weight());
    }

    #[test]
    fn test_cards_dealt_never_exceeds_total() {
        let mut shoe = Shoe::seeded(1, 8).unwrap();
        for _ in 0..500 {
            shoe.draw();
            assert!(shoe.cards_dealt() <= shoe.total_cards());
            assert!(shoe.penetration() <= SHUFFLE_PENETRATION + 1.0 / 52.0);
        }
    }

    #[test]
    fn test_true_count_normalizes_by_remaining_decks() {
        let mut shoe = Shoe::seeded(4, 3).unwrap();
        for _ in 0..104 {
            shoe.draw();
        }
        // 104 of 208 dealt leaves exactly two decks.
        let expected = shoe.running_count() as f64 / 2.0;
        assert_eq!(shoe.true_count(), expected);
    }

    #[test]
    fn test_true_count_zero_at_exhaustion_bound() {
        let mut shoe = Shoe::seeded(1, 11).unwrap();
        shoe.running_count = 10;
        shoe.cards_dealt = shoe.total_cards;
        assert_eq!(shoe.true_count(), 0.0);
    }
}
