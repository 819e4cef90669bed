use crate::card::Card;

/// Best blackjack value of a set of cards. Aces start at 11 and drop to 1
/// one at a time while the total is over 21.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        let value = card.value();
        if value == 11 {
            aces += 1;
        }
        total += value;
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

/// One hand of cards plus the per-hand flags a split round needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub stood: bool,
    pub doubled: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            stood: false,
            doubled: false,
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    /// A hand stops acting once it stands, doubles or busts.
    pub fn is_finished(&self) -> bool {
        self.stood || self.doubled || self.is_busted()
    }

    /// Exactly two cards of the same rank.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }
}
