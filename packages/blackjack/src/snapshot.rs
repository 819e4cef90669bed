use crate::card::Card;
use crate::round::{Round, RoundPhase};
use serde::{Deserialize, Serialize};

/// A card as the snapshot renders it. String-typed so the face-down
/// placeholder is representable; a domain [`Card`] never holds `"BACK"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub rank: String,
    pub suit: String,
}

impl CardView {
    pub fn of(card: &Card) -> Self {
        Self {
            rank: card.rank.as_str().to_string(),
            suit: card.suit.as_str().to_string(),
        }
    }

    pub fn back() -> Self {
        Self {
            rank: "BACK".to_string(),
            suit: "BACK".to_string(),
        }
    }
}

/// The full client-facing state, returned after every action. Serialized
/// camelCase; the split and outcome fields only appear once they exist, so
/// a plain single-hand round keeps the original flat shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub player_hand: Vec<CardView>,
    pub dealer_hand: Vec<CardView>,
    pub game_state: RoundPhase,
    pub count: i32,
    pub true_count: f64,
    pub current_bet: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_hands: Option<Vec<Vec<CardView>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_hand: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl RoundSnapshot {
    pub fn of(round: &Round) -> Self {
        let revealed = round.phase() == RoundPhase::Resolution;
        let (split_hands, active_hand) = if round.is_split() {
            let hands = round
                .hands()
                .iter()
                .map(|hand| hand.cards.iter().map(CardView::of).collect())
                .collect();
            (Some(hands), Some(round.active_hand_index()))
        } else {
            (None, None)
        };
        let outcome = round.outcomes().map(|outcomes| {
            outcomes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        });

        Self {
            player_hand: round.active_hand().cards.iter().map(CardView::of).collect(),
            dealer_hand: dealer_view(round.dealer_hand(), revealed),
            game_state: round.phase(),
            count: round.shoe().running_count(),
            true_count: round.shoe().true_count(),
            current_bet: round.current_bet(),
            split_hands,
            active_hand,
            outcome,
        }
    }
}

/// Dealer display. Until the round resolves only the upcard shows and every
/// later card is a face-down placeholder; with at most one dealer card the
/// view is padded to the fixed two face-down slots. Resolution reveals all.
fn dealer_view(cards: &[Card], revealed: bool) -> Vec<CardView> {
    if revealed {
        cards.iter().map(CardView::of).collect()
    } else if cards.len() > 1 {
        let mut view = vec![CardView::of(&cards[0])];
        view.extend(std::iter::repeat_with(CardView::back).take(cards.len() - 1));
        view
    } else {
        vec![CardView::back(), CardView::back()]
    }
}
