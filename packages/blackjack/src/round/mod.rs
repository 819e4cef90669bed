use crate::card::Card;
use crate::hand::{hand_value, Hand};
use crate::shoe::Shoe;
use crate::snapshot::RoundSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the round. Wire names are the snapshot's `gameState` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Resolution,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Betting => "betting",
            RoundPhase::PlayerTurn => "player_turn",
            RoundPhase::DealerTurn => "dealer_turn",
            RoundPhase::Resolution => "resolution",
        }
    }
}

/// Player-initiated moves, gated by an explicit permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Start,
    Hit,
    Stand,
    DoubleDown,
    Split,
    Insurance,
}

impl PlayerAction {
    /// The transition table. An action outside its permitted phases is
    /// ignored without touching state; there is no error path.
    pub fn permitted_in(&self, phase: RoundPhase) -> bool {
        match self {
            // A new deal abandons whatever round was in flight.
            PlayerAction::Start => true,
            PlayerAction::Hit
            | PlayerAction::Stand
            | PlayerAction::DoubleDown
            | PlayerAction::Split
            | PlayerAction::Insurance => phase == RoundPhase::PlayerTurn,
        }
    }
}

/// Result of one player hand measured against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Push,
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RoundOutcome::PlayerBust => "Player busts, dealer wins!",
            RoundOutcome::DealerBust => "Dealer busts, player wins!",
            RoundOutcome::PlayerWin => "Player wins!",
            RoundOutcome::DealerWin => "Dealer wins!",
            RoundOutcome::Push => "It's a draw!",
        };
        f.write_str(text)
    }
}

/// One seat's blackjack session: the shoe, the player's hand or hands, the
/// dealer's hand and the phase machine that moves play between them.
///
/// The shoe lives inside the round for the life of the process. `start`
/// never rebuilds it, so the running count carries across rounds and only
/// a penetration reshuffle resets it.
#[derive(Debug, Clone)]
pub struct Round {
    shoe: Shoe,
    hands: Vec<Hand>,
    active_hand_index: usize,
    dealer_hand: Vec<Card>,
    current_bet: u64,
    phase: RoundPhase,
    insurance_response: Option<String>,
}

impl Round {
    pub fn new(shoe: Shoe) -> Self {
        Self {
            shoe,
            hands: vec![Hand::new()],
            active_hand_index: 0,
            dealer_hand: Vec::new(),
            current_bet: 0,
            phase: RoundPhase::Betting,
            insurance_response: None,
        }
    }

    /// Deal a fresh round: one card to the player, then two to the dealer,
    /// in that order. Callable from any phase.
    pub fn start(&mut self, bet: u64) -> bool {
        if !PlayerAction::Start.permitted_in(self.phase) {
            return false;
        }
        self.current_bet = bet;
        self.hands = vec![Hand::new()];
        self.active_hand_index = 0;
        self.dealer_hand.clear();
        self.insurance_response = None;

        let opener = self.shoe.draw();
        self.hands[0].add_card(opener);
        self.dealer_hand.push(self.shoe.draw());
        self.dealer_hand.push(self.shoe.draw());

        self.phase = RoundPhase::PlayerTurn;
        true
    }

    /// Draw one card into the active hand. A bust finishes the hand and
    /// moves play along.
    pub fn hit(&mut self) -> bool {
        if !PlayerAction::Hit.permitted_in(self.phase) {
            return false;
        }
        let card = self.shoe.draw();
        self.active_hand_mut().add_card(card);
        self.advance_turn();
        true
    }

    pub fn stand(&mut self) -> bool {
        if !PlayerAction::Stand.permitted_in(self.phase) {
            return false;
        }
        self.active_hand_mut().stood = true;
        self.advance_turn();
        true
    }

    /// Take exactly one more card and finish the hand. Only a two-card hand
    /// may double; anywhere else this is a no-op.
    pub fn double_down(&mut self) -> bool {
        if !PlayerAction::DoubleDown.permitted_in(self.phase) {
            return false;
        }
        if self.active_hand().cards.len() != 2 {
            return false;
        }
        let card = self.shoe.draw();
        let hand = self.active_hand_mut();
        hand.add_card(card);
        hand.doubled = true;
        self.advance_turn();
        true
    }

    /// Split a pair into two hands, each topped up with one fresh card
    /// (first hand first). Play resumes on the first hand. No re-splitting.
    pub fn split(&mut self) -> bool {
        if !PlayerAction::Split.permitted_in(self.phase) {
            return false;
        }
        if self.hands.len() != 1 || !self.hands[0].is_pair() {
            return false;
        }
        let moved = self.hands[0].cards.pop().expect("a pair holds two cards");
        let first_draw = self.shoe.draw();
        self.hands[0].add_card(first_draw);

        let mut second = Hand::with_cards(vec![moved]);
        second.add_card(self.shoe.draw());
        self.hands.push(second);
        self.active_hand_index = 0;
        true
    }

    /// Record the insurance response verbatim. No payout semantics.
    pub fn insurance(&mut self, response: &str) -> bool {
        if !PlayerAction::Insurance.permitted_in(self.phase) {
            return false;
        }
        self.insurance_response = Some(response.to_string());
        true
    }

    /// Per-hand results; `None` until the round has resolved.
    pub fn outcomes(&self) -> Option<Vec<RoundOutcome>> {
        if self.phase != RoundPhase::Resolution {
            return None;
        }
        let dealer = self.dealer_value();
        let dealer_busted = dealer > 21;
        Some(
            self.hands
                .iter()
                .map(|hand| {
                    let player = hand.value();
                    if player > 21 {
                        RoundOutcome::PlayerBust
                    } else if dealer_busted {
                        RoundOutcome::DealerBust
                    } else if player > dealer {
                        RoundOutcome::PlayerWin
                    } else if dealer > player {
                        RoundOutcome::DealerWin
                    } else {
                        RoundOutcome::Push
                    }
                })
                .collect(),
        )
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::of(self)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn active_hand(&self) -> &Hand {
        &self.hands[self.active_hand_index]
    }

    pub fn active_hand_index(&self) -> usize {
        self.active_hand_index
    }

    pub fn is_split(&self) -> bool {
        self.hands.len() > 1
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer_hand
    }

    pub fn dealer_value(&self) -> u8 {
        hand_value(&self.dealer_hand)
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn insurance_response(&self) -> Option<&str> {
        self.insurance_response.as_deref()
    }

    fn active_hand_mut(&mut self) -> &mut Hand {
        &mut self.hands[self.active_hand_index]
    }

    /// After an action, move the cursor off a finished hand; once every
    /// hand is finished the player turn closes.
    fn advance_turn(&mut self) {
        if !self.active_hand().is_finished() {
            return;
        }
        if self.active_hand_index + 1 < self.hands.len() {
            self.active_hand_index += 1;
            return;
        }
        self.close_player_turn();
    }

    /// The dealer only plays against a live hand. An all-bust board goes
    /// straight to resolution.
    fn close_player_turn(&mut self) {
        if self.hands.iter().all(|hand| hand.is_busted()) {
            self.phase = RoundPhase::Resolution;
        } else {
            self.phase = RoundPhase::DealerTurn;
            self.dealer_play();
        }
    }

    /// Dealer draws to 17 or better. Soft 17 stands like hard 17.
    fn dealer_play(&mut self) {
        while hand_value(&self.dealer_hand) < 17 {
            let card = self.shoe.draw();
            self.dealer_hand.push(card);
        }
        self.phase = RoundPhase::Resolution;
    }
}
