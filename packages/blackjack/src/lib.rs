mod card;
mod error;
mod hand;
mod round;
mod shoe;
mod snapshot;

pub use card::{Card, Rank, Suit};
pub use error::EngineError;
pub use hand::{hand_value, is_busted, Hand};
pub use round::{PlayerAction, Round, RoundOutcome, RoundPhase};
pub use shoe::{Shoe, DEFAULT_DECK_COUNT, SHUFFLE_PENETRATION};
pub use snapshot::{CardView, RoundSnapshot};
