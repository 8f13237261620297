// Public API
pub use cards::{
    compare_cards, deal, Card, Hand, HandError, InvalidCard, Suit, DECK_SIZE, HAND_SIZE,
};
pub use session::{GameError, GameOutcome, GameReport, GameSession, Pairing, Seat, Tally};

// Internal modules
mod cards;
mod session;
