use thiserror::Error;

use crate::solver::cards::Card;

/// Why a set of cards cannot be scored as a hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidHand {
    #[error("a hand must hold exactly 4 cards, found {0}")]
    WrongCount(usize),
    #[error("{0} appears more than once")]
    DuplicateCard(Card),
    #[error("the starter ({0}) is already in the hand")]
    StarterInHand(Card),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] InvalidHand),
    #[error("a dealt hand must have 5 or 6 cards, found {0}")]
    InvalidHandSize(usize),
    #[error("no starter cards remain once the dealt cards are set aside")]
    EmptyStarterPool,
    #[error("'{0}' is not a card; expected a rank (1-10, A, T, J, Q, K) followed by a suit (C, D, H, S)")]
    InvalidCard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
