pub use crate::solver::cards::{Card, CardCollection, CardView, Deck, Hand, Rank, ScoredSet, Suit};
pub use crate::solver::error::{Error, InvalidHand, Result};
pub use crate::solver::expectation::{DiscardOutcome, ExpectationEngine};
pub use crate::solver::options::Options;
pub use crate::solver::scorer::{ScoreBreakdown, Scorer};
pub use crate::solver::subsets::{discards, pairs, power_set, Subset};
