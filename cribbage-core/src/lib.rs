//! Scoring for cribbage hands, and the expected value of every discard a
//! player could make from a fresh deal.
//!
//! ```
//! use cribbage_core::prelude::{Error, Hand, Options, Scorer};
//!
//! let hand = Hand::from_idents("4H 5S 6C KD");
//! let points = Scorer::score_hand(&hand, "1H".parse()?, Options::empty())?;
//! assert_eq!(points, 9);
//! # Ok::<(), Error>(())
//! ```

pub mod prelude;
pub mod solver;
