pub mod cards;
pub(crate) mod cardset;
pub mod error;
pub mod expectation;
pub mod options;
pub mod scorer;
pub mod subsets;
