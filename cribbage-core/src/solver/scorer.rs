use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::solver::cards::{Card, CardView, Hand, Rank, ScoredSet, Suit};
use crate::solver::cardset::CardSet;
use crate::solver::error::Result;
use crate::solver::options::Options;
use crate::solver::subsets::{power_set, Subset};

/// Points earned by a hand and starter, split by scoring category.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub fifteens: u32,
    pub pairs: u32,
    pub runs: u32,
    pub flush: u32,
    pub nobs: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.fifteens + self.pairs + self.runs + self.flush + self.nobs
    }
}

pub struct Scorer<'a> {
    set: &'a ScoredSet,
    options: Options,
    // Every non-empty combination of the five cards.
    combinations: Vec<Subset<Card>>,
}

impl<'a> Scorer<'a> {
    fn new(set: &'a ScoredSet, options: Options) -> Self {
        Self {
            set,
            options,
            combinations: power_set(set.view()).collect(),
        }
    }

    /// Two points for every combination of two or more cards adding up to 15.
    fn fifteens(&self) -> u32 {
        self.combinations
            .iter()
            .filter(|cards| cards.len() >= 2)
            .filter(|cards| {
                cards
                    .iter()
                    .map(|card| u32::from(card.rank.cribbage_value()))
                    .sum::<u32>()
                    == 15
            })
            .map(|_| 2)
            .sum()
    }

    /// `n * n - n` points for each rank held `n` times: 2 for a pair, 6 for
    /// three of a kind, 12 for four.
    fn pairs(&self) -> u32 {
        let mut ranks = [0_u32; 13];

        for card in self.set.view() {
            ranks[usize::from(card.rank.rank_index() - 1)] += 1;
        }

        ranks.iter().map(|count| count * count - count).sum()
    }

    /// Only the longest runs score. A run of four is never also two runs of
    /// three, but a duplicated rank inside a run does double it.
    fn runs(&self) -> u32 {
        [5, 4, 3]
            .into_iter()
            .map(|length| self.runs_of_length(length))
            .find(|points| *points > 0)
            .unwrap_or(0)
    }

    fn runs_of_length(&self, length: u8) -> u32 {
        #[inline]
        fn is_run(cards: &[Card]) -> bool {
            let mut indices: Subset<u8> = cards.iter().map(|card| card.rank.rank_index()).collect();
            indices.sort_unstable();
            indices
                .iter()
                .tuple_windows()
                .all(|(low, high)| low + 1 == *high)
        }

        self.combinations
            .iter()
            .filter(|cards| cards.len() == usize::from(length))
            .filter(|cards| is_run(cards))
            .map(|_| u32::from(length))
            .sum()
    }

    /// Four points when every held card shares a suit, five when the starter
    /// matches too. A crib only counts the five-card flush.
    fn flush(&self) -> u32 {
        let held = CardSet::from(self.set.hand());
        let Some(suit) = Suit::iter().find(|suit| held.count_in_suit(*suit) == Hand::SIZE) else {
            return 0;
        };

        if self.set.starter().suit == suit {
            5
        } else if self.options.contains(Options::CribHand) {
            0
        } else {
            4
        }
    }

    /// One point for holding the jack of the starter's suit.
    fn nobs(&self) -> u32 {
        let starter = self.set.starter();
        let nobs = self
            .set
            .hand()
            .view()
            .iter()
            .any(|card| card.rank == Rank::Jack && card.suit == starter.suit);

        u32::from(nobs)
    }

    fn score(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            fifteens: self.fifteens(),
            pairs: self.pairs(),
            runs: self.runs(),
            flush: self.flush(),
            nobs: self.nobs(),
        }
    }

    pub fn score_set(set: &'a ScoredSet, options: Options) -> ScoreBreakdown {
        let scorer = Self::new(set, options);
        scorer.score()
    }

    /// Score `hand` with `starter`, category by category.
    pub fn breakdown(hand: &Hand, starter: Card, options: Options) -> Result<ScoreBreakdown> {
        let set = ScoredSet::new(hand, starter)?;
        Ok(Scorer::score_set(&set, options))
    }

    /// Total points for `hand` with `starter`.
    ///
    /// ```
    /// # use cribbage_core::prelude::{Card, Hand, Options, Scorer};
    /// let hand = Hand::from_idents("5H 5S 5C JD");
    /// let points = Scorer::score_hand(&hand, Card::from_ident("5D"), Options::empty());
    /// assert_eq!(points, Ok(29));
    /// ```
    pub fn score_hand(hand: &Hand, starter: Card, options: Options) -> Result<u32> {
        Ok(Self::breakdown(hand, starter, options)?.total())
    }
}
