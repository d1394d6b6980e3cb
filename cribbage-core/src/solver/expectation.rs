use rayon::prelude::*;
use tracing::{debug, trace};

use crate::solver::cards::{Card, CardView, Hand};
use crate::solver::cardset::CardSet;
use crate::solver::error::{Error, Result};
use crate::solver::options::Options;
use crate::solver::scorer::Scorer;
use crate::solver::subsets::{discards, Subset};

/// How a hand fares over every starter that could be turned up after a
/// particular discard.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscardOutcome {
    pub discard: Subset<Card>,
    pub hand: Hand,
    /// Mean score over all candidate starters, unrounded.
    pub average: f64,
    pub min: u32,
    pub max: u32,
    pub starters: usize,
}

#[derive(Debug)]
pub struct ExpectationEngine<'a> {
    dealt: &'a [Card],
    discard_count: usize,
    starters: Vec<Card>,
    options: Options,
}

impl<'a> ExpectationEngine<'a> {
    fn new(dealt: &'a [Card], deck: &[Card], options: Options) -> Result<Self> {
        let discard_count = match dealt.len() {
            5 => 1,
            6 => 2,
            n => return Err(Error::InvalidHandSize(n)),
        };

        CardSet::distinct(dealt)?;

        // Dealt cards can never be the starter. A card the deck lists twice
        // is still one starter.
        let mut pool = CardSet::from(deck);
        for card in dealt {
            pool.remove(*card);
        }
        if pool.count() == 0 {
            return Err(Error::EmptyStarterPool);
        }
        let starters: Vec<Card> = pool.iter().collect();

        Ok(Self {
            dealt,
            discard_count,
            starters,
            options,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate_discard(&self, discard: Subset<Card>, kept: &[Card]) -> Result<DiscardOutcome> {
        let hand = Hand::from_slice(kept)?;

        let mut total = 0;
        let mut min = u32::MAX;
        let mut max = 0;
        for starter in &self.starters {
            let points = Scorer::score_hand(&hand, *starter, self.options)?;
            total += points;
            min = min.min(points);
            max = max.max(points);
        }

        let average = f64::from(total) / self.starters.len() as f64;
        trace!(?discard, average, min, max, "scored discard");

        Ok(DiscardOutcome {
            discard,
            hand,
            average,
            min,
            max,
            starters: self.starters.len(),
        })
    }

    fn evaluate(&self) -> Result<Vec<DiscardOutcome>> {
        let choices: Vec<_> = discards(self.dealt, self.discard_count).collect();

        debug!(
            dealt = self.dealt.len(),
            discards = choices.len(),
            starters = self.starters.len(),
            "evaluating discards"
        );

        if self.options.contains(Options::SingleThreaded) {
            choices
                .into_iter()
                .map(|(discard, kept)| self.evaluate_discard(discard, &kept))
                .collect()
        } else {
            choices
                .into_par_iter()
                .map(|(discard, kept)| self.evaluate_discard(discard, &kept))
                .collect()
        }
    }

    /// Average score of the kept hand for every possible discard from a five
    /// or six card deal, taken over every card of `deck` not in `dealt`.
    /// Outcomes are listed in discard order, not sorted by score.
    ///
    /// ```
    /// # use cribbage_core::prelude::{CardCollection, CardView, Deck, ExpectationEngine, Options};
    /// let dealt = CardCollection::from_idents("5H 5S 5C JD 2C 9S");
    /// let outcomes =
    ///     ExpectationEngine::evaluate_discards(&dealt, Deck::standard(), Options::empty()).unwrap();
    /// assert_eq!(outcomes.len(), 15);
    ///
    /// let best = ExpectationEngine::best(&outcomes).unwrap();
    /// assert_eq!(best.discard.as_slice(), CardCollection::from_idents("2C 9S").view());
    /// ```
    pub fn evaluate_discards(
        dealt: impl CardView,
        deck: impl CardView,
        options: Options,
    ) -> Result<Vec<DiscardOutcome>> {
        let engine = ExpectationEngine::new(dealt.view(), deck.view(), options)?;
        engine.evaluate()
    }

    /// The outcome with the highest average. Ties go to the earliest discard.
    pub fn best(outcomes: &[DiscardOutcome]) -> Option<&DiscardOutcome> {
        outcomes
            .iter()
            .reduce(|best, outcome| if outcome.average > best.average { outcome } else { best })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::solver::cards::{CardCollection, Deck};
    use crate::solver::error::InvalidHand;
    use crate::{card, cards, hand};

    fn evaluate(dealt: &str, options: Options) -> Vec<DiscardOutcome> {
        let dealt = CardCollection::from_idents(dealt);
        ExpectationEngine::evaluate_discards(&dealt, Deck::standard(), options).unwrap()
    }

    #[test]
    fn six_card_deal_test() {
        let outcomes = evaluate("5H 5S 5C JD 2C 9S", Options::empty());
        assert_eq!(outcomes.len(), 15);

        for outcome in &outcomes {
            assert_eq!(outcome.discard.len(), 2);
            assert_eq!(outcome.starters, 46);
            assert!((0.0..=29.0).contains(&outcome.average));
            assert!(f64::from(outcome.min) <= outcome.average);
            assert!(outcome.average <= f64::from(outcome.max));
        }

        let best = ExpectationEngine::best(&outcomes).unwrap();
        assert_eq!(best.hand, hand!("5H 5S 5C JD"));
        assert_relative_eq!(best.average, 766.0 / 46.0);
        assert_eq!((best.min, best.max), (14, 29));

        let first = &outcomes[0];
        assert_eq!(first.discard.as_slice(), cards!("5H 5S").view());
        assert_relative_eq!(first.average, 208.0 / 46.0);
    }

    #[test]
    fn five_card_deal_test() {
        let outcomes = evaluate("5H 5S 5C JD 2C", Options::empty());
        assert_eq!(outcomes.len(), 5);

        for outcome in &outcomes {
            assert_eq!(outcome.discard.len(), 1);
            assert_eq!(outcome.starters, 47);
            assert!((0.0..=29.0).contains(&outcome.average));
        }

        let best = ExpectationEngine::best(&outcomes).unwrap();
        assert_eq!(best.discard.as_slice(), [card!("2C")]);
        assert_relative_eq!(best.average, 780.0 / 47.0);
    }

    #[test]
    fn threading_does_not_change_results_test() {
        let dealt = "2C 4D 6H 8S TC QD";
        let parallel = evaluate(dealt, Options::empty());
        let sequential = evaluate(dealt, Options::SingleThreaded);
        assert_eq!(parallel, sequential);

        // Discarding the ten and queen keeps the most.
        let best = ExpectationEngine::best(&parallel).unwrap();
        assert_eq!(best.discard.as_slice(), cards!("TC QD").view());
        assert_relative_eq!(best.average, 140.0 / 46.0);
    }

    #[test]
    fn crib_rule_test() {
        let dealt = "6C 7C 8C 9C KD QD";
        let hand = evaluate(dealt, Options::empty());
        let crib = evaluate(dealt, Options::CribHand);
        // Keeping the four clubs loses the four-card flush in a crib.
        let keep_clubs = |outcomes: &[DiscardOutcome]| {
            outcomes
                .iter()
                .find(|outcome| outcome.hand == hand!("6C 7C 8C 9C"))
                .map(|outcome| outcome.average)
                .unwrap()
        };
        assert!(keep_clubs(&hand) > keep_clubs(&crib));
    }

    #[test]
    fn deck_without_dealt_cards_test() {
        let dealt = cards!("5H 5S 5C JD 2C 9S");
        let deck: Vec<Card> = Deck::standard()
            .view()
            .iter()
            .copied()
            .filter(|card| !dealt.view().contains(card))
            .collect();

        let trimmed = ExpectationEngine::evaluate_discards(&dealt, &deck, Options::empty()).unwrap();
        let full = ExpectationEngine::evaluate_discards(&dealt, Deck::standard(), Options::empty()).unwrap();
        assert_eq!(trimmed, full);
    }

    #[test]
    fn repeated_deck_cards_count_once_test() {
        let dealt = cards!("5H 5S 5C JD 2C 9S");
        let deck = [Deck::standard().view(), Deck::standard().view()].concat();

        let doubled = ExpectationEngine::evaluate_discards(&dealt, &deck, Options::empty()).unwrap();
        let single = ExpectationEngine::evaluate_discards(&dealt, Deck::standard(), Options::empty()).unwrap();
        assert_eq!(doubled, single);
        assert!(doubled.iter().all(|outcome| outcome.starters == 46));
    }

    #[test]
    fn invalid_deal_test() {
        for dealt in ["5H 5S 5C JD", "5H 5S 5C JD 2C 9S 9D", ""] {
            let dealt = CardCollection::from_idents(dealt);
            assert_eq!(
                ExpectationEngine::evaluate_discards(&dealt, Deck::standard(), Options::empty()),
                Err(Error::InvalidHandSize(dealt.len()))
            );
        }

        assert_eq!(
            ExpectationEngine::evaluate_discards(
                cards!("5H 5S 5C JD 5H"),
                Deck::standard(),
                Options::empty()
            ),
            Err(Error::InvalidHand(InvalidHand::DuplicateCard(card!("5H"))))
        );
    }

    #[test]
    fn empty_starter_pool_test() {
        let dealt = cards!("5H 5S 5C JD 2C");
        assert_eq!(
            ExpectationEngine::evaluate_discards(&dealt, &dealt, Options::empty()),
            Err(Error::EmptyStarterPool)
        );
    }

    #[test]
    fn best_of_nothing_test() {
        assert_eq!(ExpectationEngine::best(&[]), None);
    }
}
