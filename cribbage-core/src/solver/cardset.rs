use static_assertions::const_assert;
use strum::IntoEnumIterator;

use super::cards::{Card, CardView, Rank, Suit};
use super::error::{InvalidHand, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CardSet(u64);

#[rustfmt::skip]
impl CardSet {
    const CLUBS_MASK:    u64 = 0x0000_0000_0000_1fff;
    const DIAMONDS_MASK: u64 = 0x0000_0000_1fff_0000;
    const HEARTS_MASK:   u64 = 0x0000_1fff_0000_0000;
    const SPADES_MASK:   u64 = 0x1fff_0000_0000_0000;

    const ALL_CARDS_MASK: u64 = Self::CLUBS_MASK | Self::DIAMONDS_MASK | Self::HEARTS_MASK | Self::SPADES_MASK;

    const MASK_TABLE: [u64; 4] = [
        Self::CLUBS_MASK,
        Self::DIAMONDS_MASK,
        Self::HEARTS_MASK,
        Self::SPADES_MASK,
    ];
}

const_assert!(CardSet::CLUBS_MASK.count_ones() == 13);
const_assert!(CardSet::DIAMONDS_MASK.count_ones() == 13);
const_assert!(CardSet::HEARTS_MASK.count_ones() == 13);
const_assert!(CardSet::SPADES_MASK.count_ones() == 13);
const_assert!(CardSet::ALL_CARDS_MASK.count_ones() == 52);

#[allow(clippy::multiple_inherent_impl)]
impl CardSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn full() -> Self {
        Self(Self::ALL_CARDS_MASK)
    }

    /// Collect the cards of `value`, failing on the first card seen twice.
    pub fn distinct(value: impl CardView) -> Result<Self> {
        let mut cardset = Self::empty();
        for card in value.view() {
            if !cardset.insert(*card) {
                return Err(InvalidHand::DuplicateCard(*card).into());
            }
        }
        Ok(cardset)
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn count_in_suit(self, suit: Suit) -> usize {
        (self.0 & Self::MASK_TABLE[suit as usize]).count_ones() as usize
    }

    /// Returns whether the card was newly inserted.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        self.0 |= Self::get_mask(card);
        fresh
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= Self::ALL_CARDS_MASK & !Self::get_mask(card);
    }

    pub fn contains(self, card: Card) -> bool {
        (self.0 & Self::get_mask(card)) > 0
    }

    /// Cards in the set, clubs first and aces low within each suit.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        Suit::iter()
            .flat_map(|suit| Rank::iter().map(move |rank| Card::new(rank, suit)))
            .filter(move |card| self.contains(*card))
    }

    #[inline]
    fn get_index(card: Card) -> usize {
        ((card.suit as u8 as usize) << 4) | (card.rank as u8 as usize)
    }

    #[inline]
    fn get_mask(card: Card) -> u64 {
        1_u64 << Self::get_index(card)
    }
}

impl<V: CardView> From<V> for CardSet {
    fn from(value: V) -> Self {
        let mut cardset = Self::empty();
        for card in value.view() {
            cardset.insert(*card);
        }
        cardset
    }
}
