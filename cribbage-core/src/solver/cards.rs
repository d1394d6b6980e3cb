use std::fmt;
use std::str::FromStr;

use rand::prelude::{Rng, SliceRandom};
use strum_macros::{Display, EnumIter};

use crate::solver::{
    cardset::CardSet,
    error::{Error, InvalidHand, Result},
};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

/// Card ranks, aces low.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Display)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
    Nine = 8,
    Ten = 9,
    Jack = 10,
    Queen = 11,
    King = 12,
}

impl Rank {
    /// What a card of this rank counts for when adding up fifteens. Tens and
    /// face cards all count 10, so this is not injective and must never be
    /// used to tell ranks apart.
    pub const fn cribbage_value(self) -> u8 {
        match self {
            Self::Ace => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }

    /// Position of this rank in a run, from Ace = 1 to King = 13. Every rank
    /// gets its own index; pairs and runs are detected on this.
    pub const fn rank_index(self) -> u8 {
        self as u8 + 1
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Convert a shorthand identifier into a card. Panics if the identifier
    /// is incorrect. This exists only for test-writing; use [`str::parse`]
    /// for anything a user typed.
    ///
    /// ```
    /// # use cribbage_core::prelude::{Card, Suit, Rank};
    /// let a = Card::from_ident("KH");
    /// let b = Card {
    ///     rank: Rank::King,
    ///     suit: Suit::Hearts,
    /// };
    /// assert_eq!(a, b);
    /// assert_eq!(Card::from_ident("10c"), Card::new(Rank::Ten, Suit::Clubs));
    /// ```
    pub fn from_ident(ident: &str) -> Self {
        match ident.parse() {
            Ok(card) => card,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Parses the notation a player would write down: the rank (`1`-`10`, `A`,
/// `T`, `J`, `Q` or `K`) followed by the first letter of the suit. Case and
/// surrounding whitespace are ignored.
impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidCard(trimmed.to_owned());

        let ident = trimmed.to_ascii_uppercase();
        let mut chars = ident.chars();
        let suit = chars.next_back().ok_or_else(invalid)?;

        let rank = match chars.as_str() {
            "1" | "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(invalid()),
        };

        let suit = match suit {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(invalid()),
        };

        Ok(Self { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[macro_export]
macro_rules! card {
    ($ident:literal) => {
        $crate::solver::cards::Card::from_ident($ident)
    };
}

pub trait CardView {
    fn view(&self) -> &[Card];
}

impl<T: CardView + ?Sized> CardView for &T {
    fn view(&self) -> &[Card] {
        (**self).view()
    }
}

impl CardView for [Card] {
    fn view(&self) -> &[Card] {
        self
    }
}

impl<const N: usize> CardView for [Card; N] {
    fn view(&self) -> &[Card] {
        self
    }
}

impl CardView for Vec<Card> {
    fn view(&self) -> &[Card] {
        self
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The 52 cards of a standard deck, built fresh on every call.
    pub fn standard() -> Self {
        Self {
            cards: CardSet::full().iter().collect(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn peek_top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw four cards as a hand. Fails with `WrongCount` when fewer than
    /// four cards remain, leaving the deck untouched.
    pub fn draw_hand(&mut self) -> Result<Hand> {
        let cards = self
            .draw_n(Hand::SIZE)
            .ok_or(InvalidHand::WrongCount(self.count()))?;
        Hand::from_slice(cards.view())
    }

    pub fn draw_n(&mut self, n: usize) -> Option<CardCollection> {
        if self.count() < n {
            None
        } else {
            let cards = self.cards.split_off(self.count() - n);
            Some(CardCollection { cards })
        }
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl CardView for Deck {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

/// The four cards a player keeps after discarding. Never includes the
/// starter.
#[derive(Clone, Debug)]
pub struct Hand {
    pub(crate) cards: heapless::Vec<Card, 4>,
}

impl Hand {
    pub const SIZE: usize = 4;

    /// Build a hand from exactly four distinct cards.
    ///
    /// ```
    /// # use cribbage_core::prelude::{Card, Error, Hand, InvalidHand};
    /// let cards: Vec<Card> = ["5H", "5S", "JD", "4C"].map(Card::from_ident).into();
    /// assert!(Hand::from_slice(&cards).is_ok());
    /// assert_eq!(
    ///     Hand::from_slice(&cards[..3]).unwrap_err(),
    ///     Error::InvalidHand(InvalidHand::WrongCount(3)),
    /// );
    /// ```
    pub fn from_slice(cards: &[Card]) -> Result<Self> {
        if cards.len() != Self::SIZE {
            return Err(InvalidHand::WrongCount(cards.len()).into());
        }
        CardSet::distinct(cards)?;

        Ok(Self {
            cards: heapless::Vec::from_slice(cards)
                .map_err(|()| InvalidHand::WrongCount(cards.len()))?,
        })
    }

    /// Convert a series of shorthand identifiers into a `Hand`.
    /// Panics if the input is incorrect. This exists only for test-writing.
    pub fn from_idents(idents: &str) -> Self {
        match Self::from_slice(CardCollection::from_idents(idents).view()) {
            Ok(hand) => hand,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

#[macro_export]
macro_rules! hand {
    ($ident:literal) => {
        $crate::solver::cards::Hand::from_idents($ident)
    };
}

/// Hands are sets; the order the cards were dealt in is irrelevant.
impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        CardSet::from(self) == CardSet::from(other)
    }
}

impl Eq for Hand {}

impl CardView for Hand {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cards(f, self.view())
    }
}

/// A hand together with its starter: the five cards that are scored.
#[derive(Clone, Debug)]
pub struct ScoredSet {
    hand: Hand,
    starter: Card,
    cards: [Card; 5],
}

impl ScoredSet {
    pub fn new(hand: &Hand, starter: Card) -> Result<Self> {
        if hand.contains(starter) {
            return Err(InvalidHand::StarterInHand(starter).into());
        }

        let held = hand.view();
        Ok(Self {
            hand: hand.clone(),
            starter,
            cards: [held[0], held[1], held[2], held[3], starter],
        })
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn starter(&self) -> Card {
        self.starter
    }
}

impl CardView for ScoredSet {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardCollection {
    cards: Vec<Card>,
}

impl CardCollection {
    pub fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Convert a series of shorthand identifiers into a `CardCollection`.
    /// Panics if the input is incorrect. This exists only for test-writing.
    ///
    /// ```
    /// # use cribbage_core::prelude::{Suit, Rank, Card, CardCollection};
    /// let cards = CardCollection::from_idents("KH 10D JS 2C");
    /// assert_eq!(cards.nth(2), Some(Card {
    ///     rank: Rank::Jack,
    ///     suit: Suit::Spades,
    /// }));
    /// ```
    pub fn from_idents(idents: &str) -> Self {
        idents.split_ascii_whitespace().map(Card::from_ident).collect()
    }

    pub fn nth(&self, n: usize) -> Option<Card> {
        self.cards.get(n).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[macro_export]
macro_rules! cards {
    ($ident:literal) => {
        $crate::solver::cards::CardCollection::from_idents($ident)
    };
}

impl From<&[Card]> for CardCollection {
    fn from(value: &[Card]) -> Self {
        Self {
            cards: Vec::from(value),
        }
    }
}

impl FromIterator<Card> for CardCollection {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl CardView for CardCollection {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for CardCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cards(f, self.view())
    }
}

fn fmt_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{card}")?;
    }
    Ok(())
}
