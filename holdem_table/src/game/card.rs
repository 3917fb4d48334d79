//! Cards, the blank card sentinel, and the standard deck.
//!
//! Cards travel as two-character strings (`"A♠"`, `"X♦"`, ...) where ten is
//! written `X` so every card has the same width. The blank card, which stands
//! in for anything face-down or not yet dealt, is two spaces.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use super::{
    GameError,
    constants::{BOARD_SIZE, DECK_SIZE},
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Rank {
    #[default]
    Blank,
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Playable ranks in encoding order.
    pub const PLAYABLE: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Ace => 'A',
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'X',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, GameError> {
        if symbol == Self::Blank.symbol() {
            return Ok(Self::Blank);
        }
        Self::PLAYABLE
            .into_iter()
            .find(|rank| rank.symbol() == symbol)
            .ok_or(GameError::InvalidRank)
    }

    /// Zero-based position among the playable ranks.
    fn ordinal(self) -> Option<usize> {
        Self::PLAYABLE.iter().position(|rank| *rank == self)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Suit {
    #[default]
    Blank,
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    /// Playable suits in encoding order.
    pub const PLAYABLE: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Club => '♣',
            Self::Diamond => '♦',
            Self::Heart => '♥',
            Self::Spade => '♠',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, GameError> {
        if symbol == Self::Blank.symbol() {
            return Ok(Self::Blank);
        }
        Self::PLAYABLE
            .into_iter()
            .find(|suit| suit.symbol() == symbol)
            .ok_or(GameError::InvalidSuit)
    }

    fn ordinal(self) -> Option<usize> {
        Self::PLAYABLE.iter().position(|suit| *suit == self)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// Ranks and suits go over the wire as their one-character symbol.
macro_rules! symbol_serde {
    ($ty:ident, $err:expr) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_char(self.symbol())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => $ty::from_symbol(symbol).map_err(de::Error::custom),
                    _ => Err(de::Error::custom($err)),
                }
            }
        }
    };
}

symbol_serde!(Rank, GameError::InvalidRank);
symbol_serde!(Suit, GameError::InvalidSuit);

/// A playing card, or the blank card.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Two blank hole cards, as seen by anyone but the hand's owner.
pub const BLANK_HAND: [Card; 2] = [Card::BLANK; 2];

/// An empty board.
pub const BLANK_BOARD: [Card; BOARD_SIZE] = [Card::BLANK; BOARD_SIZE];

impl Card {
    pub const BLANK: Self = Self::new(Rank::Blank, Suit::Blank);

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }

    /// A card is valid when it's either fully blank or fully playable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_blank() || (self.rank != Rank::Blank && self.suit != Suit::Blank)
    }

    /// Map a canonical index in `1..=52` to its card. Every other index,
    /// including the reserved 0, maps to the blank card.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        if !(1..=DECK_SIZE as i64).contains(&index) {
            return Self::BLANK;
        }
        let i = (index - 1) as usize;
        let num_suits = Suit::PLAYABLE.len();
        Self::new(Rank::PLAYABLE[i / num_suits], Suit::PLAYABLE[i % num_suits])
    }

    /// The canonical index of this card, or 0 for the blank card (and for
    /// half-blank values that aren't valid cards).
    #[must_use]
    pub fn index(&self) -> usize {
        match (self.rank.ordinal(), self.suit.ordinal()) {
            (Some(rank), Some(suit)) => rank * Suit::PLAYABLE.len() + suit + 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank = chars
            .next()
            .ok_or(GameError::InvalidRank)
            .and_then(Rank::from_symbol)?;
        let suit = match (chars.next(), chars.next()) {
            (Some(symbol), None) => Suit::from_symbol(symbol)?,
            _ => return Err(GameError::InvalidSuit),
        };
        let card = Self::new(rank, suit);
        if card.is_valid() {
            Ok(card)
        } else if rank == Rank::Blank {
            Err(GameError::InvalidRank)
        } else {
            Err(GameError::InvalidSuit)
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// All 52 cards in canonical index order.
#[must_use]
pub fn full_deck() -> [Card; DECK_SIZE] {
    std::array::from_fn(|i| Card::from_index(i as i64 + 1))
}

/// Shuffle in place and hand the same slice back.
pub fn shuffle<'a, T, R>(items: &'a mut [T], rng: &mut R) -> &'a mut [T]
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    items
}
