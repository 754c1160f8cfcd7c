//! Cards: rank, suit, color, identity and the located card.
//!
//! A `CardId` is the value identity of a card, its (rank, suit) pair. Exactly
//! one card exists per `CardId` in a game. A `Card` is that identity plus its
//! current `Location`.
//!
//! ## Canonical Order
//!
//! `CardId` orders by rank first, then suit (clubs, diamonds, hearts,
//! spades). This is the classic deal-number deck order: `AC AD AH AS 2C ...`.
//! `GameState` keeps its card list in this order at all times.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::Location;

/// Card rank, ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
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
    /// All ranks, ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, 1 for ace through 13 for king.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value in `1..=13`.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        let index = usize::from(value.checked_sub(1)?);
        Self::ALL.get(index).copied()
    }

    /// The rank one above, `None` for king.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_value(self.value() + 1)
    }

    /// The rank one below, `None` for ace.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        Self::from_value(self.value() - 1)
    }

    /// Single-character token (`A23456789TJQK`).
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Parse a single-character token.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|rank| rank.to_char() == c)
    }
}

/// Card color. Cascades alternate colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card suit. Declaration order is the foundation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in foundation order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Number of suits, and therefore of foundations.
    pub const COUNT: usize = 4;

    /// Foundation index for this suit.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suit for a foundation index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    /// Single-character token (`CDHS`).
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    /// Parse a single-character token.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|suit| suit.to_char() == c)
    }

    /// Suits of the other color.
    pub fn opposites(self) -> impl Iterator<Item = Suit> {
        Self::ALL.into_iter().filter(move |s| s.color() != self.color())
    }
}

/// Value identity of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardId {
    /// Number of cards in a full deck.
    pub const DECK_SIZE: usize = 52;

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Position in the canonical deck order.
    #[must_use]
    pub const fn canonical_index(self) -> usize {
        (self.rank.value() as usize - 1) * Suit::COUNT + self.suit.index()
    }

    /// Every card of a full deck, in canonical order.
    pub fn all() -> impl Iterator<Item = CardId> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| CardId::new(rank, suit)))
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Parse a two-character token such as `6H` or `TD`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let rank = Rank::from_char(chars.next()?)?;
        let suit = Suit::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(rank, suit))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// A card and where it currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub location: Location,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit, location: Location) -> Self {
        Self { rank, suit, location }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        CardId::new(self.rank, self.suit)
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// The same card at another location.
    #[must_use]
    pub const fn at(self, location: Location) -> Self {
        Self { location, ..self }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id().fmt(f)
    }
}
