//! Card locations and the shorthand addressing scheme.
//!
//! A `Location` names one slot on the board: a deck position, a free cell, a
//! foundation pile, or a cascade row. A `Slot` is the coarser address used by
//! move codes and saved games: it names a pile but not a row.
//!
//! ## Shorthand
//!
//! | fixture    | shorthand            |
//! |------------|----------------------|
//! | cell       | `a` .. `f`           |
//! | foundation | `h`                  |
//! | cascade    | `1` .. `9`, `0`      |
//! | deck       | `k`                  |
//!
//! The single-digit cascade addressing is why at most 10 cascades exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a card sits.
///
/// - `Deck(0)` is the top of the deck, the next card to deal.
/// - `Foundation(i)` is the pile for `Suit::ALL[i]`.
/// - `Cascade(column, row)` counts rows from the first dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Deck(usize),
    Cell(usize),
    Foundation(usize),
    Cascade(usize, usize),
}

impl Location {
    #[must_use]
    pub const fn fixture(self) -> Fixture {
        match self {
            Location::Deck(_) => Fixture::Deck,
            Location::Cell(_) => Fixture::Cell,
            Location::Foundation(_) => Fixture::Foundation,
            Location::Cascade(..) => Fixture::Cascade,
        }
    }

    /// The pile this location belongs to.
    #[must_use]
    pub const fn slot(self) -> Slot {
        match self {
            Location::Deck(_) => Slot::Deck,
            Location::Cell(i) => Slot::Cell(i),
            Location::Foundation(_) => Slot::Foundation,
            Location::Cascade(column, _) => Slot::Cascade(column),
        }
    }

    #[must_use]
    pub fn shorthand(self) -> char {
        self.slot().to_char()
    }

    /// Position within the fixture: deck index, cell, foundation or column.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Location::Deck(i) | Location::Cell(i) | Location::Foundation(i) => i,
            Location::Cascade(column, _) => column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cascade(_, row) => write!(f, "{}:{}", self.shorthand(), row),
            Location::Foundation(i) | Location::Deck(i) => write!(f, "{}:{}", self.shorthand(), i),
            Location::Cell(_) => write!(f, "{}", self.shorthand()),
        }
    }
}

/// The four pile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fixture {
    Deck,
    Cell,
    Foundation,
    Cascade,
}

/// A pile address without a row, as written in move codes.
///
/// Foundations are addressed as one slot: the suit of the moving card picks
/// the pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Deck,
    Cell(usize),
    Foundation,
    Cascade(usize),
}

impl Slot {
    /// Highest cell count addressable by shorthand.
    pub const MAX_CELLS: usize = 6;

    /// Highest cascade count addressable by shorthand.
    pub const MAX_CASCADES: usize = 10;

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Slot::Deck => 'k',
            Slot::Foundation => 'h',
            Slot::Cell(i) => char::from(b'a' + i as u8),
            Slot::Cascade(column) => char::from(b'0' + ((column + 1) % 10) as u8),
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'k' => Some(Slot::Deck),
            'h' => Some(Slot::Foundation),
            'a'..='f' => Some(Slot::Cell(c as usize - 'a' as usize)),
            '1'..='9' => Some(Slot::Cascade(c as usize - '1' as usize)),
            '0' => Some(Slot::Cascade(9)),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A two-character move code such as `53`, `3a` or `ah`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCode {
    pub from: Slot,
    pub to: Slot,
}

impl MoveCode {
    #[must_use]
    pub const fn new(from: Slot, to: Slot) -> Self {
        Self { from, to }
    }

    /// Parse exactly two shorthand characters.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let from = Slot::from_char(chars.next()?)?;
        let to = Slot::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(from, to))
    }
}

impl fmt::Display for MoveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
