//! Derived board views: deck, cells, foundations and tableau.
//!
//! `GameState::cards` is the single source of truth. A `Board` is rebuilt
//! from it after every transition so rules code can index piles directly.
//! Cards whose location falls outside the configured fixtures are left out
//! of the view; `GameState::check_invariants` reports them.

use smallvec::SmallVec;

use crate::core::card::{Card, Suit};
use crate::core::config::GameConfig;
use crate::core::location::{Location, Slot};

/// Indexed view of every pile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    /// Index 0 is the top of the deck.
    deck: Vec<Card>,
    cells: SmallVec<[Option<Card>; 6]>,
    /// One pile per suit, ace first.
    foundations: [SmallVec<[Card; 13]>; 4],
    /// One column per cascade, first dealt card first.
    tableau: Vec<Vec<Card>>,
}

impl Board {
    /// Build the view from located cards.
    #[must_use]
    pub fn build<'a>(config: &GameConfig, cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut board = Self {
            deck: Vec::new(),
            cells: SmallVec::from_elem(None, config.cell_count),
            foundations: Default::default(),
            tableau: vec![Vec::new(); config.cascade_count],
        };

        for card in cards {
            match card.location {
                Location::Deck(_) => board.deck.push(*card),
                Location::Cell(i) => {
                    if let Some(cell) = board.cells.get_mut(i) {
                        *cell = Some(*card);
                    }
                }
                Location::Foundation(i) => {
                    if let Some(pile) = board.foundations.get_mut(i) {
                        pile.push(*card);
                    }
                }
                Location::Cascade(column, _) => {
                    if let Some(cascade) = board.tableau.get_mut(column) {
                        cascade.push(*card);
                    }
                }
            }
        }

        board.deck.sort_by_key(|card| card.location);
        for pile in &mut board.foundations {
            pile.sort_by_key(|card| card.rank);
        }
        for cascade in &mut board.tableau {
            cascade.sort_by_key(|card| card.location);
        }

        board
    }

    // === Piles ===

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Card>] {
        &self.cells
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> &[Card] {
        self.foundations.get(index).map(|pile| pile.as_slice()).unwrap_or(&[])
    }

    #[must_use]
    pub fn foundation_for(&self, suit: Suit) -> &[Card] {
        self.foundation(suit.index())
    }

    #[must_use]
    pub fn cascade(&self, column: usize) -> &[Card] {
        self.tableau.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn tableau(&self) -> &[Vec<Card>] {
        &self.tableau
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cascade_count(&self) -> usize {
        self.tableau.len()
    }

    // === Tops ===

    #[must_use]
    pub fn foundation_top(&self, index: usize) -> Option<Card> {
        self.foundation(index).last().copied()
    }

    #[must_use]
    pub fn cascade_top(&self, column: usize) -> Option<Card> {
        self.cascade(column).last().copied()
    }

    /// The card a move out of `slot` would take, if it is a single card.
    #[must_use]
    pub fn slot_top(&self, slot: Slot) -> Option<Card> {
        match slot {
            Slot::Deck => self.deck.first().copied(),
            Slot::Cell(i) => self.cells.get(i).copied().flatten(),
            Slot::Foundation => None,
            Slot::Cascade(column) => self.cascade_top(column),
        }
    }

    /// Where `card` lands when placed on `slot`.
    #[must_use]
    pub fn landing(&self, slot: Slot, card: &Card) -> Location {
        match slot {
            Slot::Deck => Location::Deck(0),
            Slot::Cell(i) => Location::Cell(i),
            Slot::Foundation => Location::Foundation(card.suit.index()),
            Slot::Cascade(column) => Location::Cascade(column, self.cascade(column).len()),
        }
    }

    /// The card at a location. A foundation location answers its top card.
    #[must_use]
    pub fn card_at(&self, location: Location) -> Option<Card> {
        match location {
            Location::Deck(i) => self.deck.get(i).copied(),
            Location::Cell(i) => self.cells.get(i).copied().flatten(),
            Location::Foundation(i) => self.foundation_top(i),
            Location::Cascade(column, row) => self.cascade(column).get(row).copied(),
        }
    }

    /// Cards a player can pick up singly: cells, then cascade tops.
    pub fn accessible(&self) -> impl Iterator<Item = Card> + '_ {
        self.cells
            .iter()
            .flatten()
            .copied()
            .chain(self.tableau.iter().filter_map(|cascade| cascade.last().copied()))
    }

    // === Counts ===

    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    #[must_use]
    pub fn empty_cascade_count(&self) -> usize {
        self.tableau.iter().filter(|cascade| cascade.is_empty()).count()
    }

    /// No cards in cells or cascades.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none) && self.tableau.iter().all(Vec::is_empty)
    }

    /// Every card is on a foundation.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.deck.is_empty() && self.is_clear()
    }

    /// Rows needed to print the tableau.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tableau.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }

    /// Nearest existing slot to `location`.
    ///
    /// Empty cascades and an empty deck still offer their first slot.
    #[must_use]
    pub fn clamp(&self, location: Location) -> Location {
        fn last(len: usize) -> usize {
            len.saturating_sub(1)
        }

        match location {
            Location::Deck(i) => Location::Deck(i.min(last(self.deck.len()))),
            Location::Cell(i) => Location::Cell(i.min(last(self.cells.len()))),
            Location::Foundation(i) => Location::Foundation(i.min(Suit::COUNT - 1)),
            Location::Cascade(column, row) => {
                let column = column.min(last(self.tableau.len()));
                Location::Cascade(column, row.min(last(self.cascade(column).len())))
            }
        }
    }
}
