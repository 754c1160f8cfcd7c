//! Cursor placement and motion.
//!
//! The cursor moves over the printed grid: the cell and foundation row on
//! top, the cascade rows beneath it, and the deck row at the bottom when the
//! deck holds cards. Left and right wrap within a row; up and down walk the
//! rows and wrap between the deck row and the top row.
//!
//! Cursor changes never enter the history.

use std::fmt;

use tracing::trace;

use crate::core::action::{ActionKind, PreviousAction};
use crate::core::card::Suit;
use crate::core::location::Location;
use crate::core::state::GameState;
use crate::zones::Board;

/// A cursor step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GameState {
    /// Put the cursor on `location`, clamped to an existing slot.
    #[must_use]
    pub fn set_cursor(&self, location: Location) -> GameState {
        let cursor = self.board().clamp(location);
        let text = format!("cursor set {}", describe(self.board(), cursor));
        self.with_cursor(cursor, PreviousAction::new(text, ActionKind::Cursor))
    }

    /// Step the cursor one slot in `direction`.
    #[must_use]
    pub fn move_cursor(&self, direction: Direction) -> GameState {
        let board = self.board();
        let cursor = board.clamp(step(board, self.cursor(), direction));
        trace!(%direction, %cursor, "cursor");
        let text = format!("cursor {} {}", direction, describe(board, cursor));
        self.with_cursor(cursor, PreviousAction::new(text, ActionKind::Cursor))
    }
}

/// `<location>` followed by the card there, if any.
fn describe(board: &Board, location: Location) -> String {
    match board.card_at(location) {
        Some(card) => format!("{location} {card}"),
        None => location.to_string(),
    }
}

/// Top-row slot `index`: cells first, then foundations.
fn top_slot(board: &Board, index: usize) -> Location {
    let cells = board.cell_count();
    if index < cells {
        Location::Cell(index)
    } else {
        Location::Foundation((index - cells).min(Suit::COUNT - 1))
    }
}

/// Deck location shown at printed column `slot` (top of the deck rightmost).
fn deck_slot(board: &Board, slot: usize) -> Location {
    let slots = board.deck().len().max(1);
    Location::Deck(slots - 1 - slot.min(slots - 1))
}

fn last_row(column: usize) -> Location {
    Location::Cascade(column, usize::MAX)
}

fn step(board: &Board, cursor: Location, direction: Direction) -> Location {
    let top_width = board.cell_count() + Suit::COUNT;
    let columns = board.cascade_count();
    let deck_slots = board.deck().len().max(1);
    let has_deck = !board.deck().is_empty();

    let top_index = |location: Location| match location {
        Location::Foundation(i) => board.cell_count() + i,
        other => other.index(),
    };

    match (cursor, direction) {
        (Location::Cell(_) | Location::Foundation(_), Direction::Left) => {
            top_slot(board, (top_index(cursor) + top_width - 1) % top_width)
        }
        (Location::Cell(_) | Location::Foundation(_), Direction::Right) => {
            top_slot(board, (top_index(cursor) + 1) % top_width)
        }
        (Location::Cell(_) | Location::Foundation(_), Direction::Up) => {
            let index = top_index(cursor);
            if has_deck {
                deck_slot(board, index)
            } else {
                last_row(index.min(columns - 1))
            }
        }
        (Location::Cell(_) | Location::Foundation(_), Direction::Down) => {
            Location::Cascade(top_index(cursor).min(columns - 1), 0)
        }

        (Location::Cascade(column, row), Direction::Left) => {
            Location::Cascade((column + columns - 1) % columns, row)
        }
        (Location::Cascade(column, row), Direction::Right) => {
            Location::Cascade((column + 1) % columns, row)
        }
        (Location::Cascade(column, 0), Direction::Up) => top_slot(board, column.min(top_width - 1)),
        (Location::Cascade(column, row), Direction::Up) => Location::Cascade(column, row - 1),
        (Location::Cascade(column, row), Direction::Down) => {
            if row + 1 < board.cascade(column).len() {
                Location::Cascade(column, row + 1)
            } else if has_deck {
                deck_slot(board, column)
            } else {
                top_slot(board, column.min(top_width - 1))
            }
        }

        (Location::Deck(index), _) => {
            let slot = deck_slots - 1 - index.min(deck_slots - 1);
            match direction {
                Direction::Left => deck_slot(board, (slot + deck_slots - 1) % deck_slots),
                Direction::Right => deck_slot(board, (slot + 1) % deck_slots),
                Direction::Up => last_row(slot.min(columns - 1)),
                Direction::Down => top_slot(board, slot.min(top_width - 1)),
            }
        }
    }
}
