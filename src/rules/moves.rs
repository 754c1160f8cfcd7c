//! Selections and their available moves.
//!
//! A `Selection` is the run of cards picked up at one location. It is either
//! a `Peek` (shown, but with nowhere to go) or `Movable` together with every
//! legal destination, so a selection and its moves can never disagree.
//!
//! ## Priorities
//!
//! Auto-move picks the destination with the highest priority, first
//! enumerated on ties. Enumeration order is cells, foundation, cascades.
//!
//! | destination        | priority          |
//! |--------------------|-------------------|
//! | foundation         | 1000              |
//! | cascade, on a card | 800 - column      |
//! | free cell          | 600 - cell        |
//! | empty cascade      | 400 - column      |
//!
//! Cell-to-cell moves and moving a whole column to an empty cascade are legal
//! but get `NEVER_AUTO`.

use smallvec::SmallVec;

use super::legality::{
    can_extend_cascade, can_extend_foundation, is_legal_sequence, max_movable_sequence_length,
};
use crate::core::card::{Card, CardId};
use crate::core::location::{Fixture, Location, Slot};
use crate::zones::Board;

/// Priority of a legal move that auto-move never picks.
pub const NEVER_AUTO: i32 = -1;

const FOUNDATION_PRIORITY: i32 = 1000;
const SEQUENCE_PRIORITY: i32 = 800;
const CELL_PRIORITY: i32 = 600;
const EMPTY_CASCADE_PRIORITY: i32 = 400;

/// A run of cards starting at `origin`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardSequence {
    pub origin: Location,
    pub cards: SmallVec<[Card; 13]>,
}

impl CardSequence {
    #[must_use]
    pub fn new(origin: Location, cards: &[Card]) -> Self {
        Self {
            origin,
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(Card::id)
    }

    /// Card tokens joined by `-`, as written in action texts.
    #[must_use]
    pub fn tokens(&self) -> String {
        join_tokens(self.ids())
    }
}

/// Card tokens joined by `-`.
pub(crate) fn join_tokens(ids: impl Iterator<Item = CardId>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join("-")
}

/// How a move lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Cell,
    Foundation,
    CascadeEmpty,
    CascadeSequence,
}

/// One legal destination for a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AvailableMove {
    /// Where the first card of the run lands.
    pub destination: Location,
    pub kind: MoveKind,
    pub priority: i32,
}

impl AvailableMove {
    /// Does a touch at `cursor` pick this move?
    ///
    /// Any foundation picks a foundation move; any row of the destination
    /// column picks a cascade move.
    #[must_use]
    pub fn matches(&self, cursor: Location) -> bool {
        match (self.destination, cursor) {
            (Location::Cell(a), Location::Cell(b)) => a == b,
            (Location::Foundation(_), Location::Foundation(_)) => true,
            (Location::Cascade(a, _), Location::Cascade(b, _)) => a == b,
            _ => false,
        }
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        self.destination.slot()
    }
}

/// The current selection, with its moves when it has any.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    Peek(CardSequence),
    Movable(CardSequence, SmallVec<[AvailableMove; 8]>),
}

impl Selection {
    #[must_use]
    pub fn sequence(&self) -> &CardSequence {
        match self {
            Selection::Peek(sequence) | Selection::Movable(sequence, _) => sequence,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Location {
        self.sequence().origin
    }

    #[must_use]
    pub fn moves(&self) -> &[AvailableMove] {
        match self {
            Selection::Peek(_) => &[],
            Selection::Movable(_, moves) => moves,
        }
    }

    #[must_use]
    pub fn is_movable(&self) -> bool {
        matches!(self, Selection::Movable(..))
    }

    /// The move a touch at `cursor` would make.
    #[must_use]
    pub fn move_to(&self, cursor: Location) -> Option<AvailableMove> {
        self.moves().iter().copied().find(|m| m.matches(cursor))
    }

    /// Highest-priority move auto-move may take.
    #[must_use]
    pub fn best_move(&self) -> Option<AvailableMove> {
        let mut best: Option<AvailableMove> = None;
        for candidate in self.moves().iter().filter(|m| m.priority > NEVER_AUTO) {
            if best.map_or(true, |b| candidate.priority > b.priority) {
                best = Some(*candidate);
            }
        }
        best
    }
}

/// Every legal destination for `sequence`.
#[must_use]
pub fn find_available_moves(board: &Board, sequence: &CardSequence) -> SmallVec<[AvailableMove; 8]> {
    let mut moves = SmallVec::new();
    let Some(first) = sequence.cards.first() else {
        return moves;
    };
    let origin = sequence.origin;
    let len = sequence.len();

    if len == 1 {
        for (i, cell) in board.cells().iter().enumerate() {
            if cell.is_some() {
                continue;
            }
            let priority = if origin.fixture() == Fixture::Cell {
                NEVER_AUTO
            } else {
                CELL_PRIORITY - i as i32
            };
            moves.push(AvailableMove {
                destination: Location::Cell(i),
                kind: MoveKind::Cell,
                priority,
            });
        }

        let pile = first.suit.index();
        if origin.fixture() != Fixture::Foundation
            && can_extend_foundation(board.foundation_top(pile).map(|c| c.id()), first.id())
        {
            moves.push(AvailableMove {
                destination: Location::Foundation(pile),
                kind: MoveKind::Foundation,
                priority: FOUNDATION_PRIORITY,
            });
        }
    }

    for column in 0..board.cascade_count() {
        if origin.slot() == Slot::Cascade(column) {
            continue;
        }
        let destination = Location::Cascade(column, board.cascade(column).len());

        match board.cascade_top(column) {
            Some(top) => {
                if can_extend_cascade(top.id(), first.id())
                    && len <= max_movable_sequence_length(board, false)
                {
                    moves.push(AvailableMove {
                        destination,
                        kind: MoveKind::CascadeSequence,
                        priority: SEQUENCE_PRIORITY - column as i32,
                    });
                }
            }
            None => {
                if len <= max_movable_sequence_length(board, true) {
                    let whole_column = matches!(origin, Location::Cascade(_, 0));
                    moves.push(AvailableMove {
                        destination,
                        kind: MoveKind::CascadeEmpty,
                        priority: if whole_column {
                            NEVER_AUTO
                        } else {
                            EMPTY_CASCADE_PRIORITY - column as i32
                        },
                    });
                }
            }
        }
    }

    moves
}

/// The selection a touch at `location` would make.
///
/// Deck cards other than the top one, and runs that are not legal
/// sequences, can only be peeked at. Foundations are selectable only when
/// `allow_foundation` is set.
#[must_use]
pub fn sequence_at(board: &Board, location: Location, allow_foundation: bool) -> Option<Selection> {
    let (cards, may_move): (SmallVec<[Card; 13]>, bool) = match location {
        Location::Deck(i) => (board.deck().get(i).copied().into_iter().collect(), i == 0),
        Location::Cell(_) => (board.card_at(location).into_iter().collect(), true),
        Location::Foundation(i) => {
            if !allow_foundation {
                return None;
            }
            (board.foundation_top(i).into_iter().collect(), true)
        }
        Location::Cascade(column, row) => {
            let run = board.cascade(column).get(row..).unwrap_or(&[]);
            (SmallVec::from_slice(run), is_legal_sequence(run))
        }
    };

    if cards.is_empty() {
        return None;
    }

    let sequence = CardSequence {
        origin: location,
        cards,
    };
    if may_move {
        let moves = find_available_moves(board, &sequence);
        if !moves.is_empty() {
            return Some(Selection::Movable(sequence, moves));
        }
    }
    Some(Selection::Peek(sequence))
}
