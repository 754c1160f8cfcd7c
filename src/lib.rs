//! # freecell-engine
//!
//! A FreeCell rules engine: card locations, legal moves, automatic
//! foundation play, undo, shorthand replay and a text board format that
//! round-trips exactly.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: Every operation takes a `GameState` and
//!    returns a new one. Cloning is O(1) via `im-rs`.
//!
//! 2. **Cards Are the Truth**: Each card carries its own location. The
//!    `Board` view of piles is derived from the cards after every change.
//!
//! 3. **Structured History**: Each history entry records its card moves.
//!    Undo reverts them; action text is parsed only when reading a board.
//!
//! 4. **Invalid Is Not an Error**: An illegal touch is an ordinary state
//!    whose previous action is `Invalid`. Only construction and parsing fail.
//!
//! ## Modules
//!
//! - `core`: cards, locations, configuration, deal RNG, actions, state
//! - `zones`: the derived board and card relocation
//! - `rules`: legality, supermove capacity, selections and available moves
//! - `play`: shuffle, deal, cursor, touch and automatic moves
//! - `history`: shorthand moves, undo, history rebuilding
//! - `notation`: print and parse

pub mod core;
pub mod zones;
pub mod rules;
pub mod play;
pub mod history;
pub mod notation;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, Card, CardId, CardMove, Color, EngineError, EntryKind, FoundationLimit,
    GameConfig, GameState, HistoryEntry, HistoryMismatch, Location, MoveCode, ParseError,
    PreviousAction, Rank, Slot, Suit,
};

pub use crate::zones::Board;

pub use crate::rules::{AvailableMove, CardSequence, MoveKind, Selection};

pub use crate::play::{AutoFoundationOptions, DealOptions, Direction, TouchOptions, UndoOptions};

pub use crate::notation::PrintOptions;
