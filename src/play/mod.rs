//! Interactive play: dealing, the cursor, the touch state machine and
//! automatic moves.
//!
//! Every operation here is a `GameState` method that returns a new state.
//!
//! ## Operations
//!
//! - `shuffle`, `deal_all`: set up a game
//! - `set_cursor`, `move_cursor`: place the cursor
//! - `touch`: select, deselect or move at the cursor
//! - `auto_move`, `auto_foundation_all`, `can_flourish`: automation

pub mod options;
pub mod setup;
pub mod cursor;
pub mod touch;
pub mod auto;

pub use options::{AutoFoundationOptions, DealOptions, TouchOptions, UndoOptions};
pub use cursor::Direction;
