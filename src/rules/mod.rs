//! FreeCell rules.
//!
//! - `legality`: pure predicates for foundations, cascades and supermove
//!   capacity, plus the auto-foundation safety policy
//! - `moves`: selections, available moves and their auto-move priorities
//!
//! Nothing here changes state; the `play` module drives transitions.

pub mod legality;
pub mod moves;

pub use legality::{
    can_extend_cascade, can_extend_foundation, foundation_can_accept, is_legal_sequence,
    max_movable_sequence_length,
};
pub use moves::{
    find_available_moves, sequence_at, AvailableMove, CardSequence, MoveKind, Selection,
    NEVER_AUTO,
};
