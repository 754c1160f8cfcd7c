//! The history log: action text, shorthand moves, undo and rebuilding a
//! history from print.
//!
//! Only card-changing actions enter the history. Each entry records the
//! card moves it made, so undo is a straight revert.

pub(crate) mod text;
pub mod shorthand;
pub mod undo;
pub(crate) mod rebuild;

pub(crate) use rebuild::rebuild_history;
pub(crate) use shorthand::replay_seeded;
