//! Pile views and card relocation.
//!
//! Card locations live on the cards themselves. This module turns them into
//! indexed piles and moves cards between piles.
//!
//! ## Key Types
//!
//! - `Board`: deck, cells, foundations and tableau rebuilt from the cards
//! - `Relocation`: a transition's working copy that records `CardMove`s

pub mod board;
pub(crate) mod relocation;

pub use board::Board;
pub(crate) use relocation::{revert, Relocation};
