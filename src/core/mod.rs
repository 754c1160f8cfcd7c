//! Core engine types: cards, locations, configuration, RNG, actions, state.
//!
//! Everything else in the crate is built from these. Transitions live in
//! `play`, `history` and `notation` as further `impl GameState` blocks.

pub mod card;
pub mod location;
pub mod error;
pub mod config;
pub mod rng;
pub mod action;
pub mod state;

pub use card::{Card, CardId, Color, Rank, Suit};
pub use location::{Fixture, Location, MoveCode, Slot};
pub use error::{EngineError, ParseError};
pub use config::{FoundationLimit, GameConfig};
pub use rng::{deal_order, DealRng, SeedPicker};
pub use action::{ActionKind, CardMove, EntryKind, HistoryEntry, HistoryMismatch, PreviousAction};
pub use state::GameState;
