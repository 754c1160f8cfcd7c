//! The text board format.
//!
//! - `print`: render a game, optionally with its history
//! - `parse`: read one back, rebuilding the history when it is present
//!
//! For every reachable game, `parse(print(g))` with history included gives
//! back `g`.

pub mod print;
pub mod parse;

pub use print::PrintOptions;
