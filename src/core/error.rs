//! Engine and parser errors.
//!
//! Construction and parsing failures are fatal and surface as `Result`s.
//! An illegal move is not an error: it is an ordinary transition recorded as
//! `ActionKind::Invalid`.

use thiserror::Error;

use super::card::CardId;

/// Construction and invariant errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell count {0} is outside 1..=6")]
    CellCount(usize),

    #[error("cascade count {0} is outside 4..=10")]
    CascadeCount(usize),

    #[error("unknown auto-foundation limit {0:?}")]
    UnknownLimit(String),

    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),

    #[error("card {0} is missing")]
    MissingCard(CardId),

    #[error("card {card} has an out-of-range location")]
    LocationOutOfRange { card: CardId },

    #[error("{0} holds more than one card in the same slot")]
    SlotConflict(String),

    #[error("{0} is not contiguous")]
    Gap(String),

    #[error("foundation {0} is not an ascending run from ace")]
    FoundationOrder(usize),

    #[error("selection does not match the board")]
    StaleSelection,
}

/// Failures reading a printed board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no board to parse")]
    MissingBoard,

    #[error("line {line}: width {width} is not a whole number of slots")]
    MalformedLine { line: usize, width: usize },

    #[error("line {line}: width {width} does not match the cascade rows above")]
    RaggedRows { line: usize, width: usize },

    #[error("line {line}: {count} cells is outside 1..=6")]
    CellCount { line: usize, count: usize },

    #[error("line {line}: {count} cascades is outside 4..=10")]
    CascadeCount { line: usize, count: usize },

    #[error("line {line}, column {column}: unknown token {token:?}")]
    UnknownToken { line: usize, column: usize, token: String },

    #[error("line {line}, column {column}: unknown separator {separator:?}")]
    UnknownSeparator { line: usize, column: usize, separator: char },

    #[error("line {line}: card {card} has no remaining match in the deck")]
    NoMatchingCard { line: usize, card: CardId },

    #[error("line {line}: {card} cannot sit on foundation {foundation}")]
    FoundationSuit { line: usize, foundation: usize, card: CardId },

    #[error("line {line}: cascade {column} has a gap")]
    ColumnGap { line: usize, column: usize },

    #[error("{0} cards are missing from the board")]
    MissingCards(usize),

    #[error("more than one cursor marker")]
    MultipleCursors,

    #[error("selection markers do not describe a selection: {0}")]
    MalformedSelection(String),

    #[error("line {line}: unexpected text after the board")]
    TrailingText { line: usize },

    #[error(transparent)]
    Config(#[from] EngineError),
}
