//! Action records: the history log and the previous-action summary.
//!
//! ## History
//!
//! Every card-changing transition appends one `HistoryEntry`. An entry holds
//! the human-readable action text (the saved-game wire format) plus the list
//! of `CardMove` deltas it applied. Undo walks the deltas backwards; it never
//! reads the text.
//!
//! ## Previous Action
//!
//! `PreviousAction` describes the most recent transition of any kind,
//! including the ones that never reach the history (cursor motion, selection,
//! invalid touches). It is what the UI shows under the board.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use super::location::{Location, MoveCode};

/// One card's relocation within a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardMove {
    pub card: CardId,
    pub from: Location,
    pub to: Location,
}

impl CardMove {
    #[must_use]
    pub const fn new(card: CardId, from: Location, to: Location) -> Self {
        Self { card, from, to }
    }

    /// The card as it sits after the move.
    #[must_use]
    pub const fn landed(&self) -> Card {
        Card::new(self.card.rank, self.card.suit, self.to)
    }
}

/// Why a printed history could not be trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryMismatch {
    /// An entry's text could not be read or inverted.
    UnreadableEntry,
    /// Replaying the history does not reach the printed cards.
    CardMismatch,
    /// A deal number with no moves does not reach the printed cards.
    SeedMismatch,
    /// A move code in a seeded history is not legal when replayed.
    MoveListMismatch,
    /// The rebuilt game prints differently from its input.
    ReprintMismatch,
}

impl HistoryMismatch {
    pub const ALL: [HistoryMismatch; 5] = [
        HistoryMismatch::UnreadableEntry,
        HistoryMismatch::CardMismatch,
        HistoryMismatch::SeedMismatch,
        HistoryMismatch::MoveListMismatch,
        HistoryMismatch::ReprintMismatch,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            HistoryMismatch::UnreadableEntry => "unreadable entry",
            HistoryMismatch::CardMismatch => "card mismatch",
            HistoryMismatch::SeedMismatch => "seed mismatch",
            HistoryMismatch::MoveListMismatch => "move list mismatch",
            HistoryMismatch::ReprintMismatch => "reprint mismatch",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for HistoryMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a history entry did.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Shuffle {
        seed: u32,
    },
    Deal {
        keep_deck: bool,
        demo: bool,
    },
    Move {
        code: MoveCode,
    },
    /// A move followed by the auto-foundation run it triggered.
    ///
    /// The first `manual` changes are the cards moved by hand.
    MoveFoundation {
        code: MoveCode,
        flourish: bool,
        manual: usize,
    },
    AutoFoundation {
        flourish: bool,
    },
    /// Sentinel left by a parse whose history could not be rebuilt.
    InvalidHistory(HistoryMismatch),
}

/// One line of the history log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub kind: EntryKind,
    pub changes: Vec<CardMove>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: EntryKind, changes: Vec<CardMove>) -> Self {
        Self {
            text: text.into(),
            kind,
            changes,
        }
    }

    /// The degraded-history sentinel.
    #[must_use]
    pub fn invalid_history(reason: HistoryMismatch) -> Self {
        Self::new(
            format!("init with invalid history ({reason})"),
            EntryKind::InvalidHistory(reason),
            Vec::new(),
        )
    }

    /// Undo stops here.
    #[must_use]
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, EntryKind::InvalidHistory(_))
    }

    #[must_use]
    pub fn move_code(&self) -> Option<MoveCode> {
        match self.kind {
            EntryKind::Move { code } | EntryKind::MoveFoundation { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Cards moved by hand in a compound move, at their destinations.
    #[must_use]
    pub fn tween_cards(&self) -> Vec<Card> {
        match self.kind {
            EntryKind::MoveFoundation { manual, .. } => self
                .changes
                .iter()
                .take(manual)
                .map(CardMove::landed)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Kind of the most recent transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Init,
    Shuffle,
    Deal,
    Cursor,
    Select,
    Deselect,
    Move,
    MoveFoundation { tween_cards: Vec<Card>, flourish: bool },
    AutoFoundation { flourish: bool },
    Invalid,
}

impl ActionKind {
    /// Classify an action text by its leading word.
    ///
    /// Compound moves read from text carry no tween cards.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.starts_with("init") {
            ActionKind::Init
        } else if text.starts_with("shuffle") {
            ActionKind::Shuffle
        } else if text.starts_with("deal") {
            ActionKind::Deal
        } else if text.starts_with("cursor") {
            ActionKind::Cursor
        } else if text.starts_with("deselect") {
            ActionKind::Deselect
        } else if text.starts_with("select") {
            ActionKind::Select
        } else if text.starts_with("invalid") {
            ActionKind::Invalid
        } else if text.starts_with("move") {
            if text.contains(" (auto-foundation ") {
                ActionKind::MoveFoundation {
                    tween_cards: Vec::new(),
                    flourish: false,
                }
            } else if text.contains(" (flourish ") {
                ActionKind::MoveFoundation {
                    tween_cards: Vec::new(),
                    flourish: true,
                }
            } else {
                ActionKind::Move
            }
        } else if text.starts_with("auto-foundation") {
            ActionKind::AutoFoundation { flourish: false }
        } else if text.starts_with("flourish") {
            ActionKind::AutoFoundation { flourish: true }
        } else {
            ActionKind::Init
        }
    }
}

/// The most recent transition: its text and kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviousAction {
    pub text: String,
    pub kind: ActionKind,
}

impl PreviousAction {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// A freshly constructed game.
    #[must_use]
    pub fn init() -> Self {
        Self::new("init", ActionKind::Init)
    }

    /// Undo has exhausted the history.
    #[must_use]
    pub fn init_partial() -> Self {
        Self::new("init partial", ActionKind::Init)
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text, ActionKind::from_text(text))
    }

    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        let kind = match entry.kind {
            EntryKind::Shuffle { .. } => ActionKind::Shuffle,
            EntryKind::Deal { .. } => ActionKind::Deal,
            EntryKind::Move { .. } => ActionKind::Move,
            EntryKind::MoveFoundation { flourish, .. } => ActionKind::MoveFoundation {
                tween_cards: entry.tween_cards(),
                flourish,
            },
            EntryKind::AutoFoundation { flourish } => ActionKind::AutoFoundation { flourish },
            EntryKind::InvalidHistory(_) => ActionKind::Init,
        };
        Self::new(entry.text.clone(), kind)
    }
}

impl Default for PreviousAction {
    fn default() -> Self {
        Self::init()
    }
}
