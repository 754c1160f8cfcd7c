//! Options for interactive transitions.

use serde::{Deserialize, Serialize};

use crate::core::config::FoundationLimit;

/// Options for `GameState::touch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchOptions {
    /// Run auto-foundation after a successful move (default: true).
    pub auto_foundation: bool,

    /// Safety policy for that auto-foundation run.
    pub auto_foundation_limit: FoundationLimit,

    /// Let a touch pick up the top card of a foundation.
    pub allow_select_foundation: bool,

    /// Record a failed move as invalid instead of retrying as a select.
    pub stop_with_invalid: bool,

    /// Only ever select; never move.
    pub selection_only: bool,

    /// Never select; a touch can only complete a move.
    pub selection_never: bool,
}

impl Default for TouchOptions {
    fn default() -> Self {
        Self {
            auto_foundation: true,
            auto_foundation_limit: FoundationLimit::default(),
            allow_select_foundation: false,
            stop_with_invalid: false,
            selection_only: false,
            selection_never: false,
        }
    }
}

impl TouchOptions {
    pub fn with_auto_foundation(mut self, enabled: bool) -> Self {
        self.auto_foundation = enabled;
        self
    }

    pub fn with_auto_foundation_limit(mut self, limit: FoundationLimit) -> Self {
        self.auto_foundation_limit = limit;
        self
    }

    pub fn with_allow_select_foundation(mut self, enabled: bool) -> Self {
        self.allow_select_foundation = enabled;
        self
    }

    pub fn with_stop_with_invalid(mut self, enabled: bool) -> Self {
        self.stop_with_invalid = enabled;
        self
    }

    pub fn with_selection_only(mut self, enabled: bool) -> Self {
        self.selection_only = enabled;
        self
    }

    pub fn with_selection_never(mut self, enabled: bool) -> Self {
        self.selection_never = enabled;
        self
    }
}

/// Options for `GameState::auto_foundation_all`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFoundationOptions {
    /// Safety policy for the run.
    pub limit: FoundationLimit,

    /// Run even when the previous action was not a move.
    pub anytime: bool,
}

impl AutoFoundationOptions {
    pub fn with_limit(mut self, limit: FoundationLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_anytime(mut self, anytime: bool) -> Self {
        self.anytime = anytime;
        self
    }
}

/// Options for `GameState::deal_all`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOptions {
    /// Fill the free cells before the cascades (empty board only).
    pub demo: bool,

    /// Deal complete rows only and leave the rest in the deck.
    pub keep_deck: bool,
}

impl DealOptions {
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    pub fn with_keep_deck(mut self, keep_deck: bool) -> Self {
        self.keep_deck = keep_deck;
        self
    }
}

/// Options for `GameState::undo`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoOptions {
    /// Put the cursor where the undone move started.
    pub cursor_to_source: bool,
}

impl UndoOptions {
    pub fn with_cursor_to_source(mut self, enabled: bool) -> Self {
        self.cursor_to_source = enabled;
        self
    }
}
