//! Automatic play: auto-foundation, auto-move and flourish detection.
//!
//! ## Auto-Foundation
//!
//! A fixed-point loop. Each pass walks the suits in foundation order; for the
//! first suit whose foundation may grow under the safety policy and whose
//! next card sits in a cell or on a cascade top, that card moves and the pass
//! restarts. The loop ends after a pass that moves nothing.
//!
//! ## Flourish
//!
//! A run is a flourish when some foundation was still empty as the action
//! began and the run finishes the game.

use tracing::{debug, trace};

use super::options::{AutoFoundationOptions, TouchOptions};
use crate::core::action::{ActionKind, EntryKind, HistoryEntry, PreviousAction};
use crate::core::card::{Card, CardId, Suit};
use crate::core::config::{FoundationLimit, GameConfig};
use crate::core::location::{Location, Slot};
use crate::core::state::GameState;
use crate::history::text::foundation_run_text;
use crate::rules::{can_extend_foundation, foundation_can_accept, Selection};
use crate::zones::{Board, Relocation};

/// Cards an auto-foundation run moved, in order, with the slots they left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FoundationRun {
    pub(crate) steps: Vec<(Slot, CardId)>,
    pub(crate) flourish: bool,
}

impl FoundationRun {
    pub(crate) fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Does any foundation have no cards?
pub(crate) fn has_empty_foundation(board: &Board) -> bool {
    (0..Suit::COUNT).any(|index| board.foundation(index).is_empty())
}

/// Run auto-foundation to a fixed point on `relocation`.
///
/// `kickoff_empty` says whether a foundation was empty when the enclosing
/// action began.
pub(crate) fn run_auto_foundation(
    config: &GameConfig,
    relocation: &mut Relocation,
    limit: FoundationLimit,
    kickoff_empty: bool,
) -> FoundationRun {
    let mut steps = Vec::new();

    'scan: loop {
        let board = Board::build(config, relocation.cards());
        for suit in Suit::ALL {
            if !foundation_can_accept(&board, suit, limit) {
                continue;
            }
            let top = board.foundation_top(suit.index()).map(|card| card.id());
            let extends = |card: &&Card| card.suit == suit && can_extend_foundation(top, card.id());

            let candidate = board
                .cells()
                .iter()
                .flatten()
                .find(extends)
                .or_else(|| board.tableau().iter().filter_map(|column| column.last()).find(extends))
                .copied();

            if let Some(card) = candidate {
                trace!(%card, from = %card.location, "auto-foundation step");
                steps.push((card.location.slot(), card.id()));
                relocation.relocate(card.id(), Location::Foundation(suit.index()));
                continue 'scan;
            }
        }
        break;
    }

    let won = Board::build(config, relocation.cards()).is_won();
    FoundationRun {
        flourish: kickoff_empty && won && !steps.is_empty(),
        steps,
    }
}

/// Replay a recorded run step by step, ignoring the safety policy.
///
/// Fails when a listed card is not in its listed slot or cannot go up next.
pub(crate) fn replay_foundation_run(
    config: &GameConfig,
    relocation: &mut Relocation,
    run: &FoundationRun,
) -> bool {
    for &(slot, id) in &run.steps {
        let Some(card) = relocation.card(id) else {
            return false;
        };
        let board = Board::build(config, relocation.cards());
        let accessible = board.accessible().any(|top| top.id() == id);
        let top = board.foundation_top(id.suit.index()).map(|c| c.id());
        if card.location.slot() != slot || !accessible || !can_extend_foundation(top, id) {
            return false;
        }
        relocation.relocate(id, Location::Foundation(id.suit.index()));
    }
    true
}

impl GameState {
    /// Move every safe card to the foundations.
    ///
    /// Without `anytime` this only acts right after a move. Does nothing
    /// when no card can go.
    #[must_use]
    pub fn auto_foundation_all(&self, options: AutoFoundationOptions) -> GameState {
        let after_move = matches!(
            self.previous_action().kind,
            ActionKind::Move | ActionKind::MoveFoundation { .. }
        );
        if !options.anytime && !after_move {
            return self.clone();
        }

        let kickoff_empty = has_empty_foundation(self.board());
        let mut relocation = Relocation::new(self.cards());
        let run = run_auto_foundation(self.config(), &mut relocation, options.limit, kickoff_empty);
        if run.is_empty() {
            return self.clone();
        }

        self.finish_auto_foundation(relocation, &run)
    }

    /// Commit a standalone auto-foundation run.
    pub(crate) fn finish_auto_foundation(&self, relocation: Relocation, run: &FoundationRun) -> GameState {
        debug!(cards = run.steps.len(), flourish = run.flourish, "auto-foundation");
        let (cards, changes) = relocation.into_parts();
        let entry = HistoryEntry::new(
            foundation_run_text(run),
            EntryKind::AutoFoundation {
                flourish: run.flourish,
            },
            changes,
        );
        let action = PreviousAction::from_entry(&entry);
        self.commit(cards, entry, action)
    }

    /// Make the best move for the card just selected.
    ///
    /// Acts only right after a select whose selection can move somewhere
    /// auto-move is allowed to pick.
    #[must_use]
    pub fn auto_move(&self, options: TouchOptions) -> GameState {
        if self.previous_action().kind != ActionKind::Select {
            return self.clone();
        }
        let Some(selection) = self.selection() else {
            return self.clone();
        };
        let Selection::Movable(sequence, _) = selection else {
            return self.clone();
        };
        let Some(best) = selection.best_move() else {
            return self.clone();
        };
        self.perform_move(sequence, best.destination, options)
    }

    /// Accessible cards whose move to a foundation would start a run that
    /// finishes the game.
    ///
    /// Empty unless some foundation is still empty.
    #[must_use]
    pub fn can_flourish(&self) -> Vec<Card> {
        let board = self.board();
        if !has_empty_foundation(board) {
            return Vec::new();
        }

        board
            .accessible()
            .filter(|card| {
                let top = board.foundation_top(card.suit.index()).map(|c| c.id());
                can_extend_foundation(top, card.id())
            })
            .filter(|card| {
                let mut relocation = Relocation::new(self.cards());
                relocation.relocate(card.id(), Location::Foundation(card.suit.index()));
                let run = run_auto_foundation(
                    self.config(),
                    &mut relocation,
                    FoundationLimit::Always,
                    true,
                );
                run.flourish
            })
            .collect()
    }
}
