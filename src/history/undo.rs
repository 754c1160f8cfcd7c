//! Undo: revert the most recent history entry.
//!
//! Cursor motion, selects, deselects and invalid outcomes never reach the
//! history. Undoing one of those only drops the selection and restores the
//! previous action; the entry on top of the history stays.

use tracing::debug;

use crate::core::action::{ActionKind, PreviousAction};
use crate::core::state::GameState;
use crate::play::options::UndoOptions;
use crate::zones::revert;

impl GameState {
    /// Revert the most recent entry's card moves and drop it.
    ///
    /// Does nothing on an empty history or at an invalid-history sentinel.
    /// The selection is cleared; the previous action becomes the entry now
    /// on top of the history. Right after a touch that changed no cards,
    /// only the selection and previous action are reset.
    #[must_use]
    pub fn undo(&self, options: UndoOptions) -> GameState {
        if matches!(
            self.previous_action().kind,
            ActionKind::Cursor | ActionKind::Select | ActionKind::Deselect | ActionKind::Invalid
        ) {
            let action = self
                .history()
                .back()
                .map_or_else(PreviousAction::init, PreviousAction::from_entry);
            debug!(text = %self.previous_action().text, "undo without card changes");
            return self.with_selection(None, action);
        }

        let Some(last) = self.history().back() else {
            return self.clone();
        };
        if last.is_barrier() {
            return self.clone();
        }

        let cards = revert(self.cards(), &last.changes);
        let mut history = self.history().clone();
        history.pop_back();

        let action = history
            .back()
            .map_or_else(PreviousAction::init_partial, PreviousAction::from_entry);
        let cursor = match last.changes.first() {
            Some(change) if options.cursor_to_source => change.from,
            _ => self.cursor(),
        };

        debug!(text = %last.text, "undo");
        self.rewind(cards, history, cursor, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{ActionKind, HistoryEntry, HistoryMismatch};
    use crate::core::location::Location;
    use crate::play::options::{DealOptions, TouchOptions};

    fn seed_five() -> GameState {
        GameState::default().shuffle(Some(5)).deal_all(DealOptions::default())
    }

    #[test]
    fn test_undo_compound_move() {
        let before = seed_five();
        let after = before.move_by_shorthand("53");
        let undone = after.undo(UndoOptions::default());

        assert_eq!(undone.cards(), before.cards());
        assert_eq!(undone.board(), before.board());
        assert_eq!(undone.history(), before.history());
        assert_eq!(undone.previous_action().text, "deal all cards");
        assert!(undone.check_invariants().is_ok());
    }

    #[test]
    fn test_undo_to_source() {
        let after = seed_five().move_by_shorthand("53");
        let undone = after.undo(UndoOptions::default().with_cursor_to_source(true));
        assert_eq!(undone.cursor(), Location::Cascade(4, 5));
    }

    #[test]
    fn test_undo_everything() {
        let start = GameState::default();
        let mut state = seed_five().move_by_shorthand("53");
        for _ in 0..3 {
            state = state.undo(UndoOptions::default());
        }
        assert_eq!(state.cards(), start.cards());
        assert!(state.history().is_empty());
        assert_eq!(state.previous_action().kind, ActionKind::Init);
        assert_eq!(state.previous_action().text, "init partial");

        // Nothing left to undo.
        assert_eq!(state.undo(UndoOptions::default()), state);
    }

    #[test]
    fn test_undo_clears_selection() {
        let moved = seed_five().move_by_shorthand("53");
        let selected = moved
            .set_cursor(Location::Cascade(0, 6))
            .touch(TouchOptions::default());
        assert!(selected.selection().is_some());

        let undone = selected.undo(UndoOptions::default());
        assert!(undone.selection().is_none());
        assert_eq!(undone.cards(), moved.cards());
        assert_eq!(undone.history(), moved.history());
        assert_eq!(undone.previous_action(), moved.previous_action());
        assert_eq!(undone.cursor(), Location::Cascade(0, 6));

        // The move is next.
        let again = undone.undo(UndoOptions::default());
        assert_eq!(again.cards(), seed_five().cards());
    }

    #[test]
    fn test_undo_after_cardless_touches() {
        let moved = seed_five().move_by_shorthand("53");
        let outcomes = [
            moved.set_cursor(Location::Cell(0)),
            moved.set_cursor(Location::Cell(0)).touch(TouchOptions::default()),
            moved.move_by_shorthand("58"),
            moved
                .set_cursor(Location::Cascade(0, 6))
                .touch(TouchOptions::default())
                .touch(TouchOptions::default()),
        ];
        for outcome in outcomes {
            let undone = outcome.undo(UndoOptions::default());
            assert_eq!(undone.cards(), moved.cards());
            assert_eq!(undone.history(), moved.history());
            assert_eq!(undone.previous_action().text, "move 53 6H→7C (auto-foundation 2 AD)");
        }

        // Nothing played yet.
        let fresh = GameState::default().set_cursor(Location::Deck(0));
        let undone = fresh.undo(UndoOptions::default());
        assert_eq!(undone.previous_action(), &PreviousAction::init());
        assert_eq!(undone.cards(), fresh.cards());
    }

    #[test]
    fn test_undo_stops_at_sentinel() {
        let state = seed_five();
        let blocked = GameState::assemble(
            state.config().clone(),
            state.cards().clone(),
            state.cursor(),
            None,
            im::vector![HistoryEntry::invalid_history(HistoryMismatch::CardMismatch)],
            PreviousAction::init(),
        );
        assert_eq!(blocked.undo(UndoOptions::default()), blocked);
    }
}
