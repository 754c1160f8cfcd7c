//! The touch state machine.
//!
//! A touch acts at the cursor:
//!
//! 1. On the origin of the current selection: deselect.
//! 2. With a movable selection and a matching destination: move, then
//!    optionally run auto-foundation and fold both into one history entry.
//! 3. With a movable selection and no match: retry as a fresh select at the
//!    cursor; when that fails too, record an invalid move.
//! 4. Otherwise: select the run at the cursor, or record an invalid select
//!    for an empty slot.
//!
//! Selects, deselects and invalid outcomes never change cards and never
//! enter the history.

use tracing::debug;

use super::auto::{has_empty_foundation, run_auto_foundation, FoundationRun};
use super::options::TouchOptions;
use crate::core::action::{ActionKind, EntryKind, HistoryEntry, PreviousAction};
use crate::core::location::{Location, MoveCode};
use crate::core::state::GameState;
use crate::history::text::{destination_label, foundation_run_text, move_text};
use crate::rules::{sequence_at, CardSequence, Selection};
use crate::zones::Relocation;

/// A manual move applied to a working copy, not yet committed.
pub(crate) struct StagedMove {
    pub(crate) relocation: Relocation,
    pub(crate) code: MoveCode,
    pub(crate) text: String,
    pub(crate) manual: usize,
    pub(crate) kickoff_empty: bool,
}

impl GameState {
    /// Act at the cursor.
    #[must_use]
    pub fn touch(&self, options: TouchOptions) -> GameState {
        let cursor = self.cursor();

        if let Some(selection) = self.selection() {
            if selection.origin() == cursor {
                return self.deselect(selection);
            }

            if let Selection::Movable(sequence, _) = selection {
                if !options.selection_only {
                    if let Some(chosen) = selection.move_to(cursor) {
                        return self.perform_move(sequence, chosen.destination, options);
                    }
                    if !options.stop_with_invalid && !options.selection_never {
                        if let Some(retried) = self.try_select(cursor, options) {
                            return retried;
                        }
                    }
                    return self.invalid_move(sequence, cursor);
                }
            }
        }

        if options.selection_never {
            return self.with_action(invalid_select(cursor));
        }
        self.try_select(cursor, options)
            .unwrap_or_else(|| self.with_selection(None, invalid_select(cursor)))
    }

    fn try_select(&self, cursor: Location, options: TouchOptions) -> Option<GameState> {
        let selection = sequence_at(self.board(), cursor, options.allow_select_foundation)?;
        let text = format!("select {} {}", cursor, selection.sequence().tokens());
        debug!(%cursor, movable = selection.is_movable(), "select");
        Some(self.with_selection(Some(selection), PreviousAction::new(text, ActionKind::Select)))
    }

    fn deselect(&self, selection: &Selection) -> GameState {
        let text = format!("deselect {} {}", selection.origin(), selection.sequence().tokens());
        self.with_selection(None, PreviousAction::new(text, ActionKind::Deselect))
    }

    fn invalid_move(&self, sequence: &CardSequence, cursor: Location) -> GameState {
        let code = MoveCode::new(sequence.origin.slot(), cursor.slot());
        let label = destination_label(self.board(), cursor.slot());
        let text = format!("invalid {}", move_text(code, &sequence.tokens(), &label));
        debug!(%code, "invalid move");
        self.with_action(PreviousAction::new(text, ActionKind::Invalid))
    }

    /// Move `sequence` so its first card lands on `destination`.
    pub(crate) fn perform_move(
        &self,
        sequence: &CardSequence,
        destination: Location,
        options: TouchOptions,
    ) -> GameState {
        let mut staged = self.stage_move(sequence, destination);
        let run = if options.auto_foundation {
            run_auto_foundation(
                self.config(),
                &mut staged.relocation,
                options.auto_foundation_limit,
                staged.kickoff_empty,
            )
        } else {
            FoundationRun::default()
        };
        self.finish_move(staged, &run, destination)
    }

    /// Apply the manual part of a move to a working copy.
    pub(crate) fn stage_move(&self, sequence: &CardSequence, destination: Location) -> StagedMove {
        let board = self.board();
        let code = MoveCode::new(sequence.origin.slot(), destination.slot());
        let label = destination_label(board, destination.slot());
        let text = move_text(code, &sequence.tokens(), &label);

        let mut relocation = Relocation::new(self.cards());
        for (offset, card) in sequence.cards.iter().enumerate() {
            let to = match destination {
                Location::Cascade(column, row) => Location::Cascade(column, row + offset),
                other => other,
            };
            relocation.relocate(card.id(), to);
        }

        // Deck cards closing up behind a deck move are not part of it.
        let manual = relocation
            .changes()
            .iter()
            .filter(|change| sequence.ids().any(|id| id == change.card))
            .count();

        StagedMove {
            manual,
            relocation,
            code,
            text,
            kickoff_empty: has_empty_foundation(board),
        }
    }

    /// Commit a staged move plus the auto-foundation run that followed it.
    pub(crate) fn finish_move(
        &self,
        staged: StagedMove,
        run: &FoundationRun,
        destination: Location,
    ) -> GameState {
        debug!(code = %staged.code, foundation = run.steps.len(), "move");
        let (cards, changes) = staged.relocation.into_parts();
        let entry = if run.is_empty() {
            HistoryEntry::new(staged.text, EntryKind::Move { code: staged.code }, changes)
        } else {
            HistoryEntry::new(
                format!("{} ({})", staged.text, foundation_run_text(run)),
                EntryKind::MoveFoundation {
                    code: staged.code,
                    flourish: run.flourish,
                    manual: staged.manual,
                },
                changes,
            )
        };
        let action = PreviousAction::from_entry(&entry);
        self.commit_at(cards, entry, action, destination)
    }
}

fn invalid_select(cursor: Location) -> PreviousAction {
    PreviousAction::new(format!("invalid select {cursor}"), ActionKind::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::CardMove;
    use crate::play::options::DealOptions;

    fn seed_five() -> GameState {
        GameState::default().shuffle(Some(5)).deal_all(DealOptions::default())
    }

    #[test]
    fn test_select_then_deselect() {
        let state = seed_five().set_cursor(Location::Cascade(4, 5));
        let selected = state.touch(TouchOptions::default());
        assert_eq!(selected.previous_action().text, "select 5:5 6H");
        assert!(selected.selection().unwrap().is_movable());
        assert_eq!(selected.history(), state.history());

        let deselected = selected.touch(TouchOptions::default());
        assert_eq!(deselected.previous_action().text, "deselect 5:5 6H");
        assert!(deselected.selection().is_none());
    }

    #[test]
    fn test_touch_move_with_auto_foundation() {
        let state = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(2, 0));
        let moved = state.touch(TouchOptions::default());

        assert_eq!(moved.previous_action().text, "move 53 6H→7C (auto-foundation 2 AD)");
        assert_eq!(moved.cursor(), Location::Cascade(2, 7));
        assert!(moved.selection().is_none());
        assert_eq!(moved.board().foundation(1).len(), 1);

        let entry = moved.history().back().unwrap();
        assert_eq!(entry.changes.len(), 2);
        assert_eq!(entry.changes[0].from, Location::Cascade(4, 5));
        assert_eq!(entry.changes[0].to, Location::Cascade(2, 7));
        match &moved.previous_action().kind {
            ActionKind::MoveFoundation { tween_cards, flourish } => {
                assert!(!flourish);
                assert_eq!(tween_cards.len(), 1);
                assert_eq!(tween_cards[0].to_string(), "6H");
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(moved.check_invariants().is_ok());
    }

    #[test]
    fn test_deck_move_tweens_only_the_moved_card() {
        // Six full rows leave AS AH AD AC in the deck, ace of spades on top.
        let state = GameState::default().deal_all(DealOptions::default().with_keep_deck(true));
        assert_eq!(state.board().deck().len(), 4);

        let moved = state
            .set_cursor(Location::Deck(0))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cell(0))
            .touch(TouchOptions::default());
        assert!(moved
            .previous_action()
            .text
            .starts_with("move ka AS→freecell (auto-foundation"));
        assert_eq!(moved.board().deck().len(), 3);
        assert_eq!(moved.board().deck()[0].to_string(), "AH");

        let entry = moved.history().back().unwrap();
        assert!(entry.changes.len() > 2);
        let tween = entry.tween_cards();
        assert_eq!(tween.len(), 1);
        assert_eq!(tween[0].to_string(), "AS");
        assert_eq!(tween[0].location, Location::Cell(0));
        assert!(moved.check_invariants().is_ok());
    }

    #[test]
    fn test_move_without_auto_foundation() {
        let moved = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(2, 3))
            .touch(TouchOptions::default().with_auto_foundation(false));
        assert_eq!(moved.previous_action().text, "move 53 6H→7C");
        assert_eq!(moved.previous_action().kind, ActionKind::Move);
        assert_eq!(
            moved.history().back().unwrap().changes,
            vec![CardMove::new(
                crate::core::card::CardId::parse("6H").unwrap(),
                Location::Cascade(4, 5),
                Location::Cascade(2, 7),
            )]
        );
    }

    #[test]
    fn test_invalid_fallback_reselects() {
        // 6H cannot go onto JS (column 8); the touch becomes a select there.
        let state = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(7, 5));
        let retried = state.touch(TouchOptions::default());
        assert_eq!(retried.previous_action().text, "select 8:5 JS");
        assert_eq!(retried.selection().unwrap().origin(), Location::Cascade(7, 5));
    }

    #[test]
    fn test_stop_with_invalid() {
        let state = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(7, 5));
        let stopped = state.touch(TouchOptions::default().with_stop_with_invalid(true));
        assert_eq!(stopped.previous_action().text, "invalid move 58 6H→JS");
        assert_eq!(stopped.previous_action().kind, ActionKind::Invalid);
        assert_eq!(stopped.cards(), state.cards());
        assert_eq!(stopped.selection(), state.selection());
    }

    #[test]
    fn test_invalid_select_on_empty_slot() {
        let state = seed_five();
        let touched = state.touch(TouchOptions::default());
        assert_eq!(touched.previous_action().text, "invalid select a");
        assert_eq!(touched.previous_action().kind, ActionKind::Invalid);
        assert!(touched.selection().is_none());
        assert_eq!(touched.cards(), state.cards());
    }

    #[test]
    fn test_foundation_selection_needs_flag() {
        let state = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(2, 0))
            .touch(TouchOptions::default())
            .set_cursor(Location::Foundation(1));

        let refused = state.touch(TouchOptions::default());
        assert_eq!(refused.previous_action().kind, ActionKind::Invalid);

        let lifted = state.touch(TouchOptions::default().with_allow_select_foundation(true));
        assert_eq!(lifted.previous_action().text, "select h:1 AD");
    }

    #[test]
    fn test_selection_only_replaces_selection() {
        let state = seed_five()
            .set_cursor(Location::Cascade(4, 5))
            .touch(TouchOptions::default())
            .set_cursor(Location::Cascade(2, 6));
        let reselected = state.touch(TouchOptions::default().with_selection_only(true));
        assert_eq!(reselected.previous_action().text, "select 3:6 7C");
        assert_eq!(reselected.cards(), state.cards());
    }
}
