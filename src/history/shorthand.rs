//! Moves by two-character shorthand, and replaying a seeded game from them.
//!
//! A code names a source slot and a destination slot (`53`, `3a`, `1h`).
//! From a cascade the longest legal run that can reach the destination is
//! taken; from the foundation slot, whichever foundation top can go there.

use tracing::debug;

use crate::core::action::{ActionKind, EntryKind, HistoryMismatch, PreviousAction};
use crate::core::card::Suit;
use crate::core::config::GameConfig;
use crate::core::location::{Location, MoveCode, Slot};
use crate::core::state::GameState;
use crate::play::options::{DealOptions, TouchOptions};
use crate::rules::{can_extend_cascade, sequence_at, CardSequence, Selection};

impl GameState {
    /// Make the move a shorthand code describes, with auto-foundation
    /// under the default policy.
    ///
    /// A code that is unreadable or names no legal move is recorded as an
    /// invalid action and changes no cards.
    #[must_use]
    pub fn move_by_shorthand(&self, code: &str) -> GameState {
        self.move_by_shorthand_with(code, TouchOptions::default())
    }

    /// As `move_by_shorthand`, with the auto-foundation switch and policy
    /// taken from `options`.
    #[must_use]
    pub fn move_by_shorthand_with(&self, code: &str, options: TouchOptions) -> GameState {
        match MoveCode::parse(code) {
            Some(parsed) => self.move_by_code(parsed, options),
            None => self.with_action(invalid_shorthand(code)),
        }
    }

    pub(crate) fn move_by_code(&self, code: MoveCode, options: TouchOptions) -> GameState {
        match self.find_coded_move(code) {
            Some((sequence, destination)) => {
                debug!(%code, "shorthand move");
                self.perform_move(&sequence, destination, options)
            }
            None => self.with_action(invalid_shorthand(&code.to_string())),
        }
    }

    fn find_coded_move(&self, code: MoveCode) -> Option<(CardSequence, Location)> {
        let board = self.board();
        let origins: Vec<Location> = match code.from {
            Slot::Cascade(column) if column < board.cascade_count() => {
                let cascade = board.cascade(column);
                if cascade.is_empty() {
                    return None;
                }
                let mut start = cascade.len() - 1;
                while start > 0 && can_extend_cascade(cascade[start - 1].id(), cascade[start].id()) {
                    start -= 1;
                }
                (start..cascade.len()).map(|row| Location::Cascade(column, row)).collect()
            }
            Slot::Cascade(_) => return None,
            Slot::Cell(i) => vec![Location::Cell(i)],
            Slot::Foundation => (0..Suit::COUNT).map(Location::Foundation).collect(),
            Slot::Deck => vec![Location::Deck(0)],
        };

        origins.into_iter().find_map(|origin| {
            let Some(Selection::Movable(sequence, moves)) = sequence_at(board, origin, true) else {
                return None;
            };
            moves
                .iter()
                .find(|available| available.slot() == code.to)
                .map(|available| (sequence, available.destination))
        })
    }
}

fn invalid_shorthand(code: &str) -> PreviousAction {
    PreviousAction::new(format!("invalid move {code}"), ActionKind::Invalid)
}

/// Shuffle by `seed`, deal everything and play `codes` in order, under the
/// default auto-foundation policy.
pub(crate) fn replay_seeded(
    config: &GameConfig,
    seed: u32,
    codes: &[MoveCode],
) -> Result<GameState, HistoryMismatch> {
    let mut state = GameState::with_config(config.clone())
        .map_err(|_| HistoryMismatch::UnreadableEntry)?
        .shuffle(Some(seed))
        .deal_all(DealOptions::default());

    for &code in codes {
        let next = state.move_by_code(code, TouchOptions::default());
        if next.previous_action().kind == ActionKind::Invalid {
            return Err(HistoryMismatch::MoveListMismatch);
        }
        state = next;
    }
    Ok(state)
}

impl GameState {
    /// The seed and move codes that reproduce this game's history exactly,
    /// if there are any.
    ///
    /// Holds when the history is a shuffle, a full deal and shorthand-replayable
    /// moves under the default policy.
    pub(crate) fn seeded_moves(&self) -> Option<(u32, Vec<MoveCode>)> {
        let history = self.history();
        let first = history.front()?;
        let EntryKind::Shuffle { seed } = first.kind else {
            return None;
        };
        if history.len() < 2 {
            return None;
        }
        let codes = history
            .iter()
            .skip(2)
            .map(|entry| entry.move_code())
            .collect::<Option<Vec<_>>>()?;

        let replayed = replay_seeded(self.config(), seed, &codes).ok()?;
        (replayed.history() == history).then_some((seed, codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_five() -> GameState {
        GameState::default().shuffle(Some(5)).deal_all(DealOptions::default())
    }

    #[test]
    fn test_shorthand_move() {
        let moved = seed_five().move_by_shorthand("53");
        assert_eq!(moved.previous_action().text, "move 53 6H→7C (auto-foundation 2 AD)");
        assert_eq!(moved.history().len(), 3);
    }

    #[test]
    fn test_shorthand_to_cell() {
        // Freeing the ace of clubs sends it up, and the ace of diamonds with it.
        let state = seed_five().move_by_shorthand("8a");
        assert_eq!(
            state.previous_action().text,
            "move 8a JS→freecell (auto-foundation 82 AC AD)"
        );
        let back = state.move_by_shorthand("a8");
        assert_eq!(back.previous_action().text, "invalid move a8");
        let onto_queen = state.move_by_shorthand("a5");
        assert_eq!(onto_queen.previous_action().kind, ActionKind::Invalid);
    }

    #[test]
    fn test_bad_shorthand() {
        let state = seed_five();
        let bad = state.move_by_shorthand("58");
        assert_eq!(bad.previous_action().text, "invalid move 58");
        assert_eq!(bad.previous_action().kind, ActionKind::Invalid);
        assert_eq!(bad.cards(), state.cards());

        assert_eq!(state.move_by_shorthand("zz").previous_action().text, "invalid move zz");
        assert_eq!(state.move_by_shorthand("93").previous_action().kind, ActionKind::Invalid);
    }

    #[test]
    fn test_seeded_moves() {
        let state = seed_five().move_by_shorthand("53").move_by_shorthand("8a");
        let (seed, codes) = state.seeded_moves().unwrap();
        assert_eq!(seed, 5);
        let codes: Vec<String> = codes.iter().map(ToString::to_string).collect();
        assert_eq!(codes, vec!["53", "8a"]);

        // A deal that kept part of the deck is not replayable.
        let partial = GameState::default()
            .shuffle(Some(5))
            .deal_all(DealOptions::default().with_keep_deck(true));
        assert!(partial.seeded_moves().is_none());
    }

    #[test]
    fn test_replay_rejects_illegal_codes() {
        let config = GameConfig::default();
        let codes = [MoveCode::parse("58").unwrap()];
        assert_eq!(
            replay_seeded(&config, 5, &codes).unwrap_err(),
            HistoryMismatch::MoveListMismatch
        );
    }
}
