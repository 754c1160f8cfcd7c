//! Rebuilding a history from its printed entry texts.
//!
//! The texts run newest first. Starting from the printed cards, each entry
//! is inverted to find the cards before it, then replayed forward from there
//! to confirm it lands on the cards after it and reads the same. The replay
//! supplies the entry's card moves.
//!
//! Foundation runs are replayed from the cards they list rather than
//! recomputed, so a game played under any auto-foundation policy rebuilds.

use im::Vector;
use tracing::trace;

use super::text::ParsedAction;
use crate::core::action::{HistoryEntry, HistoryMismatch, PreviousAction};
use crate::core::card::{Card, CardId};
use crate::core::config::GameConfig;
use crate::core::location::{Location, MoveCode, Slot};
use crate::core::rng::deal_order;
use crate::core::state::GameState;
use crate::play::auto::{replay_foundation_run, FoundationRun};
use crate::play::options::DealOptions;
use crate::rules::{sequence_at, Selection};
use crate::zones::{Board, Relocation};

/// Rebuild the entries behind `cards` from their texts, newest first.
///
/// Stops at an invalid-history sentinel, which becomes the oldest entry.
pub(crate) fn rebuild_history<'a>(
    config: &GameConfig,
    cards: &Vector<Card>,
    texts: impl IntoIterator<Item = &'a str>,
) -> Result<Vector<HistoryEntry>, HistoryMismatch> {
    let mut after = cards.clone();
    let mut entries = Vec::new();

    for text in texts {
        let parsed = ParsedAction::parse(text).ok_or(HistoryMismatch::UnreadableEntry)?;
        if let ParsedAction::InvalidHistory(reason) = parsed {
            entries.push(HistoryEntry::invalid_history(reason));
            break;
        }

        let before = invert(config, &after, &parsed)?;
        let start = snapshot(config, before.clone());
        start
            .check_invariants()
            .map_err(|_| HistoryMismatch::UnreadableEntry)?;

        let replayed = replay(&start, &parsed)?;
        let entry = replayed
            .history()
            .back()
            .cloned()
            .ok_or(HistoryMismatch::UnreadableEntry)?;
        if entry.text != text || replayed.cards() != &after {
            return Err(HistoryMismatch::CardMismatch);
        }

        trace!(text, "rebuilt entry");
        entries.push(entry);
        after = before;
    }

    entries.reverse();
    Ok(entries.into_iter().collect())
}

fn snapshot(config: &GameConfig, cards: Vector<Card>) -> GameState {
    GameState::assemble(
        config.clone(),
        cards,
        Location::Cell(0),
        None,
        Vector::new(),
        PreviousAction::init(),
    )
}

// === Inversion ===

/// The cards as they were before `parsed` ran.
fn invert(
    config: &GameConfig,
    after: &Vector<Card>,
    parsed: &ParsedAction,
) -> Result<Vector<Card>, HistoryMismatch> {
    let mut relocation = Relocation::new(after);
    match parsed {
        ParsedAction::Shuffle { seed } => unshuffle(config, &mut relocation, *seed),
        ParsedAction::Deal { demo, more, .. } => undeal(config, &mut relocation, *demo, *more)?,
        ParsedAction::Move { code, cards, run } => {
            unrun(config, &mut relocation, run)?;
            unmove(config, &mut relocation, *code, cards)?;
        }
        ParsedAction::AutoFoundation(run) => unrun(config, &mut relocation, run)?,
        ParsedAction::InvalidHistory(_) => return Err(HistoryMismatch::UnreadableEntry),
    }
    Ok(relocation.into_parts().0)
}

fn unshuffle(config: &GameConfig, relocation: &mut Relocation, seed: u32) {
    let deck: Vec<Card> = Board::build(config, relocation.cards()).deck().to_vec();
    let count = deck.len();
    for (position, pool) in deal_order(seed, count).into_iter().enumerate() {
        relocation.place(deck[position].id(), Location::Deck(count - 1 - pool));
    }
}

fn undeal(
    config: &GameConfig,
    relocation: &mut Relocation,
    demo: bool,
    more: Option<usize>,
) -> Result<(), HistoryMismatch> {
    let board = Board::build(config, relocation.cards());
    let columns = board.cascade_count();
    let mut dealt: Vec<(CardId, usize)> = Vec::new();

    match more {
        Some(count) => {
            for (column, cascade) in board.tableau().iter().enumerate() {
                let share = count / columns + usize::from(column < count % columns);
                let first = cascade
                    .len()
                    .checked_sub(share)
                    .ok_or(HistoryMismatch::UnreadableEntry)?;
                for (t, card) in cascade[first..].iter().enumerate() {
                    dealt.push((card.id(), t * columns + column));
                }
            }
        }
        None => {
            let offset = if demo {
                let filled: Vec<Card> = board.cells().iter().map_while(|cell| *cell).collect();
                for (cell, card) in filled.iter().enumerate() {
                    dealt.push((card.id(), cell));
                }
                filled.len()
            } else {
                0
            };
            for (column, cascade) in board.tableau().iter().enumerate() {
                for (row, card) in cascade.iter().enumerate() {
                    dealt.push((card.id(), offset + row * columns + column));
                }
            }
        }
    }

    let count = dealt.len();
    for (index, card) in board.deck().iter().enumerate().rev() {
        relocation.place(card.id(), Location::Deck(count + index));
    }
    for (id, index) in dealt {
        relocation.place(id, Location::Deck(index));
    }
    Ok(())
}

/// Take a foundation run's cards back down, last first.
fn unrun(
    config: &GameConfig,
    relocation: &mut Relocation,
    run: &FoundationRun,
) -> Result<(), HistoryMismatch> {
    for &(slot, id) in run.steps.iter().rev() {
        let board = Board::build(config, relocation.cards());
        let on_top = board.foundation_top(id.suit.index()).map(|card| card.id()) == Some(id);
        if !on_top {
            return Err(HistoryMismatch::UnreadableEntry);
        }
        put_back(config, relocation, &board, slot, id)?;
    }
    Ok(())
}

/// Return a manual move's cards to the slot they came from, in order.
fn unmove(
    config: &GameConfig,
    relocation: &mut Relocation,
    code: MoveCode,
    cards: &[CardId],
) -> Result<(), HistoryMismatch> {
    for &id in cards {
        let board = Board::build(config, relocation.cards());
        put_back(config, relocation, &board, code.from, id)?;
    }
    Ok(())
}

fn put_back(
    config: &GameConfig,
    relocation: &mut Relocation,
    board: &Board,
    slot: Slot,
    id: CardId,
) -> Result<(), HistoryMismatch> {
    let card = relocation.card(id).ok_or(HistoryMismatch::UnreadableEntry)?;
    let in_range = match slot {
        Slot::Cell(i) => i < config.cell_count,
        Slot::Cascade(column) => column < config.cascade_count,
        Slot::Deck | Slot::Foundation => true,
    };
    if !in_range {
        return Err(HistoryMismatch::UnreadableEntry);
    }
    relocation.relocate(id, board.landing(slot, &card));
    Ok(())
}

// === Replay ===

/// Run `parsed` forward from `start`.
fn replay(start: &GameState, parsed: &ParsedAction) -> Result<GameState, HistoryMismatch> {
    match parsed {
        ParsedAction::Shuffle { seed } => Ok(start.shuffle(Some(*seed))),
        ParsedAction::Deal { keep_deck, demo, more } => {
            let options = match more {
                Some(count) => DealOptions::default().with_keep_deck(*count != start.board().deck().len()),
                None => DealOptions::default().with_keep_deck(*keep_deck).with_demo(*demo),
            };
            Ok(start.deal_all(options))
        }
        ParsedAction::Move { code, cards, run } => replay_move(start, *code, cards, run),
        ParsedAction::AutoFoundation(run) => {
            let mut relocation = Relocation::new(start.cards());
            if !replay_foundation_run(start.config(), &mut relocation, run) {
                return Err(HistoryMismatch::UnreadableEntry);
            }
            Ok(start.finish_auto_foundation(relocation, run))
        }
        ParsedAction::InvalidHistory(_) => Err(HistoryMismatch::UnreadableEntry),
    }
}

fn replay_move(
    start: &GameState,
    code: MoveCode,
    cards: &[CardId],
    run: &FoundationRun,
) -> Result<GameState, HistoryMismatch> {
    let first = cards.first().copied().ok_or(HistoryMismatch::UnreadableEntry)?;
    let origin = start.card(first).ok_or(HistoryMismatch::UnreadableEntry)?.location;
    if origin.slot() != code.from {
        return Err(HistoryMismatch::UnreadableEntry);
    }

    let Some(Selection::Movable(sequence, moves)) = sequence_at(start.board(), origin, true) else {
        return Err(HistoryMismatch::UnreadableEntry);
    };
    if !sequence.ids().eq(cards.iter().copied()) {
        return Err(HistoryMismatch::UnreadableEntry);
    }
    let chosen = moves
        .iter()
        .find(|available| available.slot() == code.to)
        .ok_or(HistoryMismatch::UnreadableEntry)?;

    let mut staged = start.stage_move(&sequence, chosen.destination);
    if !replay_foundation_run(start.config(), &mut staged.relocation, run) {
        return Err(HistoryMismatch::UnreadableEntry);
    }
    Ok(start.finish_move(staged, run, chosen.destination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FoundationLimit;
    use crate::play::options::AutoFoundationOptions;

    fn newest_first(state: &GameState) -> Vec<String> {
        state.history().iter().rev().map(|entry| entry.text.clone()).collect()
    }

    fn rebuild(state: &GameState) -> Result<Vector<HistoryEntry>, HistoryMismatch> {
        let texts = newest_first(state);
        rebuild_history(state.config(), state.cards(), texts.iter().map(String::as_str))
    }

    #[test]
    fn test_rebuild_seeded_game() {
        let state = GameState::default()
            .shuffle(Some(5))
            .deal_all(DealOptions::default())
            .move_by_shorthand("53")
            .move_by_shorthand("8a");
        assert_eq!(&rebuild(&state).unwrap(), state.history());
    }

    #[test]
    fn test_rebuild_partial_deals() {
        let state = GameState::default()
            .shuffle(Some(11))
            .deal_all(DealOptions::default().with_keep_deck(true).with_demo(true))
            .deal_all(DealOptions::default());
        assert_eq!(state.history()[1].text, "deal most cards (demo)");
        assert_eq!(state.history()[2].text, "deal 4 more cards");
        assert_eq!(&rebuild(&state).unwrap(), state.history());
    }

    #[test]
    fn test_rebuild_flourish() {
        let state = GameState::default()
            .deal_all(DealOptions::default())
            .auto_foundation_all(
                AutoFoundationOptions::default()
                    .with_anytime(true)
                    .with_limit(FoundationLimit::Always),
            );
        assert!(state.is_won());
        assert_eq!(&rebuild(&state).unwrap(), state.history());
    }

    #[test]
    fn test_rebuild_rejects_wrong_destination() {
        let state = GameState::default()
            .shuffle(Some(5))
            .deal_all(DealOptions::default())
            .move_by_shorthand("53");
        let mut texts = newest_first(&state);
        texts[0] = "move 53 6H→KS (auto-foundation 2 AD)".to_string();
        let result = rebuild_history(state.config(), state.cards(), texts.iter().map(String::as_str));
        assert_eq!(result.unwrap_err(), HistoryMismatch::CardMismatch);
    }

    #[test]
    fn test_rebuild_rejects_impossible_run() {
        // AD is not on its foundation before the move.
        let state = GameState::default()
            .shuffle(Some(5))
            .deal_all(DealOptions::default());
        let texts = ["move 53 6H→7C (auto-foundation 2 AD)", "deal all cards", "shuffle deck (5)"];
        let result = rebuild_history(state.config(), state.cards(), texts);
        assert_eq!(result.unwrap_err(), HistoryMismatch::UnreadableEntry);
    }

    #[test]
    fn test_rebuild_rejects_unknown_text() {
        let state = GameState::default();
        let result = rebuild_history(state.config(), state.cards(), ["select 5:5 6H"]);
        assert_eq!(result.unwrap_err(), HistoryMismatch::UnreadableEntry);
    }

    #[test]
    fn test_rebuild_stops_at_sentinel() {
        let state = GameState::default().deal_all(DealOptions::default());
        let texts = ["deal all cards", "init with invalid history (card mismatch)", "junk"];
        let history = rebuild_history(state.config(), state.cards(), texts).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].is_barrier());
        assert_eq!(history[1].text, "deal all cards");
    }
}
