//! Property tests over random play.
//!
//! Random shorthand codes drive seeded games. Most codes are illegal on any
//! given board; those become `Invalid` outcomes and must leave the cards
//! alone. The legal ones exercise moves, supermoves and auto-foundation.
//!
//! Properties covered:
//! - Every state keeps all 52 cards in consistent, gap-free piles.
//! - Foundations never shrink under play that does not lift from them.
//! - Any seed deals a permutation of the deck into any valid layout.
//! - Undo reverses each recorded entry exactly.
//! - Undo right after any touch restores the cards from before it.
//! - Printing with history and parsing back yields the same state.

use proptest::prelude::*;

use freecell_engine::{
    ActionKind, DealOptions, GameState, Location, PrintOptions, TouchOptions, UndoOptions,
};

/// Shorthand slots for the default four-cell, eight-cascade layout.
const SLOTS: &[u8] = b"abcd12345678h";

fn code_strategy() -> impl Strategy<Value = String> {
    (0..SLOTS.len(), 0..SLOTS.len())
        .prop_map(|(from, to)| format!("{}{}", SLOTS[from] as char, SLOTS[to] as char))
}

/// Codes whose source is never a foundation.
fn forward_code_strategy() -> impl Strategy<Value = String> {
    let sources = SLOTS.len() - 1;
    (0..sources, 0..SLOTS.len())
        .prop_map(|(from, to)| format!("{}{}", SLOTS[from] as char, SLOTS[to] as char))
}

fn location_strategy() -> impl Strategy<Value = Location> {
    prop_oneof![
        (0usize..4).prop_map(Location::Cell),
        (0usize..4).prop_map(Location::Foundation),
        (0usize..8, 0usize..12).prop_map(|(column, row)| Location::Cascade(column, row)),
    ]
}

fn foundation_heights(state: &GameState) -> [usize; 4] {
    std::array::from_fn(|index| state.board().foundation(index).len())
}

fn dealt(seed: u32) -> GameState {
    GameState::default()
        .shuffle(Some(seed))
        .deal_all(DealOptions::default())
}

/// Play `codes` and keep every state that recorded a new history entry.
fn play(seed: u32, codes: &[String]) -> (GameState, Vec<GameState>) {
    let mut state = dealt(seed);
    let mut recorded = Vec::new();
    for code in codes {
        let next = state.move_by_shorthand(code);
        if next.history().len() > state.history().len() {
            recorded.push(state.clone());
        }
        state = next;
    }
    (state, recorded)
}

// =============================================================================
// Card Conservation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that random play never loses, duplicates or misplaces a card.
    #[test]
    fn prop_random_play_keeps_invariants(
        seed in 1u32..32_000,
        codes in prop::collection::vec(code_strategy(), 1..60),
    ) {
        let mut state = dealt(seed);
        for code in &codes {
            let next = state.move_by_shorthand(code);
            prop_assert!(next.check_invariants().is_ok(), "after {code}: {next}");
            if next.previous_action().kind == ActionKind::Invalid {
                prop_assert_eq!(next.cards(), state.cards());
                prop_assert_eq!(next.history(), state.history());
            }
            state = next;
        }
    }

    /// Test that foundations only grow while no move lifts from them.
    #[test]
    fn prop_foundations_never_shrink(
        seed in 1u32..32_000,
        codes in prop::collection::vec(forward_code_strategy(), 1..80),
    ) {
        let mut state = dealt(seed);
        for code in &codes {
            let next = state.move_by_shorthand(code);
            let before = foundation_heights(&state);
            let after = foundation_heights(&next);
            prop_assert!(before.iter().zip(&after).all(|(b, a)| a >= b), "after {code}");
            state = next;
        }
    }

    /// Test that every seed and layout deals the whole deck.
    #[test]
    fn prop_deal_is_a_permutation(
        seed in any::<u32>(),
        cells in 1usize..=6,
        cascades in 4usize..=10,
    ) {
        let state = GameState::new(cells, cascades)
            .unwrap()
            .shuffle(Some(seed))
            .deal_all(DealOptions::default());
        prop_assert!(state.check_invariants().is_ok());
        prop_assert!(state.board().deck().is_empty());

        let longest = state.board().tableau().iter().map(Vec::len).max().unwrap_or(0);
        let shortest = state.board().tableau().iter().map(Vec::len).min().unwrap_or(0);
        prop_assert!(longest - shortest <= 1);
    }
}

// =============================================================================
// Undo
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Test that undo walks back through exactly the recorded states.
    #[test]
    fn prop_undo_reverses_each_entry(
        seed in 1u32..32_000,
        codes in prop::collection::vec(code_strategy(), 1..40),
    ) {
        let (mut state, recorded) = play(seed, &codes);
        if state.previous_action().kind == ActionKind::Invalid {
            let cleared = state.undo(UndoOptions::default());
            prop_assert_eq!(cleared.cards(), state.cards());
            prop_assert_eq!(cleared.history(), state.history());
            state = cleared;
        }
        for before in recorded.iter().rev() {
            state = state.undo(UndoOptions::default());
            prop_assert_eq!(state.cards(), before.cards());
            prop_assert_eq!(state.history(), before.history());
        }
    }

    /// Test that undo after a touch, legal or not, restores the cards.
    #[test]
    fn prop_touch_then_undo_restores_cards(
        seed in 1u32..32_000,
        codes in prop::collection::vec(code_strategy(), 0..20),
        first in location_strategy(),
        second in location_strategy(),
    ) {
        let (state, _) = play(seed, &codes);

        let touched = state.set_cursor(first).touch(TouchOptions::default());
        let undone = touched.undo(UndoOptions::default());
        prop_assert_eq!(undone.cards(), state.cards());
        prop_assert_eq!(undone.history(), state.history());
        prop_assert!(undone.selection().is_none());

        let again = touched.set_cursor(second).touch(TouchOptions::default());
        let undone = again.undo(UndoOptions::default());
        prop_assert_eq!(undone.cards(), touched.cards());
        prop_assert_eq!(undone.history(), touched.history());
    }
}

// =============================================================================
// Print and Parse
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Test that a printed game with history parses back to the same state.
    #[test]
    fn prop_print_parse_round_trip(
        seed in 1u32..32_000,
        codes in prop::collection::vec(code_strategy(), 0..40),
        touch_last in any::<bool>(),
    ) {
        let (mut state, _) = play(seed, &codes);
        if touch_last {
            state = state.touch(TouchOptions::default());
        }
        let text = state.print(PrintOptions::default().with_include_history(true));
        let parsed = GameState::parse(&text);
        prop_assert!(parsed.is_ok(), "{text}");
        prop_assert_eq!(parsed.unwrap(), state);
    }
}
