//! Print/parse integration tests.
//!
//! These tests check that printed games read back to the same state, that
//! a damaged history block degrades instead of failing, and that malformed
//! boards are rejected with a useful error.

use freecell_engine::{
    DealOptions, Direction, FoundationLimit, GameState, HistoryMismatch, Location, ParseError,
    PrintOptions, TouchOptions, UndoOptions,
};

fn dealt(seed: u32) -> GameState {
    GameState::default()
        .shuffle(Some(seed))
        .deal_all(DealOptions::default())
}

fn full() -> PrintOptions {
    PrintOptions::default().with_include_history(true)
}

fn round_trip(state: &GameState) -> GameState {
    GameState::parse(&state.print(full())).unwrap()
}

// =============================================================================
// Round Trips
// =============================================================================

/// Test that a fresh game reads back.
#[test]
fn test_round_trip_new_game() {
    let state = GameState::default();
    assert_eq!(round_trip(&state), state);

    let small = GameState::new(6, 10).unwrap();
    assert_eq!(round_trip(&small), small);
}

/// Test that a seeded game with many moves compacts and reads back.
#[test]
fn test_round_trip_long_seeded_game() {
    let mut state = dealt(5);
    for code in ["53", "8a", "6b", "5c", "b8"] {
        state = state.move_by_shorthand(code);
    }
    let text = state.print(full());
    assert!(text.contains("\n:h shuffle32 5\n"));
    assert_eq!(GameState::parse(&text).unwrap(), state);
}

/// Test that seeded move lists wrap after sixteen codes.
#[test]
fn test_seeded_line_wrapping() {
    let mut state = dealt(5);
    // Shuttle one card between two cells.
    state = state.move_by_shorthand("8a");
    for _ in 0..10 {
        state = state.move_by_shorthand("ab").move_by_shorthand("ba");
    }
    let text = state.print(full());
    let block: Vec<&str> = text.lines().skip_while(|line| !line.starts_with(":h")).collect();
    assert_eq!(block[0], ":h shuffle32 5");
    assert_eq!(block[1].split_whitespace().count(), 16);
    assert_eq!(block[2].split_whitespace().count(), 5);
    assert!(block[1].starts_with(" 8a ab ba"));
    assert_eq!(GameState::parse(&text).unwrap(), state);
}

/// Test that a game played from an unshuffled deck keeps a verbose history.
#[test]
fn test_round_trip_verbose_game() {
    let state = GameState::default()
        .deal_all(DealOptions::default().with_demo(true))
        .move_by_shorthand("5h");
    let text = state.print(full());
    assert!(text.contains("\n:h\n"));
    assert!(text.ends_with("deal all cards (demo)\n"));
    assert_eq!(GameState::parse(&text).unwrap(), state);
}

/// Test that games played under another auto-foundation policy read back.
#[test]
fn test_round_trip_other_policies() {
    let always = TouchOptions::default().with_auto_foundation_limit(FoundationLimit::Always);
    let seeded = dealt(5)
        .move_by_shorthand_with("53", always)
        .move_by_shorthand_with("8a", always);
    assert_eq!(round_trip(&seeded), seeded);

    let flourish = GameState::default()
        .deal_all(DealOptions::default())
        .move_by_shorthand_with("4h", always);
    assert!(flourish.is_won());
    assert_eq!(round_trip(&flourish), flourish);

    let never = TouchOptions::default().with_auto_foundation_limit(FoundationLimit::Never);
    let held = dealt(5).move_by_shorthand_with("53", never);
    let text = held.print(full());
    assert!(text.ends_with("move 53 6H→7C\n:h\nmove 53 6H→7C\ndeal all cards\nshuffle deck (5)\n"));
    assert_eq!(GameState::parse(&text).unwrap(), held);
}

/// Test that cursor and selection markers survive, including on the deck.
#[test]
fn test_round_trip_markers() {
    let selected = dealt(5)
        .set_cursor(Location::Cascade(2, 4))
        .touch(TouchOptions::default());
    assert_eq!(round_trip(&selected), selected);

    let elsewhere = selected.move_cursor(Direction::Up);
    assert_eq!(round_trip(&elsewhere), elsewhere);

    let on_deck = GameState::default().set_cursor(Location::Deck(3));
    let parsed = round_trip(&on_deck);
    assert_eq!(parsed.cursor(), Location::Deck(3));
    assert_eq!(parsed, on_deck);
}

/// Test that an undone game reads back with the undone history.
#[test]
fn test_round_trip_after_undo() {
    let state = dealt(5)
        .move_by_shorthand("53")
        .move_by_shorthand("8a")
        .undo(UndoOptions::default());
    assert_eq!(state.previous_action().text, "move 53 6H→7C (auto-foundation 2 AD)");
    assert_eq!(round_trip(&state), state);
}

/// Test that `Display` and `FromStr` agree with print and parse.
#[test]
fn test_display_and_from_str() {
    let state = dealt(12);
    let parsed: GameState = state.to_string().parse().unwrap();
    assert_eq!(parsed.cards(), state.cards());
    assert_eq!(parsed.cursor(), state.cursor());
}

// =============================================================================
// Degraded History
// =============================================================================

fn sentinel(state: &GameState) -> Option<HistoryMismatch> {
    match state.history().front().map(|entry| &entry.kind) {
        Some(freecell_engine::EntryKind::InvalidHistory(reason)) => Some(*reason),
        _ => None,
    }
}

/// Test that a seed that does not reach the board degrades.
#[test]
fn test_wrong_seed_degrades() {
    let text = dealt(5).print(full()).replace("shuffle32 5", "shuffle32 7");
    let parsed = GameState::parse(&text).unwrap();
    assert_eq!(sentinel(&parsed), Some(HistoryMismatch::SeedMismatch));
    assert_eq!(parsed.cards(), dealt(5).cards());

    // Still playable.
    let moved = parsed.move_by_shorthand("53");
    assert_eq!(moved.history().len(), 2);
    assert_eq!(moved.undo(UndoOptions::default()).cards(), parsed.cards());
}

/// Test that an unreadable history line degrades.
#[test]
fn test_unreadable_line_degrades() {
    let state = GameState::default().deal_all(DealOptions::default());
    let text = state.print(full()).replace(":h\ndeal all cards", ":h\ndeal every card");
    let parsed = GameState::parse(&text).unwrap();
    assert_eq!(sentinel(&parsed), Some(HistoryMismatch::UnreadableEntry));
    assert_eq!(parsed.previous_action().text, "deal all cards");
}

/// Test that a verbose history for a seeded game does not reprint the same.
#[test]
fn test_reprint_mismatch_degrades() {
    let state = dealt(5);
    let text = state
        .print(full())
        .replace(":h shuffle32 5", ":h\ndeal all cards\nshuffle deck (5)");
    let parsed = GameState::parse(&text).unwrap();
    assert_eq!(sentinel(&parsed), Some(HistoryMismatch::ReprintMismatch));
}

// =============================================================================
// Malformed Boards
// =============================================================================

/// Test the board-level errors.
#[test]
fn test_malformed_boards() {
    let good = dealt(5).print(PrintOptions::default());
    let lines: Vec<&str> = good.lines().collect();

    // Twelve top slots would mean eight cells.
    let too_wide = good.replacen(lines[0], &format!("{}            ", lines[0]), 1);
    assert!(matches!(
        GameState::parse(&too_wide),
        Err(ParseError::CellCount { line: 1, count: 8 })
    ));

    let trailing = format!("{good}more\n");
    assert_eq!(GameState::parse(&trailing), Err(ParseError::TrailingText { line: 10 }));

    let duplicate = good.replacen(lines[0], " AS                      ", 1);
    assert!(matches!(
        GameState::parse(&duplicate),
        Err(ParseError::NoMatchingCard { .. })
    ));

    let misplaced = good.replacen(lines[0], "             AS          ", 1);
    assert!(matches!(
        GameState::parse(&misplaced),
        Err(ParseError::FoundationSuit { foundation: 0, .. })
    ));
}
