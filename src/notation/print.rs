//! Printing a game as fixed-width text.
//!
//! ```text
//!  AH          2C 3D
//!  9S 4S>TD 8C KD JH QC 2S
//!  8H 7D QS|KC 4H 6S 3S 6D
//!           QH|
//! :d 5H 9C 2H
//! select 4:1 KC-QH
//! ```
//!
//! Every slot is a separator column followed by a two-character card
//! token. The separator before a slot holds `>` for the cursor, or `|` for
//! the start of the selection; the separator after the selection's last card
//! holds the closing `|`. A trailing separator column ends each row.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Suit};
use crate::core::location::Location;
use crate::core::state::GameState;
use crate::zones::Board;

/// Seeded history lines hold this many move codes.
pub(crate) const CODES_PER_LINE: usize = 16;

pub(crate) const BANNER: &str = "YOU WIN";

/// Options for `GameState::print`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    /// Append the history block after the action text.
    pub include_history: bool,
}

impl PrintOptions {
    pub fn with_include_history(mut self, enabled: bool) -> Self {
        self.include_history = enabled;
        self
    }
}

/// A printed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Row {
    Top,
    Cascade(usize),
    Deck,
}

/// Printed row and slot of `location`.
pub(crate) fn position(board: &Board, location: Location) -> (Row, usize) {
    match location {
        Location::Cell(i) => (Row::Top, i),
        Location::Foundation(i) => (Row::Top, board.cell_count() + i),
        Location::Cascade(column, row) => (Row::Cascade(row), column),
        Location::Deck(i) => {
            let slots = board.deck().len().max(1);
            (Row::Deck, slots - 1 - i.min(slots - 1))
        }
    }
}

impl GameState {
    /// Render the board, the previous action and optionally the history.
    #[must_use]
    pub fn print(&self, options: PrintOptions) -> String {
        let board = self.board();
        let markers = self.markers();
        let mut lines = Vec::new();

        let top: Vec<String> = board
            .cells()
            .iter()
            .map(|cell| token(cell.as_ref()))
            .chain((0..Suit::COUNT).map(|i| token(board.foundation_top(i).as_ref())))
            .collect();
        lines.push(render_row(Row::Top, "", &top, &markers));

        for row in 0..board.row_count() {
            let tokens: Vec<String> = board
                .tableau()
                .iter()
                .map(|cascade| token(cascade.get(row)))
                .collect();
            lines.push(render_row(Row::Cascade(row), "", &tokens, &markers));
        }

        if !board.deck().is_empty() || matches!(self.cursor(), Location::Deck(_)) {
            let tokens: Vec<String> = if board.deck().is_empty() {
                vec![token(None)]
            } else {
                board.deck().iter().rev().map(|card| token(Some(card))).collect()
            };
            lines.push(render_row(Row::Deck, ":d", &tokens, &markers));
        }

        if self.is_won() {
            let width = 3 * board.cascade_count() + 1;
            lines.push(format!("{BANNER:^width$}"));
        }

        lines.push(self.previous_action().text.clone());

        if options.include_history {
            lines.extend(self.history_lines());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Separator marks by row and slot. Slot `n` of an `n`-slot row is the
    /// trailing separator.
    fn markers(&self) -> FxHashMap<(Row, usize), char> {
        let board = self.board();
        let mut markers = FxHashMap::default();

        if let Some(last) = self.selection().and_then(|s| s.sequence().cards.last()) {
            let (row, slot) = position(board, last.location);
            markers.insert((row, slot + 1), '|');
        }
        markers.insert(position(board, self.cursor()), '>');
        if let Some(selection) = self.selection() {
            markers.insert(position(board, selection.origin()), '|');
        }

        markers
    }

    fn history_lines(&self) -> Vec<String> {
        match self.seeded_moves() {
            Some((seed, codes)) => {
                let mut lines = vec![format!(":h shuffle32 {seed}")];
                for chunk in codes.chunks(CODES_PER_LINE) {
                    lines.push(chunk.iter().map(|code| format!(" {code}")).collect());
                }
                lines
            }
            None => std::iter::once(":h".to_string())
                .chain(self.history().iter().rev().map(|entry| entry.text.clone()))
                .collect(),
        }
    }
}

fn token(card: Option<&Card>) -> String {
    card.map_or_else(|| "  ".to_string(), ToString::to_string)
}

fn render_row(row: Row, prefix: &str, tokens: &[String], markers: &FxHashMap<(Row, usize), char>) -> String {
    let separator = |slot: usize| markers.get(&(row, slot)).copied().unwrap_or(' ');
    let mut line = String::with_capacity(prefix.len() + 3 * tokens.len() + 1);
    line.push_str(prefix);
    for (slot, token) in tokens.iter().enumerate() {
        line.push(separator(slot));
        line.push_str(token);
    }
    line.push(separator(tokens.len()));
    line
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(PrintOptions::default()))
    }
}
