//! Shuffling and dealing.
//!
//! Both only ever touch cards in the deck. A shuffle permutes the deck by deal
//! number; a deal lays deck cards out round-robin from the first cascade.

use tracing::debug;

use super::options::DealOptions;
use crate::core::action::{EntryKind, HistoryEntry, PreviousAction};
use crate::core::location::Location;
use crate::core::rng::{deal_order, SeedPicker};
use crate::core::state::GameState;
use crate::zones::Relocation;

impl GameState {
    /// Shuffle the deck by deal number, or by a freshly picked one.
    ///
    /// An empty deck is left alone.
    #[must_use]
    pub fn shuffle(&self, seed: Option<u32>) -> GameState {
        let seed = seed.unwrap_or_else(|| SeedPicker::from_entropy().pick());
        let deck = self.board().deck();
        let count = deck.len();
        if count == 0 {
            return self.clone();
        }

        let mut relocation = Relocation::new(self.cards());
        for (position, pool) in deal_order(seed, count).into_iter().enumerate() {
            // The pool runs from the bottom of the deck up.
            let card = deck[count - 1 - pool];
            relocation.place(card.id(), Location::Deck(position));
        }

        debug!(seed, count, "shuffle");
        let (cards, changes) = relocation.into_parts();
        let entry = HistoryEntry::new(
            format!("shuffle deck ({seed})"),
            EntryKind::Shuffle { seed },
            changes,
        );
        let action = PreviousAction::from_entry(&entry);
        self.commit(cards, entry, action)
    }

    /// Deal the deck onto the board.
    ///
    /// Cards go round-robin onto the cascades starting with the first,
    /// each landing on top of whatever the cascade already holds. With
    /// `keep_deck` only complete rows are dealt. With `demo`, and only on a
    /// board with empty cells and cascades, the free cells are filled
    /// first. An empty deck is left alone.
    #[must_use]
    pub fn deal_all(&self, options: DealOptions) -> GameState {
        let board = self.board();
        let deck = board.deck();
        let columns = board.cascade_count();
        let count = if options.keep_deck {
            deck.len() / columns * columns
        } else {
            deck.len()
        };
        if count == 0 {
            return self.clone();
        }

        let clear = board.is_clear();
        let demo = options.demo && clear && board.cell_count() > 0;
        let mut relocation = Relocation::new(self.cards());

        let mut dealt = 0;
        if demo {
            for (cell, card) in deck.iter().take(board.cell_count().min(count)).enumerate() {
                relocation.place(card.id(), Location::Cell(cell));
                dealt += 1;
            }
        }

        let mut heights: Vec<usize> = board.tableau().iter().map(Vec::len).collect();
        for (k, card) in deck[dealt..count].iter().enumerate() {
            let column = k % columns;
            relocation.place(card.id(), Location::Cascade(column, heights[column]));
            heights[column] += 1;
        }

        for (index, card) in deck[count..].iter().enumerate() {
            relocation.place(card.id(), Location::Deck(index));
        }

        let text = if clear {
            let amount = if options.keep_deck { "most" } else { "all" };
            let suffix = if demo { " (demo)" } else { "" };
            format!("deal {amount} cards{suffix}")
        } else {
            format!("deal {count} more cards")
        };

        debug!(count, demo, "deal");
        let (cards, changes) = relocation.into_parts();
        let entry = HistoryEntry::new(
            text,
            EntryKind::Deal {
                keep_deck: count < deck.len(),
                demo,
            },
            changes,
        );
        let action = PreviousAction::from_entry(&entry);
        self.commit(cards, entry, action)
    }
}
