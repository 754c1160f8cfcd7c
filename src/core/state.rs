//! Game state: the immutable snapshot every transition produces.
//!
//! ## Source of Truth
//!
//! `cards` holds every card with its location, always in canonical deck
//! order. The `Board` view is rebuilt from it whenever cards move, so two
//! states with the same layout compare equal.
//!
//! ## Persistence
//!
//! `cards` and `history` are `im::Vector`s: cloning a state is cheap and a
//! transition returns a new state without touching the old one. No
//! transition takes `&mut self`.
//!
//! ## Invariants
//!
//! - Each of the 52 cards exists exactly once
//! - Every location is in range and holds at most one card
//! - Deck indices and cascade rows are contiguous from 0
//! - Each foundation is an ascending run of its own suit from ace
//! - A selection matches the board it was made on
//!
//! `check_invariants` verifies all of them.

use im::Vector;
use rustc_hash::FxHashSet;

use super::action::{HistoryEntry, PreviousAction};
use super::card::{Card, CardId, Suit};
use super::config::GameConfig;
use super::error::EngineError;
use super::location::Location;
use crate::rules::{sequence_at, Selection};
use crate::zones::Board;

/// A FreeCell game at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    cards: Vector<Card>,
    board: Board,
    cursor: Location,
    selection: Option<Selection>,
    history: Vector<HistoryEntry>,
    previous_action: PreviousAction,
}

impl GameState {
    /// An unshuffled full deck with `cell_count` cells and `cascade_count`
    /// cascades.
    pub fn new(cell_count: usize, cascade_count: usize) -> Result<Self, EngineError> {
        Self::with_config(GameConfig::new(cell_count, cascade_count)?)
    }

    /// An unshuffled full deck under `config`.
    ///
    /// The deck is stacked so that dealing number 1 onward follows the
    /// classic deal-number order: the king of spades is on top and the ace
    /// of clubs at the bottom.
    pub fn with_config(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::assemble(
            config,
            unshuffled_deck(),
            Location::Cell(0),
            None,
            Vector::new(),
            PreviousAction::init(),
        ))
    }

    /// Build a state from parts, rebuilding the board and clamping the
    /// cursor.
    pub(crate) fn assemble(
        config: GameConfig,
        cards: Vector<Card>,
        cursor: Location,
        selection: Option<Selection>,
        history: Vector<HistoryEntry>,
        previous_action: PreviousAction,
    ) -> Self {
        let board = Board::build(&config, &cards);
        let cursor = board.clamp(cursor);
        Self {
            config,
            cards,
            board,
            cursor,
            selection,
            history,
            previous_action,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Every card, in canonical order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<Card> {
        self.cards
            .get(id.canonical_index())
            .copied()
            .filter(|card| card.id() == id)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cursor(&self) -> Location {
        self.cursor
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn previous_action(&self) -> &PreviousAction {
        &self.previous_action
    }

    /// Every card is on a foundation.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    // === Transition helpers ===

    /// New cards plus a history entry. Clears the selection.
    pub(crate) fn commit(
        &self,
        cards: Vector<Card>,
        entry: HistoryEntry,
        action: PreviousAction,
    ) -> Self {
        self.commit_at(cards, entry, action, self.cursor)
    }

    /// As `commit`, moving the cursor to `cursor`.
    pub(crate) fn commit_at(
        &self,
        cards: Vector<Card>,
        entry: HistoryEntry,
        action: PreviousAction,
        cursor: Location,
    ) -> Self {
        let mut history = self.history.clone();
        history.push_back(entry);
        Self::assemble(self.config.clone(), cards, cursor, None, history, action)
    }

    /// Cards and history replaced wholesale, as undo does. Clears the
    /// selection.
    pub(crate) fn rewind(
        &self,
        cards: Vector<Card>,
        history: Vector<HistoryEntry>,
        cursor: Location,
        action: PreviousAction,
    ) -> Self {
        Self::assemble(self.config.clone(), cards, cursor, None, history, action)
    }

    /// Same cards, new previous action.
    pub(crate) fn with_action(&self, action: PreviousAction) -> Self {
        Self {
            previous_action: action,
            ..self.clone()
        }
    }

    /// Same cards, new selection and previous action.
    pub(crate) fn with_selection(&self, selection: Option<Selection>, action: PreviousAction) -> Self {
        Self {
            selection,
            previous_action: action,
            ..self.clone()
        }
    }

    /// Same cards, new cursor and previous action.
    pub(crate) fn with_cursor(&self, cursor: Location, action: PreviousAction) -> Self {
        Self {
            cursor: self.board.clamp(cursor),
            previous_action: action,
            ..self.clone()
        }
    }

    // === Validation ===

    /// Verify every structural invariant.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let mut seen: FxHashSet<CardId> = FxHashSet::default();
        let mut occupied: FxHashSet<Location> = FxHashSet::default();

        for card in &self.cards {
            if !seen.insert(card.id()) {
                return Err(EngineError::DuplicateCard(card.id()));
            }

            let in_range = match card.location {
                Location::Deck(_) => true,
                Location::Cell(i) => i < self.config.cell_count,
                Location::Foundation(i) => i < Suit::COUNT,
                Location::Cascade(column, _) => column < self.config.cascade_count,
            };
            if !in_range {
                return Err(EngineError::LocationOutOfRange { card: card.id() });
            }

            let stacked = matches!(card.location, Location::Foundation(_));
            if !stacked && !occupied.insert(card.location) {
                return Err(EngineError::SlotConflict(card.location.to_string()));
            }
        }

        if let Some(missing) = CardId::all().find(|id| !seen.contains(id)) {
            return Err(EngineError::MissingCard(missing));
        }

        for (i, card) in self.board.deck().iter().enumerate() {
            if card.location != Location::Deck(i) {
                return Err(EngineError::Gap("deck".to_string()));
            }
        }

        for (column, cascade) in self.board.tableau().iter().enumerate() {
            for (row, card) in cascade.iter().enumerate() {
                if card.location != Location::Cascade(column, row) {
                    return Err(EngineError::Gap(format!("cascade {}", column + 1)));
                }
            }
        }

        for (index, suit) in Suit::ALL.into_iter().enumerate() {
            let ascending = self
                .board
                .foundation(index)
                .iter()
                .enumerate()
                .all(|(height, card)| card.suit == suit && usize::from(card.rank.value()) == height + 1);
            if !ascending {
                return Err(EngineError::FoundationOrder(index));
            }
        }

        if let Some(selection) = &self.selection {
            if sequence_at(&self.board, selection.origin(), true).as_ref() != Some(selection) {
                return Err(EngineError::StaleSelection);
            }
        }

        Ok(())
    }
}

/// King of spades on top, ace of clubs at the bottom.
fn unshuffled_deck() -> Vector<Card> {
    CardId::all()
        .map(|id| {
            let index = CardId::DECK_SIZE - 1 - id.canonical_index();
            Card::new(id.rank, id.suit, Location::Deck(index))
        })
        .collect()
}

impl Default for GameState {
    fn default() -> Self {
        Self::assemble(
            GameConfig::default(),
            unshuffled_deck(),
            Location::Cell(0),
            None,
            Vector::new(),
            PreviousAction::init(),
        )
    }
}
