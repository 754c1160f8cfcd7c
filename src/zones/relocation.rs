//! Working copy used inside one transition.
//!
//! A `Relocation` owns a copy of the card list and records every location
//! change as a `CardMove`. Transitions build one, move cards, and commit the
//! result together with the recorded changes as a history entry.
//!
//! ## Deck Shifting
//!
//! Deck index 0 is the top. Taking a card out of the deck shifts the cards
//! beneath it up one index; putting a card into the deck shifts them down.
//! Shifted cards are recorded like any other change, so walking the changes
//! backwards always restores the previous layout.

use im::Vector;

use crate::core::action::CardMove;
use crate::core::card::{Card, CardId};
use crate::core::location::Location;

#[derive(Clone, Debug)]
pub(crate) struct Relocation {
    cards: Vector<Card>,
    changes: Vec<CardMove>,
}

impl Relocation {
    pub(crate) fn new(cards: &Vector<Card>) -> Self {
        Self {
            cards: cards.clone(),
            changes: Vec::new(),
        }
    }

    pub(crate) fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    pub(crate) fn changes(&self) -> &[CardMove] {
        &self.changes
    }

    pub(crate) fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        let index = id.canonical_index();
        match self.cards.get(index) {
            Some(card) if card.id() == id => Some(index),
            _ => self.cards.iter().position(|card| card.id() == id),
        }
    }

    pub(crate) fn card(&self, id: CardId) -> Option<Card> {
        self.index_of(id).and_then(|index| self.cards.get(index).copied())
    }

    /// Set one card's location without touching any other card.
    pub(crate) fn place(&mut self, id: CardId, to: Location) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let Some(card) = self.cards.get(index).copied() else {
            return;
        };
        if card.location == to {
            return;
        }
        self.cards.set(index, card.at(to));
        self.changes.push(CardMove::new(id, card.location, to));
    }

    /// Move one card, shifting the deck around it.
    pub(crate) fn relocate(&mut self, id: CardId, to: Location) {
        let Some(from) = self.card(id).map(|card| card.location) else {
            return;
        };
        if from == to {
            return;
        }

        self.place(id, to);

        if let Location::Deck(taken) = from {
            for (other, index) in self.deck_cards_except(id) {
                if index > taken {
                    self.place(other, Location::Deck(index - 1));
                }
            }
        }

        if let Location::Deck(inserted) = to {
            // Shift from the bottom up so no two cards share an index midway.
            let mut below: Vec<(CardId, usize)> = self
                .deck_cards_except(id)
                .into_iter()
                .filter(|&(_, index)| index >= inserted)
                .collect();
            below.sort_by(|a, b| b.1.cmp(&a.1));
            for (other, index) in below {
                self.place(other, Location::Deck(index + 1));
            }
        }
    }

    fn deck_cards_except(&self, id: CardId) -> Vec<(CardId, usize)> {
        let mut deck: Vec<(CardId, usize)> = self
            .cards
            .iter()
            .filter(|card| card.id() != id)
            .filter_map(|card| match card.location {
                Location::Deck(index) => Some((card.id(), index)),
                _ => None,
            })
            .collect();
        deck.sort_by_key(|&(_, index)| index);
        deck
    }

    pub(crate) fn into_parts(self) -> (Vector<Card>, Vec<CardMove>) {
        (self.cards, self.changes)
    }
}

/// Walk `changes` backwards, returning every card to where it came from.
pub(crate) fn revert(cards: &Vector<Card>, changes: &[CardMove]) -> Vector<Card> {
    let mut relocation = Relocation::new(cards);
    for change in changes.iter().rev() {
        relocation.place(change.card, change.from);
    }
    relocation.cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn small_deck() -> Vector<Card> {
        // Four cards, all in the deck: AC on top.
        CardId::all()
            .take(4)
            .enumerate()
            .map(|(i, id)| Card::new(id.rank, id.suit, Location::Deck(i)))
            .collect()
    }

    #[test]
    fn test_take_from_deck_shifts_up() {
        let cards = small_deck();
        let ace = CardId::new(Rank::Ace, Suit::Clubs);

        let mut relocation = Relocation::new(&cards);
        relocation.relocate(ace, Location::Cell(0));

        let (after, changes) = relocation.into_parts();
        assert_eq!(after[0].location, Location::Cell(0));
        assert_eq!(after[1].location, Location::Deck(0));
        assert_eq!(after[3].location, Location::Deck(2));
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0].from, Location::Deck(0));

        assert_eq!(revert(&after, &changes), cards);
    }

    #[test]
    fn test_put_into_deck_shifts_down() {
        let mut cards = small_deck();
        cards.set(0, cards[0].at(Location::Cell(2)));
        for i in 1..4 {
            cards.set(i, cards[i].at(Location::Deck(i - 1)));
        }

        let mut relocation = Relocation::new(&cards);
        relocation.relocate(CardId::new(Rank::Ace, Suit::Clubs), Location::Deck(0));
        let (after, changes) = relocation.into_parts();

        assert_eq!(after, small_deck());
        assert_eq!(revert(&after, &changes), cards);
    }

    #[test]
    fn test_noop_records_nothing() {
        let cards = small_deck();
        let mut relocation = Relocation::new(&cards);
        relocation.relocate(CardId::new(Rank::Ace, Suit::Hearts), Location::Deck(2));
        relocation.relocate(CardId::new(Rank::King, Suit::Hearts), Location::Cell(0));
        assert!(!relocation.has_changes());
    }
}
