//! Pure legality predicates.
//!
//! ## Foundations
//!
//! A foundation grows by suit from ace to king. `foundation_can_accept` adds
//! the safety policy used by auto-foundation on top of plain legality.
//!
//! ## Cascades
//!
//! A cascade run is legal when each card is one rank below the card before it
//! and of the other color.
//!
//! ## Supermoves
//!
//! A legal run moves as a unit when it fits through the free space:
//! `(empty cells + 1) * 2^(empty cascades)`, halved when the destination is
//! itself an empty cascade.

use crate::core::card::{Card, CardId, Rank, Suit};
use crate::core::config::FoundationLimit;
use crate::zones::Board;

/// Can `candidate` go on a foundation whose top is `top`?
#[must_use]
pub fn can_extend_foundation(top: Option<CardId>, candidate: CardId) -> bool {
    match top {
        None => candidate.rank == Rank::Ace,
        Some(top) => top.suit == candidate.suit && top.rank.next() == Some(candidate.rank),
    }
}

/// Can `candidate` go on a cascade whose top is `top`?
#[must_use]
pub fn can_extend_cascade(top: CardId, candidate: CardId) -> bool {
    candidate.rank.next() == Some(top.rank) && candidate.color() != top.color()
}

/// Is `cards` a descending, alternating run?
#[must_use]
pub fn is_legal_sequence(cards: &[Card]) -> bool {
    cards
        .windows(2)
        .all(|pair| can_extend_cascade(pair[0].id(), pair[1].id()))
}

/// Largest run a single move can carry.
#[must_use]
pub fn max_movable_sequence_length(board: &Board, to_empty_cascade: bool) -> usize {
    let cells = board.empty_cell_count();
    let cascades = board.empty_cascade_count();
    let capacity = (cells + 1) << cascades;
    if to_empty_cascade {
        capacity >> 1
    } else {
        capacity
    }
}

/// May the `suit` foundation take its next card under `limit`?
///
/// This answers the safety policy only; the next card still has to be
/// reachable.
#[must_use]
pub fn foundation_can_accept(board: &Board, suit: Suit, limit: FoundationLimit) -> bool {
    let height = board.foundation_for(suit).len();
    if height >= Rank::ALL.len() {
        return false;
    }

    let at_least = |other: Suit, needed: usize| board.foundation_for(other).len() >= needed;

    match limit {
        FoundationLimit::Never => false,
        FoundationLimit::Always => true,
        FoundationLimit::Rank => Suit::ALL
            .into_iter()
            .filter(|&other| other != suit)
            .all(|other| at_least(other, height)),
        FoundationLimit::OppPlusOne => suit.opposites().all(|other| at_least(other, height)),
        FoundationLimit::OppPlusTwo => suit
            .opposites()
            .all(|other| at_least(other, height.saturating_sub(1))),
    }
}
