//! Action text: formatting and reading back.
//!
//! ## Formats
//!
//! ```text
//! shuffle deck (5)
//! deal all cards | deal most cards | deal all cards (demo) | deal 4 more cards
//! move 53 6H→7C
//! move 53 6H→7C (auto-foundation 2 AD)
//! move 3h AS→foundation (flourish 1234 2S 2H ...)
//! auto-foundation 2a AD 2D
//! flourish 48 KC KD
//! init with invalid history (card mismatch)
//! ```
//!
//! A foundation run lists one source shorthand per card, then the cards in
//! the order they moved.

use crate::core::action::HistoryMismatch;
use crate::core::card::CardId;
use crate::core::location::{MoveCode, Slot};
use crate::play::auto::FoundationRun;
use crate::zones::Board;

/// `move <code> <cards>→<destination>`.
pub(crate) fn move_text(code: MoveCode, tokens: &str, destination: &str) -> String {
    format!("move {code} {tokens}→{destination}")
}

/// How a move's destination is written: the card it lands on, or the kind
/// of empty slot.
pub(crate) fn destination_label(board: &Board, slot: Slot) -> String {
    match slot {
        Slot::Cascade(column) => board
            .cascade_top(column)
            .map_or_else(|| "cascade".to_string(), |card| card.to_string()),
        Slot::Cell(_) => board
            .slot_top(slot)
            .map_or_else(|| "freecell".to_string(), |card| card.to_string()),
        Slot::Foundation => "foundation".to_string(),
        Slot::Deck => "deck".to_string(),
    }
}

/// `auto-foundation <sources> <cards>` or `flourish <sources> <cards>`.
pub(crate) fn foundation_run_text(run: &FoundationRun) -> String {
    let label = if run.flourish { "flourish" } else { "auto-foundation" };
    let sources: String = run.steps.iter().map(|(slot, _)| slot.to_char()).collect();
    let cards: Vec<String> = run.steps.iter().map(|(_, id)| id.to_string()).collect();
    format!("{label} {sources} {}", cards.join(" "))
}

/// A history line read back into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ParsedAction {
    Shuffle {
        seed: u32,
    },
    Deal {
        keep_deck: bool,
        demo: bool,
        /// Set for a deal onto a board that already held cards.
        more: Option<usize>,
    },
    Move {
        code: MoveCode,
        cards: Vec<CardId>,
        run: FoundationRun,
    },
    AutoFoundation(FoundationRun),
    InvalidHistory(HistoryMismatch),
}

impl ParsedAction {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        if let Some(rest) = text.strip_prefix("shuffle deck (") {
            let seed = rest.strip_suffix(')')?.parse().ok()?;
            return Some(ParsedAction::Shuffle { seed });
        }

        if let Some(rest) = text.strip_prefix("deal ") {
            return parse_deal(rest);
        }

        if let Some(rest) = text.strip_prefix("init with invalid history (") {
            let reason = HistoryMismatch::from_label(rest.strip_suffix(')')?)?;
            return Some(ParsedAction::InvalidHistory(reason));
        }

        if let Some(rest) = text.strip_prefix("move ") {
            return parse_move(rest);
        }

        if text.starts_with("auto-foundation ") || text.starts_with("flourish ") {
            return parse_run(text).map(ParsedAction::AutoFoundation);
        }

        None
    }
}

fn parse_deal(rest: &str) -> Option<ParsedAction> {
    let (rest, demo) = match rest.strip_suffix(" (demo)") {
        Some(rest) => (rest, true),
        None => (rest, false),
    };

    match rest {
        "all cards" => Some(ParsedAction::Deal {
            keep_deck: false,
            demo,
            more: None,
        }),
        "most cards" => Some(ParsedAction::Deal {
            keep_deck: true,
            demo,
            more: None,
        }),
        _ if !demo => {
            let count = rest.strip_suffix(" more cards")?.parse().ok()?;
            Some(ParsedAction::Deal {
                keep_deck: false,
                demo: false,
                more: Some(count),
            })
        }
        _ => None,
    }
}

fn parse_move(rest: &str) -> Option<ParsedAction> {
    let (code, rest) = rest.split_once(' ')?;
    let code = MoveCode::parse(code)?;

    let (main, run) = match rest.split_once(" (") {
        Some((main, suffix)) => (main, parse_run(suffix.strip_suffix(')')?)?),
        None => (rest, FoundationRun::default()),
    };

    let (tokens, _destination) = main.split_once('→')?;
    let cards = tokens
        .split('-')
        .map(CardId::parse)
        .collect::<Option<Vec<_>>>()?;
    if cards.is_empty() {
        return None;
    }

    Some(ParsedAction::Move { code, cards, run })
}

fn parse_run(text: &str) -> Option<FoundationRun> {
    let mut words = text.split_whitespace();
    let flourish = match words.next()? {
        "auto-foundation" => false,
        "flourish" => true,
        _ => return None,
    };
    let sources = words
        .next()?
        .chars()
        .map(Slot::from_char)
        .collect::<Option<Vec<_>>>()?;
    let cards = words.map(CardId::parse).collect::<Option<Vec<_>>>()?;
    if sources.is_empty() || sources.len() != cards.len() {
        return None;
    }

    Some(FoundationRun {
        steps: sources.into_iter().zip(cards).collect(),
        flourish,
    })
}
