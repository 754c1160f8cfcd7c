//! Reading a printed game back.
//!
//! The board rows fix every card's location against a full reference deck;
//! the markers restore the cursor and selection. A history block, when
//! present, is rebuilt into full history entries. When it cannot be, the
//! game is still returned, carrying an invalid-history sentinel instead.

use std::str::FromStr;

use im::Vector;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::print::{PrintOptions, BANNER};
use crate::core::action::{HistoryEntry, HistoryMismatch, PreviousAction};
use crate::core::card::{Card, CardId, Rank, Suit};
use crate::core::config::{GameConfig, MAX_CASCADES, MAX_CELLS, MIN_CASCADES, MIN_CELLS};
use crate::core::error::{EngineError, ParseError};
use crate::core::location::{Location, MoveCode};
use crate::core::state::GameState;
use crate::history::{rebuild_history, replay_seeded};
use crate::rules::sequence_at;
use crate::zones::Board;

const SEEDED_PREFIX: &str = ":h shuffle32 ";

fn is_board_row(line: &str) -> bool {
    line.starts_with(|c| matches!(c, ' ' | '>' | '|')) && line.trim() != BANNER
}

/// One printed slot: its separator and card token.
struct SlotText {
    separator: char,
    card: Option<CardId>,
}

/// Split a row into slots plus the trailing separator.
fn read_slots(line: usize, chars: &[char]) -> Result<(Vec<SlotText>, char), ParseError> {
    let width = chars.len();
    if width < 4 || (width - 1) % 3 != 0 {
        return Err(ParseError::MalformedLine { line, width });
    }

    let mut slots = Vec::with_capacity(width / 3);
    for (slot, chunk) in chars[..width - 1].chunks(3).enumerate() {
        let token: String = chunk[1..].iter().collect();
        let card = if token == "  " {
            None
        } else {
            Some(CardId::parse(&token).ok_or(ParseError::UnknownToken {
                line,
                column: slot * 3 + 1,
                token,
            })?)
        };
        slots.push(SlotText {
            separator: chunk[0],
            card,
        });
    }
    Ok((slots, chars[width - 1]))
}

/// Cards and markers collected while reading the board rows.
struct Reader {
    remaining: FxHashSet<CardId>,
    placed: Vec<Option<Location>>,
    cursor: Option<Location>,
    origin: Option<Location>,
    bars: usize,
}

impl Reader {
    fn new() -> Self {
        Self {
            remaining: CardId::all().collect(),
            placed: vec![None; CardId::DECK_SIZE],
            cursor: None,
            origin: None,
            bars: 0,
        }
    }

    fn take(&mut self, line: usize, card: CardId, location: Location) -> Result<(), ParseError> {
        if !self.remaining.remove(&card) {
            return Err(ParseError::NoMatchingCard { line, card });
        }
        self.placed[card.canonical_index()] = Some(location);
        Ok(())
    }

    /// Record the separator before `location`, or a trailing separator when
    /// `location` is `None`.
    fn mark(
        &mut self,
        line: usize,
        column: usize,
        separator: char,
        location: Option<Location>,
    ) -> Result<(), ParseError> {
        match (separator, location) {
            (' ', _) => Ok(()),
            ('>', Some(location)) => {
                if self.cursor.replace(location).is_some() {
                    return Err(ParseError::MultipleCursors);
                }
                Ok(())
            }
            ('|', _) => {
                self.bars += 1;
                if self.bars > 2 {
                    return Err(ParseError::MalformedSelection(
                        "more than two selection markers".to_string(),
                    ));
                }
                if self.origin.is_none() {
                    self.origin = Some(location.ok_or_else(|| {
                        ParseError::MalformedSelection(format!("line {line}: selection starts past the last slot"))
                    })?);
                }
                Ok(())
            }
            (separator, _) => Err(ParseError::UnknownSeparator {
                line,
                column,
                separator,
            }),
        }
    }

    /// Mark and place one row. `place` records a slot's card and answers
    /// the slot's location.
    fn row(
        &mut self,
        line: usize,
        offset: usize,
        chars: &[char],
        mut place: impl FnMut(&mut Self, usize, Option<CardId>) -> Result<Location, ParseError>,
    ) -> Result<(), ParseError> {
        let (slots, trailing) = read_slots(line, &chars[offset..])?;
        let count = slots.len();
        for (slot, text) in slots.into_iter().enumerate() {
            let location = place(self, slot, text.card)?;
            self.mark(line, offset + slot * 3, text.separator, Some(location))?;
        }
        self.mark(line, offset + count * 3, trailing, None)
    }
}

impl GameState {
    /// Read a printed game.
    ///
    /// Fails on a malformed board. A history block that does not rebuild
    /// exactly yields a playable game whose history is a single
    /// invalid-history sentinel.
    pub fn parse(text: &str) -> Result<GameState, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let mut at = 0;
        let mut reader = Reader::new();

        // Cells and foundations.
        let top = lines
            .first()
            .filter(|line| is_board_row(line))
            .ok_or(ParseError::MissingBoard)?;
        let top: Vec<char> = top.chars().collect();
        let top_slots = (top.len().saturating_sub(1)) / 3;
        let cell_count = top_slots.saturating_sub(Suit::COUNT);
        if (top.len() + 2) % 3 == 0 && !(MIN_CELLS..=MAX_CELLS).contains(&cell_count) {
            return Err(ParseError::CellCount { line: 1, count: cell_count });
        }
        reader.row(1, 0, &top, |reader, slot, card| {
            if slot < cell_count {
                let location = Location::Cell(slot);
                if let Some(card) = card {
                    reader.take(1, card, location)?;
                }
                return Ok(location);
            }
            let foundation = slot - cell_count;
            if let Some(card) = card {
                if card.suit.index() != foundation {
                    return Err(ParseError::FoundationSuit { line: 1, foundation, card });
                }
                for value in 1..=card.rank.value() {
                    if let Some(rank) = Rank::from_value(value) {
                        reader.take(1, CardId::new(rank, card.suit), Location::Foundation(foundation))?;
                    }
                }
            }
            Ok(Location::Foundation(foundation))
        })?;
        at += 1;

        // Cascade rows.
        let mut cascade_count = 0;
        let mut ended: Vec<bool> = Vec::new();
        let mut row = 0;
        while let Some(line) = lines.get(at).filter(|line| is_board_row(line)) {
            let number = at + 1;
            let chars: Vec<char> = line.chars().collect();
            if row == 0 {
                if chars.len() < 4 || (chars.len() - 1) % 3 != 0 {
                    return Err(ParseError::MalformedLine { line: number, width: chars.len() });
                }
                cascade_count = (chars.len() - 1) / 3;
                if !(MIN_CASCADES..=MAX_CASCADES).contains(&cascade_count) {
                    return Err(ParseError::CascadeCount { line: number, count: cascade_count });
                }
                ended = vec![false; cascade_count];
            } else if chars.len() != 3 * cascade_count + 1 {
                return Err(ParseError::RaggedRows { line: number, width: chars.len() });
            }

            reader.row(number, 0, &chars, |reader, column, card| {
                let location = Location::Cascade(column, row);
                match card {
                    Some(_) if ended[column] => Err(ParseError::ColumnGap { line: number, column: column + 1 }),
                    Some(card) => {
                        reader.take(number, card, location)?;
                        Ok(location)
                    }
                    None => {
                        ended[column] = true;
                        Ok(location)
                    }
                }
            })?;
            row += 1;
            at += 1;
        }
        if row == 0 {
            return Err(ParseError::MissingBoard);
        }

        // Deck, bottom card first.
        if let Some(line) = lines.get(at).filter(|line| line.starts_with(":d")) {
            let number = at + 1;
            let chars: Vec<char> = line.chars().collect();
            let width = chars.len() - 2;
            if width < 4 || (width - 1) % 3 != 0 {
                return Err(ParseError::MalformedLine { line: number, width: chars.len() });
            }
            let slots = (width - 1) / 3;
            reader.row(number, 2, &chars, |reader, slot, card| {
                let location = Location::Deck(slots - 1 - slot);
                match card {
                    Some(card) => {
                        reader.take(number, card, location)?;
                        Ok(location)
                    }
                    None if slots == 1 => Ok(location),
                    None => Err(ParseError::MalformedLine { line: number, width: chars.len() }),
                }
            })?;
            at += 1;
        }

        if lines.get(at).is_some_and(|line| line.trim() == BANNER) {
            at += 1;
        }

        let action_text = match lines.get(at) {
            Some(line) if !line.starts_with(":h") => {
                at += 1;
                Some(*line)
            }
            _ => None,
        };

        let history_block = match lines.get(at) {
            Some(line) if line.starts_with(":h") => {
                let block = &lines[at..];
                at = lines.len();
                Some(block)
            }
            _ => None,
        };
        if at < lines.len() {
            return Err(ParseError::TrailingText { line: at + 1 });
        }

        if !reader.remaining.is_empty() {
            return Err(ParseError::MissingCards(reader.remaining.len()));
        }

        let cards: Vector<Card> = CardId::all()
            .zip(reader.placed.iter())
            .map(|(id, location)| {
                location
                    .map(|location| Card::new(id.rank, id.suit, location))
                    .ok_or(ParseError::MissingCards(1))
            })
            .collect::<Result<_, _>>()?;

        let config = GameConfig::new(cell_count, cascade_count).map_err(config_error)?;
        let board = Board::build(&config, &cards);

        let selection = match reader.origin {
            Some(origin) => Some(sequence_at(&board, origin, true).ok_or_else(|| {
                ParseError::MalformedSelection(format!("nothing to select at {origin}"))
            })?),
            None => None,
        };
        let cursor = reader
            .cursor
            .or(reader.origin)
            .unwrap_or(Location::Cell(0));

        let action_text = action_text.unwrap_or("init");
        let Some(block) = history_block else {
            return Ok(GameState::assemble(
                config,
                cards,
                cursor,
                selection,
                Vector::new(),
                PreviousAction::from_text(action_text),
            ));
        };

        let rebuilt = read_history(&config, &cards, block).and_then(|history| {
            let action = match history.back() {
                Some(last) if last.text == action_text => PreviousAction::from_entry(last),
                _ => PreviousAction::from_text(action_text),
            };
            let state = GameState::assemble(
                config.clone(),
                cards.clone(),
                cursor,
                selection.clone(),
                history,
                action,
            );
            let normalized: String = lines.iter().map(|line| format!("{line}\n")).collect();
            if state.print(PrintOptions::default().with_include_history(true)) == normalized {
                Ok(state)
            } else {
                Err(HistoryMismatch::ReprintMismatch)
            }
        });

        match rebuilt {
            Ok(state) => {
                debug!(entries = state.history().len(), "parsed game with history");
                Ok(state)
            }
            Err(reason) => {
                warn!(%reason, "history does not rebuild; keeping the board only");
                Ok(GameState::assemble(
                    config,
                    cards,
                    cursor,
                    selection,
                    im::vector![HistoryEntry::invalid_history(reason)],
                    PreviousAction::from_text(action_text),
                ))
            }
        }
    }
}

/// Place a layout error on the line that set the count.
fn config_error(error: EngineError) -> ParseError {
    match error {
        EngineError::CellCount(count) => ParseError::CellCount { line: 1, count },
        EngineError::CascadeCount(count) => ParseError::CascadeCount { line: 2, count },
        other => ParseError::from(other),
    }
}

/// Rebuild the history a `:h` block describes.
fn read_history(
    config: &GameConfig,
    cards: &Vector<Card>,
    block: &[&str],
) -> Result<Vector<HistoryEntry>, HistoryMismatch> {
    let (head, rest) = block.split_first().ok_or(HistoryMismatch::UnreadableEntry)?;

    if let Some(seed) = head.strip_prefix(SEEDED_PREFIX) {
        let seed: u32 = seed.parse().map_err(|_| HistoryMismatch::UnreadableEntry)?;
        let codes = rest
            .iter()
            .flat_map(|line| line.split_whitespace())
            .map(MoveCode::parse)
            .collect::<Option<Vec<_>>>()
            .ok_or(HistoryMismatch::UnreadableEntry)?;

        let replayed = replay_seeded(config, seed, &codes)?;
        if replayed.cards() != cards {
            return Err(if codes.is_empty() {
                HistoryMismatch::SeedMismatch
            } else {
                HistoryMismatch::CardMismatch
            });
        }
        return Ok(replayed.history().clone());
    }

    if *head != ":h" {
        return Err(HistoryMismatch::UnreadableEntry);
    }
    rebuild_history(config, cards, rest.iter().copied())
}

impl FromStr for GameState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::parse(s)
    }
}
