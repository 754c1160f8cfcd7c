//! Game configuration.
//!
//! A game is configured by its free cell count and its cascade count.
//! Everything else (the deck, the foundation count) is fixed by the rules.
//!
//! The auto-foundation safety policy is not part of the game. It is chosen
//! per call through `TouchOptions` and `AutoFoundationOptions`, so a printed
//! board carries everything needed to read it back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::card::Suit;
use super::error::EngineError;
use super::location::Slot;

/// Fewest free cells allowed.
pub const MIN_CELLS: usize = 1;

/// Most free cells allowed (shorthand letters `a..f`).
pub const MAX_CELLS: usize = Slot::MAX_CELLS;

/// Fewest cascades allowed: one per suit.
pub const MIN_CASCADES: usize = Suit::COUNT;

/// Most cascades allowed (shorthand digits `1..9,0`).
pub const MAX_CASCADES: usize = Slot::MAX_CASCADES;

/// When a foundation may take its next card automatically.
///
/// With `N` the current top rank of the foundation (0 when empty), the next
/// card `N+1` is accepted when:
///
/// - `Never`: never.
/// - `Rank`: every other foundation is at `N` or above.
/// - `OppPlusOne`: both opposite-color foundations are at `N` or above.
/// - `OppPlusTwo`: both opposite-color foundations are at `N-1` or above.
/// - `Always`: always.
///
/// A foundation whose suit has no cards left in play counts as high enough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoundationLimit {
    Never,
    Rank,
    #[default]
    OppPlusOne,
    OppPlusTwo,
    Always,
}

impl FoundationLimit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FoundationLimit::Never => "none",
            FoundationLimit::Rank => "rank",
            FoundationLimit::OppPlusOne => "opp+1",
            FoundationLimit::OppPlusTwo => "opp+2",
            FoundationLimit::Always => "max",
        }
    }
}

impl fmt::Display for FoundationLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoundationLimit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(FoundationLimit::Never),
            "rank" => Ok(FoundationLimit::Rank),
            "opp+1" => Ok(FoundationLimit::OppPlusOne),
            "opp+2" => Ok(FoundationLimit::OppPlusTwo),
            "max" => Ok(FoundationLimit::Always),
            other => Err(EngineError::UnknownLimit(other.to_string())),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of free cells (1-6).
    pub cell_count: usize,

    /// Number of cascades (4-10).
    pub cascade_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_count: 4,
            cascade_count: 8,
        }
    }
}

impl GameConfig {
    /// Create a validated configuration.
    pub fn new(cell_count: usize, cascade_count: usize) -> Result<Self, EngineError> {
        let config = Self {
            cell_count,
            cascade_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the cell and cascade ranges.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_CELLS..=MAX_CELLS).contains(&self.cell_count) {
            return Err(EngineError::CellCount(self.cell_count));
        }
        if !(MIN_CASCADES..=MAX_CASCADES).contains(&self.cascade_count) {
            return Err(EngineError::CascadeCount(self.cascade_count));
        }
        Ok(())
    }
}
