//! Deal-number shuffling and seed picking.
//!
//! ## Deal Numbers
//!
//! Published FreeCell deal numbers (1-32000 and beyond) are defined by one
//! linear congruential generator:
//!
//! ```text
//! state' = (214013 * state + 2531011) mod 2^31
//! value  = state' >> 16
//! ```
//!
//! The deck is laid out bottom to top as a pool; at each step a card is drawn
//! from index `value % remaining`, the last pool card fills its place, and the
//! drawn card becomes the next deck position from the top. The constants must
//! stay bit-exact or every published deal changes.
//!
//! ```
//! use freecell_engine::core::rng::deal_order;
//!
//! // Deal 1 opens with the jack of diamonds (canonical index 41).
//! assert_eq!(deal_order(1, 52)[0], 41);
//! ```
//!
//! ## Seed Picking
//!
//! When the caller supplies no deal number, `SeedPicker` draws one from a
//! ChaCha8 stream so tests can pin it with `SeedPicker::new`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lowest classic deal number.
pub const MIN_DEAL: u32 = 1;

/// Highest classic deal number.
pub const MAX_DEAL: u32 = 32000;

/// The deal-number generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealRng {
    state: u32,
}

impl DealRng {
    pub const MULTIPLIER: u32 = 214_013;
    pub const INCREMENT: u32 = 2_531_011;
    const MASK: u32 = 0x7fff_ffff;

    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the next 15-bit value.
    pub fn next_value(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        self.state >> 16
    }
}

/// Permutation for `count` cards under deal number `seed`.
///
/// Entry `k` is the pool index (bottom of the deck first) of the card that
/// ends up at deck position `k` (top of the deck first).
#[must_use]
pub fn deal_order(seed: u32, count: usize) -> Vec<usize> {
    let mut rng = DealRng::new(seed);
    let mut pool: Vec<usize> = (0..count).collect();
    let mut order = Vec::with_capacity(count);

    for remaining in (1..=count).rev() {
        let drawn = rng.next_value() as usize % remaining;
        pool.swap(drawn, remaining - 1);
        order.push(pool[remaining - 1]);
    }

    order
}

/// Picks a deal number when none is given.
#[derive(Clone, Debug)]
pub struct SeedPicker {
    inner: ChaCha8Rng,
}

impl SeedPicker {
    /// Deterministic picker for tests and replays.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picker seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// A deal number in `MIN_DEAL..=MAX_DEAL`.
    pub fn pick(&mut self) -> u32 {
        self.inner.gen_range(MIN_DEAL..=MAX_DEAL)
    }
}

impl Default for SeedPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}
