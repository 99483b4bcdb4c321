//! Static tree geometry.
//!
//! A match in round `r` spans `2^r` first-round slots, so its offset is
//! `index * 2^r * unit + (2^r - 1) * unit / 2` where `unit = height + gap`.
//! That places every match exactly halfway between its two feeders, which
//! keeps connector lines straight without measuring anything at runtime.

use serde::{Deserialize, Serialize};

/// Vertical offset of match `index` in round `round`.
pub fn offset_of(round: usize, index: usize, match_height: f64, gap: f64) -> f64 {
    let unit = match_height + gap;
    let multiplier = f64::from(1u32 << round.min(31));
    index as f64 * multiplier * unit + (multiplier - 1.0) * unit / 2.0
}

/// Fixed per-match height and inter-match gap, in whatever unit the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub match_height: u32,
    pub gap: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::PIXELS
    }
}

impl LayoutMetrics {
    /// 100px cards with 20px gaps.
    pub const PIXELS: Self = Self {
        match_height: 100,
        gap: 20,
    };

    /// Three-row cells (slot A, status, slot B) with one blank row between.
    pub const TERMINAL: Self = Self {
        match_height: 3,
        gap: 1,
    };

    pub fn unit(&self) -> u32 {
        self.match_height + self.gap
    }

    pub fn offset(&self, round: usize, index: usize) -> f64 {
        offset_of(
            round,
            index,
            f64::from(self.match_height),
            f64::from(self.gap),
        )
    }

    /// Integer form of [`offset`](Self::offset). Exact whenever `unit()` is even
    /// or `round` is 0; otherwise rounded down.
    pub fn offset_rows(&self, round: usize, index: usize) -> u32 {
        let unit = self.unit();
        let multiplier = 1u32 << round.min(31);
        (2 * index as u32 * multiplier * unit + (multiplier - 1) * unit) / 2
    }

    /// Row of the middle line of a match cell.
    pub fn center_row(&self, round: usize, index: usize) -> u32 {
        self.offset_rows(round, index) + self.match_height / 2
    }

    /// Height reserved for a round column holding `len` matches.
    pub fn column_height(&self, round: usize, len: usize) -> u32 {
        len as u32 * (1u32 << round.min(31)) * self.unit()
    }
}
