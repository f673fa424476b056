//! Trend bias and trailing swing extremes.

use serde::{Deserialize, Serialize};

/// Directional bias. `Neutral` until the first structure break of a
/// hierarchy; a break against a Neutral trend labels as BOS, not CHoCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Per-hierarchy trend state. Mutated only by the break classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trend {
    pub bias: Bias,
}

/// Running top/bottom of the most recent swing structure.
///
/// Updated only from swing-hierarchy pivot confirmations — internal and
/// equal-level confirmations never touch it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailingExtremes {
    pub top: f64,
    pub bottom: f64,
    pub bar_time: i64,
    pub bar_index: usize,
    pub last_top_time: i64,
    pub last_bottom_time: i64,
}
