//! Fractal leg detection and leg-transition edge detection.
//!
//! A bar `i - window` is a confirmed local extreme once none of the `window`
//! bars after it exceed it. The leg direction flips on that confirmation;
//! the flip itself (not the direction) is the pivot signal.

use crate::domain::pivot::Side;

/// Current directional regime between confirmed pivots. Bullish means the
/// last confirmed pivot was a low; Bearish means it was a high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Bullish,
    Bearish,
}

impl Leg {
    /// Initial state of every detection pass.
    pub const INITIAL: Leg = Leg::Bearish;
}

/// Determine the leg direction at `index` for the given lookback window.
///
/// With `index < window` there is no lagged bar yet; the previous leg is
/// held unchanged (warm-up, not an error). Comparisons are strict: a tie
/// between the lagged bar and its window never confirms a pivot.
pub fn detect(highs: &[f64], lows: &[f64], window: usize, index: usize, previous: Leg) -> Leg {
    if index < window {
        return previous;
    }

    let lagged = index - window;
    let window_high = highs[lagged + 1..=index]
        .iter()
        .fold(f64::NEG_INFINITY, |acc, &h| acc.max(h));
    if highs[lagged] > window_high {
        return Leg::Bearish;
    }

    let window_low = lows[lagged + 1..=index]
        .iter()
        .fold(f64::INFINITY, |acc, &l| acc.min(l));
    if lows[lagged] < window_low {
        return Leg::Bullish;
    }

    previous
}

/// Edge-detect a leg change. A flip to Bullish confirms a low pivot at the
/// lagged bar; a flip to Bearish confirms a high pivot. No change, no pivot.
pub fn transition(previous: Leg, current: Leg) -> Option<Side> {
    match (previous, current) {
        (Leg::Bearish, Leg::Bullish) => Some(Side::Low),
        (Leg::Bullish, Leg::Bearish) => Some(Side::High),
        _ => None,
    }
}
