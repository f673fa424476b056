//! Structural events and the per-step output bundle.

use crate::domain::order_block::OrderBlock;
use crate::domain::pivot::{Hierarchy, Side};
use serde::{Deserialize, Serialize};

/// Break classification: continuation vs reversal of the trend bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakLabel {
    /// Break of Structure — continues (or initiates) the existing bias.
    Bos,
    /// Change of Character — reverses the existing bias.
    Choch,
}

/// Classification of a newly confirmed swing pivot against the previous
/// level of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingLabel {
    HigherHigh,
    LowerHigh,
    HigherLow,
    LowerLow,
}

/// One structural event emitted by a per-bar step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructureEvent {
    /// Close beyond a hierarchy's pivot. `side` names the broken pivot:
    /// `High` is a bullish break, `Low` a bearish break.
    Break {
        hierarchy: Hierarchy,
        side: Side,
        label: BreakLabel,
        level: f64,
        bar_index: usize,
        bar_time: i64,
    },
    /// Two same-side pivots within the ATR-scaled tolerance.
    EqualLevel {
        side: Side,
        previous_level: f64,
        level: f64,
        previous_index: usize,
        pivot_index: usize,
        pivot_time: i64,
    },
    /// Swing-hierarchy pivot confirmation, annotated against the slot's
    /// previous level (HH/LH for highs, HL/LL for lows).
    SwingPoint {
        label: SwingLabel,
        level: f64,
        bar_index: usize,
        bar_time: i64,
    },
}

/// Fired-event flags for one step. Reset every bar.
///
/// Flags mirror state changes unconditionally; the event list in
/// [`StepOutput`] is what the emission toggles filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSet {
    pub internal_bullish_bos: bool,
    pub internal_bearish_bos: bool,
    pub internal_bullish_choch: bool,
    pub internal_bearish_choch: bool,
    pub swing_bullish_bos: bool,
    pub swing_bearish_bos: bool,
    pub swing_bullish_choch: bool,
    pub swing_bearish_choch: bool,
    pub internal_bullish_order_block: bool,
    pub internal_bearish_order_block: bool,
    pub swing_bullish_order_block: bool,
    pub swing_bearish_order_block: bool,
    pub equal_highs: bool,
    pub equal_lows: bool,
}

impl AlertSet {
    pub fn any(&self) -> bool {
        *self != AlertSet::default()
    }
}

/// A block created during the current step, tagged by hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderBlock {
    pub hierarchy: Hierarchy,
    pub block: OrderBlock,
}

/// Everything one call to `process_bar` produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepOutput {
    pub events: Vec<StructureEvent>,
    pub order_blocks: Vec<NewOrderBlock>,
    pub alerts: AlertSet,
}
