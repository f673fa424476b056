//! Pivot slots and the six-slot registry.
//!
//! A fixed table of six pivot slots addressed by a [`PivotSlot`] key. Only
//! the registry mutates levels (on confirmation); only the break classifier
//! flips `crossed`.

use serde::{Deserialize, Serialize};

/// Which side of price a pivot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    High,
    Low,
}

/// Structural hierarchy: swing (major, larger lookback) vs internal (minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hierarchy {
    Swing,
    Internal,
}

/// Key into the six-slot pivot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotSlot {
    SwingHigh,
    SwingLow,
    InternalHigh,
    InternalLow,
    EqualHigh,
    EqualLow,
}

impl PivotSlot {
    pub fn structural(hierarchy: Hierarchy, side: Side) -> Self {
        match (hierarchy, side) {
            (Hierarchy::Swing, Side::High) => PivotSlot::SwingHigh,
            (Hierarchy::Swing, Side::Low) => PivotSlot::SwingLow,
            (Hierarchy::Internal, Side::High) => PivotSlot::InternalHigh,
            (Hierarchy::Internal, Side::Low) => PivotSlot::InternalLow,
        }
    }

    pub fn equal(side: Side) -> Self {
        match side {
            Side::High => PivotSlot::EqualHigh,
            Side::Low => PivotSlot::EqualLow,
        }
    }
}

/// State of one pivot slot.
///
/// `current_level` is `None` until the slot's first confirmation; an unset
/// pivot can never be broken and never matches an equal level. Invariant:
/// `crossed == true` means price has already closed beyond `current_level`
/// since it was last set, which suppresses duplicate break events until the
/// next confirmation resets the flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pivot {
    pub current_level: Option<f64>,
    pub last_level: Option<f64>,
    pub crossed: bool,
    pub bar_time: i64,
    pub bar_index: usize,
}

/// The six fixed pivot slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PivotRegistry {
    swing_high: Pivot,
    swing_low: Pivot,
    internal_high: Pivot,
    internal_low: Pivot,
    equal_high: Pivot,
    equal_low: Pivot,
}

impl PivotRegistry {
    pub fn slot(&self, slot: PivotSlot) -> &Pivot {
        match slot {
            PivotSlot::SwingHigh => &self.swing_high,
            PivotSlot::SwingLow => &self.swing_low,
            PivotSlot::InternalHigh => &self.internal_high,
            PivotSlot::InternalLow => &self.internal_low,
            PivotSlot::EqualHigh => &self.equal_high,
            PivotSlot::EqualLow => &self.equal_low,
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: PivotSlot) -> &mut Pivot {
        match slot {
            PivotSlot::SwingHigh => &mut self.swing_high,
            PivotSlot::SwingLow => &mut self.swing_low,
            PivotSlot::InternalHigh => &mut self.internal_high,
            PivotSlot::InternalLow => &mut self.internal_low,
            PivotSlot::EqualHigh => &mut self.equal_high,
            PivotSlot::EqualLow => &mut self.equal_low,
        }
    }

    /// Record a confirmed pivot for `slot`, returning the level it replaced.
    ///
    /// Resets `crossed` — a fresh level has not been broken yet.
    pub(crate) fn confirm(
        &mut self,
        slot: PivotSlot,
        level: f64,
        bar_time: i64,
        bar_index: usize,
    ) -> Option<f64> {
        let pivot = self.slot_mut(slot);
        let previous = pivot.current_level;
        pivot.last_level = previous;
        pivot.current_level = Some(level);
        pivot.crossed = false;
        pivot.bar_time = bar_time;
        pivot.bar_index = bar_index;
        previous
    }
}
