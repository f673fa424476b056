//! Detection passes: leg tracking, pivot confirmation, equal levels,
//! trailing extremes, swing annotations.

use crate::domain::event::{StepOutput, StructureEvent, SwingLabel};
use crate::domain::pivot::{Hierarchy, PivotSlot, Side};
use crate::engine::leg::{self, Leg};
use crate::engine::StructureEngine;

/// Which slot family a detection pass feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetectionTarget {
    Swing,
    Internal,
    Equal,
}

impl StructureEngine {
    /// One leg-detection pass over the current bar.
    ///
    /// Holds the pass's leg state across bars; a leg flip confirms a pivot
    /// at the lagged bar and routes it to the target's slots.
    pub(crate) fn run_detection_pass(
        &mut self,
        target: DetectionTarget,
        atr: f64,
        out: &mut StepOutput,
    ) {
        let window = match target {
            DetectionTarget::Swing => self.config.swing_window,
            DetectionTarget::Internal => self.config.internal_window,
            DetectionTarget::Equal => self.config.equal_window,
        };
        let index = self.series.last_index();
        let previous = self.leg(target);
        let current = leg::detect(self.series.highs(), self.series.lows(), window, index, previous);

        if let Some(side) = leg::transition(previous, current) {
            self.apply_confirmed_pivot(target, side, index - window, atr, out);
        }
        *self.leg_mut(target) = current;
    }

    /// Apply a confirmed pivot at `pivot_index` to its slot.
    ///
    /// Equal-target confirmations are checked against the slot's prior level
    /// before it is overwritten; swing-target confirmations additionally
    /// update the trailing extremes and emit the HH/LH/HL/LL annotation.
    fn apply_confirmed_pivot(
        &mut self,
        target: DetectionTarget,
        side: Side,
        pivot_index: usize,
        atr: f64,
        out: &mut StepOutput,
    ) {
        let level = match side {
            Side::High => self.series.highs()[pivot_index],
            Side::Low => self.series.lows()[pivot_index],
        };
        let bar_time = self.series.times()[pivot_index];

        let slot = match target {
            DetectionTarget::Swing => PivotSlot::structural(Hierarchy::Swing, side),
            DetectionTarget::Internal => PivotSlot::structural(Hierarchy::Internal, side),
            DetectionTarget::Equal => PivotSlot::equal(side),
        };

        if target == DetectionTarget::Equal {
            let prior = self.pivots.slot(slot);
            if let Some(previous_level) = prior.current_level {
                if (previous_level - level).abs() < self.config.equal_threshold * atr {
                    match side {
                        Side::High => out.alerts.equal_highs = true,
                        Side::Low => out.alerts.equal_lows = true,
                    }
                    out.events.push(StructureEvent::EqualLevel {
                        side,
                        previous_level,
                        level,
                        previous_index: prior.bar_index,
                        pivot_index,
                        pivot_time: bar_time,
                    });
                }
            }
        }

        let previous = self.pivots.confirm(slot, level, bar_time, pivot_index);

        if target == DetectionTarget::Swing {
            match side {
                Side::High => {
                    self.trailing.top = level;
                    self.trailing.last_top_time = bar_time;
                }
                Side::Low => {
                    self.trailing.bottom = level;
                    self.trailing.last_bottom_time = bar_time;
                }
            }
            self.trailing.bar_time = bar_time;
            self.trailing.bar_index = pivot_index;

            if self.config.annotate_swings {
                // A first confirmation has no previous level to beat and
                // falls to the weaker label.
                let label = match side {
                    Side::High => {
                        if previous.is_some_and(|p| level > p) {
                            SwingLabel::HigherHigh
                        } else {
                            SwingLabel::LowerHigh
                        }
                    }
                    Side::Low => {
                        if previous.is_some_and(|p| level < p) {
                            SwingLabel::LowerLow
                        } else {
                            SwingLabel::HigherLow
                        }
                    }
                };
                out.events.push(StructureEvent::SwingPoint {
                    label,
                    level,
                    bar_index: pivot_index,
                    bar_time,
                });
            }
        }
    }

    pub(crate) fn leg(&self, target: DetectionTarget) -> Leg {
        match target {
            DetectionTarget::Swing => self.swing_leg,
            DetectionTarget::Internal => self.internal_leg,
            DetectionTarget::Equal => self.equal_leg,
        }
    }

    fn leg_mut(&mut self, target: DetectionTarget) -> &mut Leg {
        match target {
            DetectionTarget::Swing => &mut self.swing_leg,
            DetectionTarget::Internal => &mut self.internal_leg,
            DetectionTarget::Equal => &mut self.equal_leg,
        }
    }
}
