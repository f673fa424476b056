//! Structure-break classification — the core state machine.
//!
//! Per hierarchy, two guarded tests per bar: close above the high pivot
//! (bullish break) and close below the low pivot (bearish break). Both are
//! evaluated independently every bar; on gapping data both can fire in the
//! same step. A break is CHoCH when it flips the hierarchy's bias,
//! otherwise BOS. Guard failure changes nothing and emits nothing.

use crate::domain::event::{BreakLabel, NewOrderBlock, StepOutput, StructureEvent};
use crate::domain::pivot::{Hierarchy, PivotSlot, Side};
use crate::domain::trend::Bias;
use crate::engine::order_blocks;
use crate::engine::StructureEngine;

impl StructureEngine {
    pub(crate) fn classify_hierarchy(&mut self, hierarchy: Hierarchy, out: &mut StepOutput) {
        let index = self.series.last_index();
        let open = self.series.opens()[index];
        let high = self.series.highs()[index];
        let low = self.series.lows()[index];
        let close = self.series.closes()[index];
        let bar_time = self.series.times()[index];

        // Wick confluence for internal breaks. Strict inequality on both
        // sides, so a symmetric candle passes neither.
        let upper_wick = high - close.max(open);
        let lower_wick = close.min(open) - low;
        let bullish_shaped = upper_wick > lower_wick;
        let bearish_shaped = upper_wick < lower_wick;

        // ── Bullish break: close above the high pivot ────────────────────
        let high_slot = PivotSlot::structural(hierarchy, Side::High);
        let pivot = self.pivots.slot(high_slot);
        let fires = match pivot.current_level {
            Some(level) => {
                let extra = match hierarchy {
                    Hierarchy::Swing => true,
                    Hierarchy::Internal => {
                        // Suppress when internal and swing highs coincide:
                        // the swing test already covers that level.
                        self.pivots.slot(PivotSlot::InternalHigh).current_level
                            != self.pivots.slot(PivotSlot::SwingHigh).current_level
                            && (!self.config.confluence_filter || bullish_shaped)
                    }
                };
                !pivot.crossed && close > level && extra
            }
            None => false,
        };
        if fires {
            let level = self.pivots.slot(high_slot).current_level.unwrap();
            let trend = self.trend_mut(hierarchy);
            let label = if trend.bias == Bias::Bearish {
                BreakLabel::Choch
            } else {
                BreakLabel::Bos
            };
            trend.bias = Bias::Bullish;
            self.pivots.slot_mut(high_slot).crossed = true;

            match (hierarchy, label) {
                (Hierarchy::Swing, BreakLabel::Bos) => out.alerts.swing_bullish_bos = true,
                (Hierarchy::Swing, BreakLabel::Choch) => out.alerts.swing_bullish_choch = true,
                (Hierarchy::Internal, BreakLabel::Bos) => out.alerts.internal_bullish_bos = true,
                (Hierarchy::Internal, BreakLabel::Choch) => {
                    out.alerts.internal_bullish_choch = true
                }
            }
            if self.emits_breaks(hierarchy) {
                out.events.push(StructureEvent::Break {
                    hierarchy,
                    side: Side::High,
                    label,
                    level,
                    bar_index: index,
                    bar_time,
                });
            }
            self.store_order_block(hierarchy, Bias::Bullish, out);
        }

        // ── Bearish break: close below the low pivot ─────────────────────
        let low_slot = PivotSlot::structural(hierarchy, Side::Low);
        let pivot = self.pivots.slot(low_slot);
        let fires = match pivot.current_level {
            Some(level) => {
                let extra = match hierarchy {
                    Hierarchy::Swing => true,
                    Hierarchy::Internal => {
                        self.pivots.slot(PivotSlot::InternalLow).current_level
                            != self.pivots.slot(PivotSlot::SwingLow).current_level
                            && (!self.config.confluence_filter || bearish_shaped)
                    }
                };
                !pivot.crossed && close < level && extra
            }
            None => false,
        };
        if fires {
            let level = self.pivots.slot(low_slot).current_level.unwrap();
            let trend = self.trend_mut(hierarchy);
            let label = if trend.bias == Bias::Bullish {
                BreakLabel::Choch
            } else {
                BreakLabel::Bos
            };
            trend.bias = Bias::Bearish;
            self.pivots.slot_mut(low_slot).crossed = true;

            match (hierarchy, label) {
                (Hierarchy::Swing, BreakLabel::Bos) => out.alerts.swing_bearish_bos = true,
                (Hierarchy::Swing, BreakLabel::Choch) => out.alerts.swing_bearish_choch = true,
                (Hierarchy::Internal, BreakLabel::Bos) => out.alerts.internal_bearish_bos = true,
                (Hierarchy::Internal, BreakLabel::Choch) => {
                    out.alerts.internal_bearish_choch = true
                }
            }
            if self.emits_breaks(hierarchy) {
                out.events.push(StructureEvent::Break {
                    hierarchy,
                    side: Side::Low,
                    label,
                    level,
                    bar_index: index,
                    bar_time,
                });
            }
            self.store_order_block(hierarchy, Bias::Bearish, out);
        }
    }

    fn emits_breaks(&self, hierarchy: Hierarchy) -> bool {
        match hierarchy {
            Hierarchy::Swing => self.config.emit_swing_structure,
            Hierarchy::Internal => self.config.emit_internal_structure,
        }
    }

    /// Extract and record the order block behind a confirmed break.
    fn store_order_block(&mut self, hierarchy: Hierarchy, bias: Bias, out: &mut StepOutput) {
        let enabled = match hierarchy {
            Hierarchy::Swing => self.config.swing_order_blocks,
            Hierarchy::Internal => self.config.internal_order_blocks,
        };
        if !enabled {
            return;
        }

        // A bullish break crossed the high pivot; the demand scan starts at
        // that pivot's bar. Mirrored for bearish.
        let slot = match bias {
            Bias::Bullish => PivotSlot::structural(hierarchy, Side::High),
            _ => PivotSlot::structural(hierarchy, Side::Low),
        };
        let pivot = self.pivots.slot(slot).clone();
        let current_index = self.series.last_index();

        if let Some(block) = order_blocks::extract(&self.series, &pivot, bias, current_index) {
            match (hierarchy, bias) {
                (Hierarchy::Swing, Bias::Bullish) => out.alerts.swing_bullish_order_block = true,
                (Hierarchy::Swing, _) => out.alerts.swing_bearish_order_block = true,
                (Hierarchy::Internal, Bias::Bullish) => {
                    out.alerts.internal_bullish_order_block = true
                }
                (Hierarchy::Internal, _) => out.alerts.internal_bearish_order_block = true,
            }
            let store = match hierarchy {
                Hierarchy::Swing => &mut self.swing_blocks,
                Hierarchy::Internal => &mut self.internal_blocks,
            };
            store.insert(block.clone());
            out.order_blocks.push(NewOrderBlock { hierarchy, block });
        }
    }
}
