//! The incremental market-structure engine.
//!
//! One [`StructureEngine`] per symbol. Bars are fed strictly in order
//! through [`StructureEngine::process_bar`]; each call is one synchronous,
//! bar-atomic step:
//!
//! 1. swing detection pass (leg + pivot confirmation)
//! 2. internal detection pass
//! 3. equal-level detection pass (toggle-gated)
//! 4. break classification, internal then swing, extracting order blocks
//!    on each confirmed break
//!
//! No state is observable mid-step; everything a step produced comes back
//! in its [`StepOutput`].

pub mod leg;
mod order_blocks;
mod pivots;
mod structure;

use crate::config::{ConfigError, EngineConfig};
use crate::domain::bar::{Bar, BarSeries, SeriesError};
use crate::domain::event::StepOutput;
use crate::domain::order_block::OrderBlockStore;
use crate::domain::pivot::{Hierarchy, Pivot, PivotRegistry, PivotSlot};
use crate::domain::trend::{TrailingExtremes, Trend};
use leg::Leg;
use pivots::DetectionTarget;

/// Single-symbol market-structure detection engine.
///
/// Owns all mutable state; nothing is aliased externally. Multiple symbols
/// run as independent instances with no shared state.
#[derive(Debug, Clone)]
pub struct StructureEngine {
    pub(crate) config: EngineConfig,
    pub(crate) series: BarSeries,
    pub(crate) swing_leg: Leg,
    pub(crate) internal_leg: Leg,
    pub(crate) equal_leg: Leg,
    pub(crate) pivots: PivotRegistry,
    pub(crate) swing_trend: Trend,
    pub(crate) internal_trend: Trend,
    pub(crate) trailing: TrailingExtremes,
    pub(crate) swing_blocks: OrderBlockStore,
    pub(crate) internal_blocks: OrderBlockStore,
}

impl StructureEngine {
    /// Build an engine, rejecting an invalid configuration before any bar
    /// is accepted.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            series: BarSeries::new(),
            swing_leg: Leg::INITIAL,
            internal_leg: Leg::INITIAL,
            equal_leg: Leg::INITIAL,
            pivots: PivotRegistry::default(),
            swing_trend: Trend::default(),
            internal_trend: Trend::default(),
            trailing: TrailingExtremes::default(),
            swing_blocks: OrderBlockStore::new(),
            internal_blocks: OrderBlockStore::new(),
        })
    }

    /// Process one bar. `atr` is the externally computed ATR for this bar;
    /// it only scales the equal-level tolerance.
    ///
    /// Returns every event, order block, and alert flag the step fired.
    /// Fails only if the bar breaks the series ordering invariants, in
    /// which case no state was modified.
    pub fn process_bar(&mut self, bar: &Bar, atr: f64) -> Result<StepOutput, SeriesError> {
        self.series.push(bar)?;
        let mut out = StepOutput::default();

        self.run_detection_pass(DetectionTarget::Swing, atr, &mut out);
        self.run_detection_pass(DetectionTarget::Internal, atr, &mut out);
        if self.config.detect_equal_levels {
            self.run_detection_pass(DetectionTarget::Equal, atr, &mut out);
        }

        self.classify_hierarchy(Hierarchy::Internal, &mut out);
        self.classify_hierarchy(Hierarchy::Swing, &mut out);

        Ok(out)
    }

    // ── Read-only state access ───────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn series(&self) -> &BarSeries {
        &self.series
    }

    pub fn pivot(&self, slot: PivotSlot) -> &Pivot {
        self.pivots.slot(slot)
    }

    pub fn trend(&self, hierarchy: Hierarchy) -> &Trend {
        match hierarchy {
            Hierarchy::Swing => &self.swing_trend,
            Hierarchy::Internal => &self.internal_trend,
        }
    }

    pub fn trailing(&self) -> &TrailingExtremes {
        &self.trailing
    }

    pub fn order_blocks(&self, hierarchy: Hierarchy) -> &OrderBlockStore {
        match hierarchy {
            Hierarchy::Swing => &self.swing_blocks,
            Hierarchy::Internal => &self.internal_blocks,
        }
    }

    pub(crate) fn trend_mut(&mut self, hierarchy: Hierarchy) -> &mut Trend {
        match hierarchy {
            Hierarchy::Swing => &mut self.swing_trend,
            Hierarchy::Internal => &mut self.internal_trend,
        }
    }
}
