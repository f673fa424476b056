//! structlab-core — incremental market-structure detection.
//!
//! Converts a sequential price-bar stream into discrete structural events:
//! - fractal swing pivots over two lookback hierarchies (swing + internal)
//! - Break-of-Structure / Change-of-Character classification per hierarchy
//! - bounded supply/demand order-block extraction on confirmed breaks
//! - equal-high/low matches within an ATR-scaled tolerance
//!
//! The engine is strictly sequential and single-threaded: one
//! [`engine::StructureEngine`] per symbol, one synchronous step per bar.
//! It consumes bars and an externally computed ATR value; it performs no
//! I/O, renders nothing, and persists nothing.

pub mod config;
pub mod domain;
pub mod engine;
pub mod synthetic;

pub use config::{ConfigError, EngineConfig};
pub use domain::{
    AlertSet, Bar, BarSeries, Bias, BreakLabel, Hierarchy, NewOrderBlock, OrderBlock,
    OrderBlockStore, Pivot, PivotSlot, SeriesError, Side, StepOutput, StructureEvent, SwingLabel,
    TrailingExtremes, Trend, ORDER_BLOCK_CAPACITY,
};
pub use engine::StructureEngine;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the engine and its outputs move cleanly to a
    /// worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<StructureEngine>();
        require_sync::<StructureEngine>();
        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<StepOutput>();
        require_sync::<StepOutput>();
        require_send::<StructureEvent>();
        require_sync::<StructureEvent>();
        require_send::<OrderBlock>();
        require_sync::<OrderBlock>();
        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
    }
}
