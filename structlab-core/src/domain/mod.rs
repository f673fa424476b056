//! Domain types: bars, pivots, trend state, order blocks, events.

pub mod bar;
pub mod event;
pub mod order_block;
pub mod pivot;
pub mod trend;

pub use bar::{Bar, BarSeries, SeriesError};
pub use event::{AlertSet, BreakLabel, NewOrderBlock, StepOutput, StructureEvent, SwingLabel};
pub use order_block::{OrderBlock, OrderBlockStore, ORDER_BLOCK_CAPACITY};
pub use pivot::{Hierarchy, Pivot, PivotRegistry, PivotSlot, Side};
pub use trend::{Bias, TrailingExtremes, Trend};
