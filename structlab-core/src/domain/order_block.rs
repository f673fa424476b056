//! Order blocks — supply/demand zone records — and their bounded store.

use crate::domain::trend::Bias;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum order blocks retained per hierarchy.
pub const ORDER_BLOCK_CAPACITY: usize = 100;

/// The most extreme candle between a pivot and its subsequent break.
///
/// A Bullish block marks a demand zone (lowest candle before a bullish
/// break); a Bearish block marks a supply zone (highest candle before a
/// bearish break). Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub bar_high: f64,
    pub bar_low: f64,
    pub bar_time: i64,
    pub bias: Bias,
}

/// Fixed-capacity, newest-first order-block collection.
///
/// Insertion goes to the front; once at capacity the oldest (tail) entry is
/// evicted first. Index 0 is always the newest block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBlockStore {
    blocks: VecDeque<OrderBlock>,
}

impl OrderBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, block: OrderBlock) {
        if self.blocks.len() >= ORDER_BLOCK_CAPACITY {
            self.blocks.pop_back();
        }
        self.blocks.push_front(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OrderBlock> {
        self.blocks.get(index)
    }

    /// Newest block, if any.
    pub fn newest(&self) -> Option<&OrderBlock> {
        self.blocks.front()
    }

    /// Oldest retained block, if any.
    pub fn oldest(&self) -> Option<&OrderBlock> {
        self.blocks.back()
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &OrderBlock> {
        self.blocks.iter()
    }
}
