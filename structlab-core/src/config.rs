//! Engine configuration, validated before any bar is processed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NonPositiveWindow(&'static str),

    #[error("equal-level threshold must be non-negative, got {0}")]
    NegativeThreshold(f64),
}

/// Immutable per-run engine configuration.
///
/// Windows are fractal lookback sizes in bars. The emission toggles filter
/// break events out of the step output without stopping state updates —
/// otherwise the same series would produce divergent state under different
/// display settings. The order-block toggles gate extraction itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Swing (major structure) lookback window.
    pub swing_window: usize,
    /// Internal (minor structure) lookback window.
    pub internal_window: usize,
    /// Equal-level detection lookback window.
    pub equal_window: usize,
    /// Equal-level tolerance as a multiple of the per-bar ATR input.
    pub equal_threshold: f64,
    /// Require break-bar wick confluence for internal breaks.
    pub confluence_filter: bool,
    /// Emit swing-hierarchy break events.
    pub emit_swing_structure: bool,
    /// Emit internal-hierarchy break events.
    pub emit_internal_structure: bool,
    /// Run the equal-level detection pass.
    pub detect_equal_levels: bool,
    /// Emit HH/LH/HL/LL annotations on swing pivot confirmations.
    pub annotate_swings: bool,
    /// Extract swing-hierarchy order blocks.
    pub swing_order_blocks: bool,
    /// Extract internal-hierarchy order blocks.
    pub internal_order_blocks: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            swing_window: 50,
            internal_window: 5,
            equal_window: 3,
            equal_threshold: 0.1,
            confluence_filter: false,
            emit_swing_structure: true,
            emit_internal_structure: true,
            detect_equal_levels: true,
            annotate_swings: true,
            swing_order_blocks: true,
            internal_order_blocks: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swing_window == 0 {
            return Err(ConfigError::NonPositiveWindow("swing_window"));
        }
        if self.internal_window == 0 {
            return Err(ConfigError::NonPositiveWindow("internal_window"));
        }
        if self.equal_window == 0 {
            return Err(ConfigError::NonPositiveWindow("equal_window"));
        }
        if self.equal_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(self.equal_threshold));
        }
        Ok(())
    }
}
