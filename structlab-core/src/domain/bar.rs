//! Bar — the fundamental market data unit — and its append-only container.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLC bar for a single symbol at a single point in time.
///
/// `time` is unix seconds; `index` is the zero-based position in the series.
/// Bars are immutable once appended to a [`BarSeries`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub index: usize,
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Basic OHLC sanity check: high is the top of the bar, low the bottom.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Errors from appending to a [`BarSeries`].
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("bar index {got} does not follow series length {expected}")]
    IndexMismatch { expected: usize, got: usize },

    #[error("bar time {got} is not after previous bar time {prev}")]
    NonMonotonicTime { prev: i64, got: i64 },
}

/// Append-only, index-addressable bar storage.
///
/// Column layout (one `Vec` per field) because the detection passes scan
/// high/low/time windows, never whole bars. `push` enforces the two series
/// invariants: the index equals the current length and time strictly
/// increases. Everything downstream assumes both hold.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    times: Vec<i64>,
    opens: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
    closes: Vec<f64>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bar: &Bar) -> Result<(), SeriesError> {
        if bar.index != self.times.len() {
            return Err(SeriesError::IndexMismatch {
                expected: self.times.len(),
                got: bar.index,
            });
        }
        if let Some(&prev) = self.times.last() {
            if bar.time <= prev {
                return Err(SeriesError::NonMonotonicTime {
                    prev,
                    got: bar.time,
                });
            }
        }
        self.times.push(bar.time);
        self.opens.push(bar.open);
        self.highs.push(bar.high);
        self.lows.push(bar.low);
        self.closes.push(bar.close);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Index of the most recently appended bar. Panics on an empty series.
    pub fn last_index(&self) -> usize {
        self.times.len() - 1
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn opens(&self) -> &[f64] {
        &self.opens
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(index: usize, time: i64) -> Bar {
        Bar {
            index,
            time,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
        }
    }

    #[test]
    fn push_accepts_ordered_bars() {
        let mut series = BarSeries::new();
        series.push(&bar(0, 1_600_000_000)).unwrap();
        series.push(&bar(1, 1_600_000_060)).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_index(), 1);
    }

    #[test]
    fn push_rejects_index_gap() {
        let mut series = BarSeries::new();
        series.push(&bar(0, 1_600_000_000)).unwrap();
        let err = series.push(&bar(2, 1_600_000_060)).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::IndexMismatch { expected: 1, got: 2 }
        ));
    }

    #[test]
    fn push_rejects_stale_time() {
        let mut series = BarSeries::new();
        series.push(&bar(0, 1_600_000_060)).unwrap();
        let err = series.push(&bar(1, 1_600_000_060)).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonicTime { .. }));
    }

    #[test]
    fn bar_sanity() {
        assert!(bar(0, 0).is_sane());
        let mut b = bar(0, 0);
        b.high = 98.0; // below low
        assert!(!b.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let b = bar(3, 1_600_000_180);
        let json = serde_json::to_string(&b).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(b.index, deser.index);
        assert_eq!(b.time, deser.time);
        assert_eq!(b.close, deser.close);
    }
}
