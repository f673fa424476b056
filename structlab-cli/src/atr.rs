//! Incremental ATR with Wilder smoothing.
//!
//! The detection core consumes ATR as a plain numeric input; computing it is
//! the caller's job, so it lives here. True range:
//! max(high-low, |high-prev_close|, |low-prev_close|). Wilder smoothing is
//! an EMA with alpha = 1/period, seeded with the mean of the first `period`
//! true ranges. Until the seed window fills, the running mean is returned so
//! every bar has a usable value.

#[derive(Debug)]
pub struct WilderAtr {
    period: usize,
    prev_close: Option<f64>,
    seed_sum: f64,
    seed_count: usize,
    atr: Option<f64>,
}

impl WilderAtr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            prev_close: None,
            seed_sum: 0.0,
            seed_count: 0,
            atr: None,
        }
    }

    /// Feed one bar, returning the ATR value for it.
    pub fn update(&mut self, high: f64, low: f64, close: f64) -> f64 {
        let tr = match self.prev_close {
            // First bar has no previous close: plain range.
            None => high - low,
            Some(pc) => (high - low).max((high - pc).abs()).max((low - pc).abs()),
        };
        self.prev_close = Some(close);

        match self.atr {
            Some(prev) => {
                let next = (prev * (self.period as f64 - 1.0) + tr) / self.period as f64;
                self.atr = Some(next);
                next
            }
            None => {
                self.seed_sum += tr;
                self.seed_count += 1;
                let mean = self.seed_sum / self.seed_count as f64;
                if self.seed_count == self.period {
                    self.atr = Some(mean);
                }
                mean
            }
        }
    }
}
