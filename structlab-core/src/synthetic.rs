//! Seeded synthetic bar generation for tests, benchmarks, and the demo.

use crate::domain::bar::Bar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a random-walk bar series. Same seed, same series — results are
/// reproducible regardless of where the bars are consumed.
///
/// Closes drift by ±2.0 per bar from a 100.0 start; wicks extend up to 1.0
/// beyond the body. Times are one-minute spaced unix seconds.
pub fn random_walk(seed: u64, n: usize) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0_f64;
    let mut bars = Vec::with_capacity(n);

    for i in 0..n {
        let open = price;
        let close = price + rng.gen_range(-2.0..2.0);
        let high = open.max(close) + rng.gen_range(0.0..1.0);
        let low = open.min(close) - rng.gen_range(0.0..1.0);
        bars.push(Bar {
            index: i,
            time: 1_600_000_000 + i as i64 * 60,
            open,
            high,
            low,
            close,
        });
        price = close;
    }

    bars
}
