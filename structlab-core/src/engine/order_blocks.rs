//! Order-block extraction: the extremal candle between pivot and break.

use crate::domain::bar::BarSeries;
use crate::domain::order_block::OrderBlock;
use crate::domain::pivot::Pivot;
use crate::domain::trend::Bias;

/// Scan the half-open range `[pivot.bar_index, current_index)` for the
/// extremal candle and build an order block from it.
///
/// Bullish bias scans for the minimum low (demand zone), bearish for the
/// maximum high (supply zone); ties resolve to the lowest index. An empty
/// or out-of-bounds range is a silent no-op.
pub(crate) fn extract(
    series: &BarSeries,
    pivot: &Pivot,
    bias: Bias,
    current_index: usize,
) -> Option<OrderBlock> {
    let start = pivot.bar_index;
    if start >= current_index || current_index > series.len() {
        return None;
    }

    let highs = series.highs();
    let lows = series.lows();

    let mut target = start;
    match bias {
        Bias::Bearish => {
            for i in start + 1..current_index {
                if highs[i] > highs[target] {
                    target = i;
                }
            }
        }
        Bias::Bullish => {
            for i in start + 1..current_index {
                if lows[i] < lows[target] {
                    target = i;
                }
            }
        }
        // Breaks always carry a directional bias.
        Bias::Neutral => return None,
    }

    Some(OrderBlock {
        bar_high: highs[target],
        bar_low: lows[target],
        bar_time: series.times()[target],
        bias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;

    fn series_from(highs: &[f64], lows: &[f64]) -> BarSeries {
        let mut series = BarSeries::new();
        for (i, (&h, &l)) in highs.iter().zip(lows).enumerate() {
            series
                .push(&Bar {
                    index: i,
                    time: 1_600_000_000 + i as i64 * 60,
                    open: (h + l) / 2.0,
                    high: h,
                    low: l,
                    close: (h + l) / 2.0,
                })
                .unwrap();
        }
        series
    }

    fn pivot_at(index: usize) -> Pivot {
        Pivot {
            current_level: Some(0.0),
            last_level: None,
            crossed: false,
            bar_time: 0,
            bar_index: index,
        }
    }

    #[test]
    fn bullish_scan_finds_minimum_low() {
        let series = series_from(
            &[11.0, 10.0, 9.0, 10.0, 11.0, 12.0],
            &[10.0, 9.0, 8.0, 9.0, 10.0, 11.0],
        );
        let block = extract(&series, &pivot_at(1), Bias::Bullish, 5).unwrap();
        assert_eq!(block.bar_low, 8.0);
        assert_eq!(block.bar_high, 9.0);
        assert_eq!(block.bar_time, 1_600_000_000 + 2 * 60);
    }

    #[test]
    fn bearish_scan_finds_maximum_high() {
        let series = series_from(
            &[10.0, 12.0, 11.0, 10.0, 9.0],
            &[9.0, 11.0, 10.0, 9.0, 8.0],
        );
        let block = extract(&series, &pivot_at(0), Bias::Bearish, 4).unwrap();
        assert_eq!(block.bar_high, 12.0);
        assert_eq!(block.bias, Bias::Bearish);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let series = series_from(
            &[10.0, 9.0, 9.5, 9.0, 10.0],
            &[9.0, 8.0, 8.5, 8.0, 9.0],
        );
        // Lows at index 1 and 3 tie; index 1 wins.
        let block = extract(&series, &pivot_at(0), Bias::Bullish, 4).unwrap();
        assert_eq!(block.bar_time, 1_600_000_000 + 60);
    }

    #[test]
    fn empty_range_is_noop() {
        let series = series_from(&[10.0, 11.0], &[9.0, 10.0]);
        assert!(extract(&series, &pivot_at(1), Bias::Bullish, 1).is_none());
        assert!(extract(&series, &pivot_at(5), Bias::Bullish, 2).is_none());
    }

    #[test]
    fn range_past_series_end_is_noop() {
        let series = series_from(&[10.0, 11.0], &[9.0, 10.0]);
        assert!(extract(&series, &pivot_at(0), Bias::Bearish, 3).is_none());
    }
}
