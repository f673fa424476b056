//! Property tests for engine invariants.
//!
//! Uses proptest over seeded random-walk series to verify:
//! 1. Determinism — same input and config, same events and final state
//! 2. CHoCH/BOS exclusivity — a break is CHoCH iff it flips the bias
//! 3. No duplicate breaks — one break per pivot side per confirmation
//! 4. Order-block bound — per-hierarchy stores never exceed capacity,
//!    newest always at the front
//! 5. Crossed-flag monotonicity — only a confirmation clears `crossed`
//! 6. Warm-up silence — nothing fires before the windows fill

use proptest::prelude::*;
use structlab_core::synthetic::random_walk;
use structlab_core::{
    Bias, BreakLabel, EngineConfig, Hierarchy, PivotSlot, Side, StepOutput, StructureEngine,
    StructureEvent, SwingLabel, ORDER_BLOCK_CAPACITY,
};

fn test_config() -> EngineConfig {
    EngineConfig {
        swing_window: 10,
        internal_window: 4,
        equal_window: 3,
        ..EngineConfig::default()
    }
}

fn run_walk(seed: u64, n: usize) -> (StructureEngine, Vec<StepOutput>) {
    let mut engine = StructureEngine::new(test_config()).unwrap();
    let outputs = random_walk(seed, n)
        .iter()
        .map(|bar| engine.process_bar(bar, 1.0).unwrap())
        .collect();
    (engine, outputs)
}

proptest! {
    /// Identical input sequence and configuration produce identical event
    /// sequences and identical final state.
    #[test]
    fn runs_are_deterministic(seed in any::<u64>(), n in 120..240usize) {
        let (engine_a, outputs_a) = run_walk(seed, n);
        let (engine_b, outputs_b) = run_walk(seed, n);

        for (a, b) in outputs_a.iter().zip(&outputs_b) {
            prop_assert_eq!(&a.events, &b.events);
            prop_assert_eq!(&a.order_blocks, &b.order_blocks);
            prop_assert_eq!(a.alerts, b.alerts);
        }
        for hierarchy in [Hierarchy::Swing, Hierarchy::Internal] {
            prop_assert_eq!(
                engine_a.trend(hierarchy).bias,
                engine_b.trend(hierarchy).bias
            );
            prop_assert_eq!(
                engine_a.order_blocks(hierarchy).len(),
                engine_b.order_blocks(hierarchy).len()
            );
        }
        prop_assert_eq!(engine_a.trailing().top, engine_b.trailing().top);
        prop_assert_eq!(engine_a.trailing().bottom, engine_b.trailing().bottom);
    }

    /// Replaying the event stream with an independent bias tracker, every
    /// break labels CHoCH exactly when it flips the tracked bias.
    #[test]
    fn choch_iff_bias_flips(seed in any::<u64>(), n in 120..240usize) {
        let (_, outputs) = run_walk(seed, n);

        let mut bias = [Bias::Neutral; 2];
        for out in &outputs {
            for event in &out.events {
                if let StructureEvent::Break { hierarchy, side, label, .. } = event {
                    let slot = match hierarchy {
                        Hierarchy::Swing => 0,
                        Hierarchy::Internal => 1,
                    };
                    let (flips_from, next) = match side {
                        Side::High => (Bias::Bearish, Bias::Bullish),
                        Side::Low => (Bias::Bullish, Bias::Bearish),
                    };
                    let expected = if bias[slot] == flips_from {
                        BreakLabel::Choch
                    } else {
                        BreakLabel::Bos
                    };
                    prop_assert_eq!(*label, expected);
                    bias[slot] = next;
                }
            }
        }
    }

    /// Between two consecutive confirmations of a swing pivot slot, at most
    /// one break of that side fires. Confirmations are visible as
    /// swing-point annotations.
    #[test]
    fn no_duplicate_swing_breaks(seed in any::<u64>(), n in 120..240usize) {
        let (_, outputs) = run_walk(seed, n);

        let mut high_breaks_since_confirm = 0usize;
        let mut low_breaks_since_confirm = 0usize;
        for out in &outputs {
            for event in &out.events {
                match event {
                    StructureEvent::SwingPoint { label, .. } => match label {
                        SwingLabel::HigherHigh | SwingLabel::LowerHigh => {
                            high_breaks_since_confirm = 0;
                        }
                        SwingLabel::HigherLow | SwingLabel::LowerLow => {
                            low_breaks_since_confirm = 0;
                        }
                    },
                    StructureEvent::Break {
                        hierarchy: Hierarchy::Swing,
                        side,
                        ..
                    } => match side {
                        Side::High => {
                            high_breaks_since_confirm += 1;
                            prop_assert!(high_breaks_since_confirm <= 1);
                        }
                        Side::Low => {
                            low_breaks_since_confirm += 1;
                            prop_assert!(low_breaks_since_confirm <= 1);
                        }
                    },
                    _ => {}
                }
            }
        }
    }

    /// Stores stay within capacity; the step's new block is always at the
    /// front of its store.
    #[test]
    fn order_block_stores_stay_bounded(seed in any::<u64>(), n in 120..240usize) {
        let mut engine = StructureEngine::new(test_config()).unwrap();
        for bar in &random_walk(seed, n) {
            let out = engine.process_bar(bar, 1.0).unwrap();
            for hierarchy in [Hierarchy::Swing, Hierarchy::Internal] {
                prop_assert!(engine.order_blocks(hierarchy).len() <= ORDER_BLOCK_CAPACITY);
            }
            if let Some(newest) = out.order_blocks.last() {
                prop_assert_eq!(
                    engine.order_blocks(newest.hierarchy).newest(),
                    Some(&newest.block)
                );
            }
        }
    }

    /// Once a swing pivot is crossed, only a fresh confirmation of that
    /// slot clears the flag.
    #[test]
    fn crossed_clears_only_on_confirmation(seed in any::<u64>(), n in 120..240usize) {
        let mut engine = StructureEngine::new(test_config()).unwrap();
        let mut was_crossed = [false, false]; // [high, low]
        for bar in &random_walk(seed, n) {
            let out = engine.process_bar(bar, 1.0).unwrap();

            let confirmed_high = out.events.iter().any(|e| matches!(
                e,
                StructureEvent::SwingPoint {
                    label: SwingLabel::HigherHigh | SwingLabel::LowerHigh,
                    ..
                }
            ));
            let confirmed_low = out.events.iter().any(|e| matches!(
                e,
                StructureEvent::SwingPoint {
                    label: SwingLabel::HigherLow | SwingLabel::LowerLow,
                    ..
                }
            ));

            let now_crossed = [
                engine.pivot(PivotSlot::SwingHigh).crossed,
                engine.pivot(PivotSlot::SwingLow).crossed,
            ];
            if was_crossed[0] && !now_crossed[0] {
                prop_assert!(confirmed_high);
            }
            if was_crossed[1] && !now_crossed[1] {
                prop_assert!(confirmed_low);
            }
            was_crossed = now_crossed;
        }
    }

    /// No pass can confirm before its window fills, so the first bars are
    /// silent: no events at all below the smallest window, no breaks below
    /// the internal window.
    #[test]
    fn warm_up_is_silent(seed in any::<u64>()) {
        let (_, outputs) = run_walk(seed, 150);
        let config = test_config();

        for out in &outputs[..config.equal_window] {
            prop_assert!(out.events.is_empty());
            prop_assert!(!out.alerts.any());
        }
        for out in &outputs[..config.internal_window] {
            prop_assert!(
                out.events
                    .iter()
                    .all(|e| !matches!(e, StructureEvent::Break { .. })),
                "no Break events during warm-up"
            );
        }
    }
}
