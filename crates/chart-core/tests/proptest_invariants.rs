// File: crates/chart-core/tests/proptest_invariants.rs
// Purpose: Property checks for aggregation extremes, rejection and reconcile idempotence.

use chart_core::aggregate::aggregate;
use chart_core::{
    colorize, reconcile, ChartKind, Directive, Leaf, Observed, Palette, RawRow, RenderConfig, ScaleMode, Size,
    SurfaceOffsets, VolumeVisibility,
};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn leaf(day: i64, rows: Vec<RawRow>) -> Leaf {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single().expect("valid");
    Leaf::new(base + Duration::days(day), rows)
}

fn row_strategy() -> impl Strategy<Value = RawRow> {
    (1.0f64..500.0, 1.0f64..500.0, 1.0f64..500.0, 1.0f64..500.0, 1.0f64..1e6)
        .prop_map(|(o, h, l, c, v)| RawRow::ohlcv(o, h, l, c, v))
}

proptest! {
    #[test]
    fn high_is_max_and_low_is_min(rows in prop::collection::vec(row_strategy(), 1..20)) {
        let agg = aggregate(&[leaf(0, rows.clone())]);
        prop_assert_eq!(agg.bars.len(), 1);
        let bar = &agg.bars[0];
        let max_high = rows.iter().filter_map(|r| r.high).fold(f64::MIN, f64::max);
        let min_low = rows.iter().filter_map(|r| r.low).fold(f64::MAX, f64::min);
        prop_assert_eq!(bar.high, max_high);
        prop_assert_eq!(bar.low, min_low);
        prop_assert_eq!(bar.open, rows[0].open.unwrap_or_default());
        prop_assert_eq!(bar.close, rows[rows.len() - 1].close.unwrap_or_default());
    }

    #[test]
    fn zero_first_open_is_always_rejected(
        rows in prop::collection::vec(row_strategy(), 1..10),
        good in prop::collection::vec(row_strategy(), 1..10),
    ) {
        let mut bad = rows;
        bad[0].open = if bad.len() % 2 == 0 { Some(0.0) } else { None };
        let agg = aggregate(&[leaf(0, bad), leaf(1, good)]);
        prop_assert_eq!(agg.rejected, 1);
        prop_assert_eq!(agg.bars.len(), 1);
        prop_assert_eq!(agg.bars[0].time.as_str(), "2020-1-2");
    }

    #[test]
    fn repeated_reconcile_only_refreshes(
        rows in prop::collection::vec(row_strategy(), 1..10),
        candle in any::<bool>(),
        show in prop_oneof![Just(VolumeVisibility::Yes), Just(VolumeVisibility::No), Just(VolumeVisibility::Unset)],
        log in any::<bool>(),
        w in 20u32..4000,
        h in 20u32..4000,
    ) {
        let agg = aggregate(&[leaf(0, rows)]);
        let vol = colorize(&agg.bars, &Palette::default());
        let obs = Observed {
            chart_kind: Some(if candle { ChartKind::Candlestick } else { ChartKind::Bar }),
            volume: show,
            scale_mode: ScaleMode::from_property(Some(log)),
            viewport: Size::new(w, h),
            offsets: SurfaceOffsets::default(),
        };
        let first = reconcile(&RenderConfig::default(), &obs, &agg.bars, &vol);
        let again = reconcile(&first.config, &obs, &agg.bars, &vol);
        prop_assert!(again.directives.iter().all(|d| matches!(
            d,
            Directive::SetScaleMode(_) | Directive::SetPriceData(_) | Directive::SetVolumeData(_)
        )));
        prop_assert_eq!(&again.config, &first.config);
    }
}
