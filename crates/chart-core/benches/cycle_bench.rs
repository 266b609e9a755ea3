// File: crates/chart-core/benches/cycle_bench.rs
// Summary: Aggregation + reconciliation throughput over synthetic daily leaves.

use chart_core::aggregate::aggregate;
use chart_core::{colorize, reconcile, ChartKind, Leaf, Observed, Palette, RawRow, RenderConfig, ScaleMode, Size, SurfaceOffsets, VolumeVisibility};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn gen_leaves(days: usize, rows_per_day: usize) -> Vec<Leaf> {
    let base = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).single().expect("valid date");
    let mut price = 100.0f64;
    (0..days)
        .map(|d| {
            let rows = (0..rows_per_day)
                .map(|_| {
                    let o = price;
                    let c = o + 0.2;
                    price = c;
                    RawRow::ohlcv(o, o + 1.0, o - 1.0, c, 1_000.0)
                })
                .collect();
            Leaf::new(base + Duration::days(d as i64), rows)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_daily");
    for &days in &[1_000usize, 5_000usize] {
        for &per_day in &[1usize, 24usize] {
            let leaves = gen_leaves(days, per_day);
            group.bench_with_input(BenchmarkId::from_parameter(format!("d{days}_r{per_day}")), &leaves, |b, l| {
                b.iter(|| black_box(aggregate(l)));
            });
        }
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let agg = aggregate(&gen_leaves(5_000, 1));
    let vol = colorize(&agg.bars, &Palette::default());
    let obs = Observed {
        chart_kind: Some(ChartKind::Candlestick),
        volume: VolumeVisibility::Yes,
        scale_mode: ScaleMode::Linear,
        viewport: Size::new(1024, 640),
        offsets: SurfaceOffsets::default(),
    };
    let warm = reconcile(&RenderConfig::default(), &obs, &agg.bars, &vol).config;
    c.bench_function("reconcile_steady_state_5000", |b| {
        b.iter_batched(
            || warm.clone(),
            |cfg| black_box(reconcile(&cfg, &obs, &agg.bars, &vol)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_aggregate, bench_reconcile);
criterion_main!(benches);
