// File: crates/chart-core/tests/rows.rs
// Purpose: In-memory view groups rows into UTC-date leaves in first-appearance order.

use chart_core::rows::{DataView, Measure, RawRow, TableView};
use chrono::{TimeZone, Utc};

fn at(d: u32, h: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, d, h, 0, 0).single().expect("valid")
}

#[test]
fn interleaved_days_keep_first_appearance_and_row_order() {
    let rows = vec![
        (at(3, 9), RawRow::ohlcv(1.0, 1.0, 1.0, 1.0, 1.0)),
        (at(1, 9), RawRow::ohlcv(2.0, 2.0, 2.0, 2.0, 2.0)),
        (at(3, 15), RawRow::ohlcv(3.0, 3.0, 3.0, 3.0, 3.0)),
        (at(2, 0), RawRow::ohlcv(4.0, 4.0, 4.0, 4.0, 4.0)),
        (at(1, 23), RawRow::ohlcv(5.0, 5.0, 5.0, 5.0, 5.0)),
    ];
    let h = TableView::from_rows(rows).time_hierarchy().expect("hierarchy");
    let keys: Vec<_> = h.leaves.iter().map(|l| l.key()).collect();
    assert_eq!(keys, ["2024-8-3", "2024-8-1", "2024-8-2"]);
    let opens: Vec<Vec<f64>> = h.leaves.iter().map(|l| l.rows.iter().filter_map(|r| r.open).collect()).collect();
    assert_eq!(opens, vec![vec![1.0, 3.0], vec![2.0, 5.0], vec![4.0]]);
    assert!(h.leaves.iter().all(|l| l.value == l.value.date_naive().and_hms_opt(0, 0, 0).expect("midnight").and_utc()));
}

#[test]
fn many_rows_per_day_land_in_one_leaf() {
    let rows = (0..24u32).flat_map(|h| (1..=3u32).map(move |d| (at(d, h), RawRow::ohlcv(1.0, 2.0, 0.5, 1.5, 1.0))));
    let h = TableView::from_rows(rows).time_hierarchy().expect("hierarchy");
    assert_eq!(h.leaves.len(), 3);
    assert!(h.leaves.iter().all(|l| l.rows.len() == 24));
}

#[test]
fn measures_map_to_host_axis_names() {
    let row = RawRow::ohlcv(1.0, 2.0, 0.5, 1.5, 9.0);
    let named: Vec<_> = [Measure::Open, Measure::High, Measure::Low, Measure::Close, Measure::Volume]
        .into_iter()
        .map(|m| (m.axis_name(), row.continuous(m)))
        .collect();
    assert_eq!(
        named,
        [("Open", Some(1.0)), ("High", Some(2.0)), ("Low", Some(0.5)), ("Close", Some(1.5)), ("Volume", Some(9.0))]
    );
}
