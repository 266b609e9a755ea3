// File: crates/chart-core/src/aggregate.rs
// Summary: Bucket aggregation: one OHLC+volume bar per date leaf, dropping incomplete buckets.

use tracing::debug;

use crate::rows::{Leaf, Measure, RawRow};
use crate::series::PriceBar;

/// Why a bucket was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Open,
    High,
    Low,
    Close,
    Volume,
}

/// Output of one aggregation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregation {
    pub bars: Vec<PriceBar>,
    /// Non-empty buckets dropped for a missing value.
    pub rejected: usize,
}

/// The one place deciding whether a measure counts as missing.
/// Zero and NaN are treated like an absent value, so a bucket whose open,
/// high, low, close or volume is exactly 0 is dropped.
#[inline]
pub fn is_missing(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(v) => v == 0.0 || v.is_nan(),
    }
}

/// Absent per-row measures count as 0 inside reductions.
#[inline]
fn measure(row: &RawRow, m: Measure) -> f64 {
    row.continuous(m).unwrap_or(0.0)
}

/// Fold that poisons the result once any operand is NaN. `f64::max`/`min`
/// would skip it and let the bucket through.
#[inline]
fn nan_sticky(acc: f64, v: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if acc.is_nan() || v.is_nan() { f64::NAN } else { pick(acc, v) }
}

/// Max of `m` over `rows`, `None` when there are no rows. NaN if any row is NaN.
pub fn max_value(rows: &[RawRow], m: Measure) -> Option<f64> {
    if rows.is_empty() { return None; }
    Some(rows.iter().fold(f64::MIN, |acc, r| nan_sticky(acc, measure(r, m), f64::max)))
}

/// Min of `m` over `rows`, `None` when there are no rows. NaN if any row is NaN.
pub fn min_value(rows: &[RawRow], m: Measure) -> Option<f64> {
    if rows.is_empty() { return None; }
    Some(rows.iter().fold(f64::MAX, |acc, r| nan_sticky(acc, measure(r, m), f64::min)))
}

/// Sum of `m` over `rows`, `None` when there are no rows.
pub fn sum_value(rows: &[RawRow], m: Measure) -> Option<f64> {
    if rows.is_empty() { return None; }
    Some(rows.iter().map(|r| measure(r, m)).sum())
}

fn accept(value: Option<f64>, reason: RejectReason) -> Result<f64, RejectReason> {
    match value {
        Some(v) if !is_missing(value) => Ok(v),
        _ => Err(reason),
    }
}

/// Reduce one leaf. `Ok(None)` for an empty leaf.
pub fn aggregate_leaf(leaf: &Leaf) -> Result<Option<PriceBar>, RejectReason> {
    let rows = leaf.rows.as_slice();
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Ok(None);
    };
    let open = accept(first.continuous(Measure::Open), RejectReason::Open)?;
    let high = accept(max_value(rows, Measure::High), RejectReason::High)?;
    let low = accept(min_value(rows, Measure::Low), RejectReason::Low)?;
    let close = accept(last.continuous(Measure::Close), RejectReason::Close)?;
    let volume = accept(sum_value(rows, Measure::Volume), RejectReason::Volume)?;
    Ok(Some(PriceBar {
        time: leaf.key(),
        open,
        high,
        low,
        close,
        volume,
        marked: rows.iter().any(|r| r.marked),
    }))
}

/// Aggregate leaves in the order given. Never fails: incomplete buckets are
/// counted and skipped.
pub fn aggregate(leaves: &[Leaf]) -> Aggregation {
    let mut out = Aggregation { bars: Vec::with_capacity(leaves.len()), rejected: 0 };
    for leaf in leaves {
        match aggregate_leaf(leaf) {
            Ok(Some(bar)) => out.bars.push(bar),
            Ok(None) => {}
            Err(reason) => {
                debug!(bucket = %leaf.key(), ?reason, "dropping incomplete bucket");
                out.rejected += 1;
            }
        }
    }
    out
}
