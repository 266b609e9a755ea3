// File: crates/chart-core/src/series.rs
// Summary: Series payloads handed to the rendering engine: price bars, volume bars and the price series kind.

use crate::theme::Rgba;

/// Shape of the price series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Candlestick,
    Bar, // OHLC bar (no filled body)
}

impl ChartKind {
    /// Parse the host property value; anything but `candle`/`bars` is no kind.
    pub fn from_property(value: &str) -> Option<Self> {
        match value {
            "candle" => Some(ChartKind::Candlestick),
            "bars" => Some(ChartKind::Bar),
            _ => None,
        }
    }

    pub const fn as_property(self) -> &'static str {
        match self {
            ChartKind::Candlestick => "candle",
            ChartKind::Bar => "bars",
        }
    }
}

/// One OHLC record per accepted date bucket.
/// Invariants: open/close come from the bucket's first/last row,
/// high/low are the extremes over all rows, volume is the row sum.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceBar {
    /// Bucket key, `YYYY-M-D`.
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// At least one row in the bucket is marked.
    pub marked: bool,
}

impl PriceBar {
    pub fn is_bearish(&self) -> bool {
        self.open > self.close
    }
}

/// Volume histogram entry, one per price bar.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeBar {
    pub time: String,
    pub value: f64,
    pub color: Rgba,
}
