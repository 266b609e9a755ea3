// File: crates/chart-core/src/colorize.rs
// Summary: Volume bar coloring by price direction, dimming unmarked bars while a selection exists.

use crate::series::{PriceBar, VolumeBar};
use crate::theme::{Palette, Rgba};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    /// Bearish iff open > close; flat bars count as bullish.
    pub fn of(bar: &PriceBar) -> Self {
        if bar.is_bearish() { Direction::Bearish } else { Direction::Bullish }
    }
}

impl Palette {
    pub fn color(&self, direction: Direction, dimmed: bool) -> Rgba {
        match (direction, dimmed) {
            (Direction::Bullish, false) => self.up,
            (Direction::Bullish, true) => self.up_dim,
            (Direction::Bearish, false) => self.down,
            (Direction::Bearish, true) => self.down_dim,
        }
    }
}

/// One volume bar per price bar, in the same order.
pub fn colorize(bars: &[PriceBar], palette: &Palette) -> Vec<VolumeBar> {
    let has_marked_rows = bars.iter().any(|b| b.marked);
    bars.iter()
        .map(|bar| VolumeBar {
            time: bar.time.clone(),
            value: bar.volume,
            color: palette.color(Direction::of(bar), has_marked_rows && !bar.marked),
        })
        .collect()
}
