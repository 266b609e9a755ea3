// File: crates/chart-render-skia/src/scale.rs
// Summary: Bar-slot (X) and price/volume (Y) transforms; Y supports linear and log10.

use chart_core::ScaleMode;

/// Horizontal scale: one slot per bar, slot centers `bar_spacing` apart.
#[derive(Clone, Copy, Debug)]
pub struct SlotScale {
    pub left_px: f32,
    pub bar_spacing: f32,
}

impl SlotScale {
    /// Fit `count` slots into `[left_px, right_px]`.
    pub fn fit(left_px: f32, right_px: f32, count: usize) -> Self {
        let spacing = ((right_px - left_px) / count.max(1) as f32).max(0.01);
        Self { left_px, bar_spacing: spacing }
    }

    /// Center of slot `index`.
    #[inline]
    pub fn to_px(&self, index: usize) -> f32 {
        self.left_px + (index as f32 + 0.5) * self.bar_spacing
    }
}

/// Vertical value scale mapping a data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn new(mode: ScaleMode, top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        match mode {
            ScaleMode::Linear => Self::new_linear(top_px, bottom_px, vmin, vmax),
            ScaleMode::Logarithmic => Self::new_log10(top_px, bottom_px, vmin, vmax),
        }
    }

    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn new_log10(top_px: f32, bottom_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        // Ensure strictly positive range for log scale
        let eps = 1e-12;
        vmin = if vmin <= eps { eps } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        let log_min = vmin.log10();
        let log_max = vmax.log10();
        Self { top_px, bottom_px, vmin, vmax, log: true, log_min, log_max }
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let frac = if self.log {
            let span = (self.log_max - self.log_min).max(1e-12);
            (y.max(1e-12).log10() - self.log_min) / span
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            (y - self.vmin) / span
        };
        self.bottom_px - frac as f32 * (self.bottom_px - self.top_px)
    }
}

/// Low/high over the bars with a 2% margin; `None` for no bars.
pub fn price_range(bars: &[chart_core::PriceBar]) -> Option<(f64, f64)> {
    let (lo, hi) = bars
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| (lo.min(b.low), hi.max(b.high)));
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let m = (hi - lo) * 0.02;
    Some((lo - m, hi + m))
}
