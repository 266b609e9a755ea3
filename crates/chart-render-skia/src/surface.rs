// File: crates/chart-render-skia/src/surface.rs
// Summary: Stateful chart surface that applies reconciler directives and renders through Skia.

use anyhow::{Context, Result};
use chart_core::{ChartKind, Directive, PriceBar, RenderSurface, ScaleMode, Size, Theme, VolumeBar};
use thiserror::Error;
use tracing::{debug, warn};

use crate::draw;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("`{0}` needs a surface; apply CreateSurface first")]
    NoSurface(&'static str),
    #[error("`{0}` needs a price series")]
    NoPriceSeries(&'static str),
    #[error("`{0}` needs a volume series")]
    NoVolumeSeries(&'static str),
    #[error("surface has zero area ({0}x{1})")]
    EmptySurface(u32, u32),
}

/// Screen margins around the plot, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(8, 56, 8, 24)
    }
}

/// Drawing options that do not come from directives.
#[derive(Clone, Copy, Debug)]
pub struct RenderStyle {
    pub theme: Theme,
    pub insets: Insets,
    /// Fraction of the plot height above the volume histogram.
    pub volume_top: f32,
    /// Fraction of a slot covered by a candle body or bar ticks.
    pub bar_fill: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { theme: Theme::dark(), insets: Insets::default(), volume_top: 0.85, bar_fill: 0.7 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
    pub kind: ChartKind,
    pub bars: Vec<PriceBar>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceState {
    pub size: Size,
    pub scale_mode: ScaleMode,
    pub price: Option<PriceSeries>,
    pub volume: Option<Vec<VolumeBar>>,
}

/// Counters for how often expensive objects were (re)built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub surfaces_created: usize,
    pub resizes: usize,
    pub price_series_created: usize,
    pub volume_series_created: usize,
}

#[derive(Debug, Default)]
pub struct SkiaSurface {
    style: RenderStyle,
    state: Option<SurfaceState>,
    settings_handlers: usize,
    settings_visible: bool,
    stats: SurfaceStats,
}

impl SkiaSurface {
    pub fn new(style: RenderStyle) -> Self {
        Self { style, ..Self::default() }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn state(&self) -> Option<&SurfaceState> {
        self.state.as_ref()
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    pub fn settings_handlers(&self) -> usize {
        self.settings_handlers
    }

    pub fn settings_visible(&self) -> bool {
        self.settings_visible
    }

    fn state_mut(&mut self, op: &'static str) -> Result<&mut SurfaceState, SurfaceError> {
        self.state.as_mut().ok_or(SurfaceError::NoSurface(op))
    }

    fn apply_inner(&mut self, directive: &Directive) -> Result<(), SurfaceError> {
        let op = directive.name();
        match directive {
            Directive::CreateSurface { size, scale_mode } => {
                if self.state.is_some() {
                    warn!("surface already exists; recreating");
                }
                self.state = Some(SurfaceState { size: *size, scale_mode: *scale_mode, price: None, volume: None });
                self.stats.surfaces_created += 1;
            }
            Directive::ResizeSurface(size) => {
                self.state_mut(op)?.size = *size;
                self.stats.resizes += 1;
            }
            Directive::SetScaleMode(mode) => self.state_mut(op)?.scale_mode = *mode,
            Directive::ReplacePriceSeries(kind) => {
                self.state_mut(op)?.price = Some(PriceSeries { kind: *kind, bars: Vec::new() });
                self.stats.price_series_created += 1;
            }
            Directive::RemovePriceSeries => self.state_mut(op)?.price = None,
            Directive::AddVolumeSeries => {
                self.state_mut(op)?.volume = Some(Vec::new());
                self.stats.volume_series_created += 1;
            }
            Directive::RemoveVolumeSeries => self.state_mut(op)?.volume = None,
            Directive::SetPriceData(bars) => {
                let series = self.state_mut(op)?.price.as_mut().ok_or(SurfaceError::NoPriceSeries(op))?;
                series.bars = bars.clone();
            }
            Directive::SetVolumeData(bars) => {
                let series = self.state_mut(op)?.volume.as_mut().ok_or(SurfaceError::NoVolumeSeries(op))?;
                *series = bars.clone();
            }
        }
        Ok(())
    }

    /// Render the current state into an RGBA8 buffer: (pixels, width, height).
    pub fn render_to_rgba8(&self) -> Result<(Vec<u8>, u32, u32)> {
        let state = self.state.as_ref().ok_or(SurfaceError::NoSurface("render"))?;
        let Size { width, height } = state.size;
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface(width, height).into());
        }
        let px = draw::rasterize(state, &self.style).context("rasterize chart")?;
        Ok((px, width, height))
    }

    /// Render the current state as PNG bytes.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let (px, w, h) = self.render_to_rgba8()?;
        let img = image::RgbaImage::from_raw(w, h, px).context("pixel buffer does not match surface size")?;
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode PNG")?;
        Ok(out)
    }

    /// Render the current state to a PNG file, creating parent directories.
    pub fn render_to_png(&self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

impl RenderSurface for SkiaSurface {
    fn apply(&mut self, directive: &Directive) -> Result<()> {
        debug!(directive = directive.name(), "skia surface");
        self.apply_inner(directive)?;
        Ok(())
    }

    fn bind_settings_handler(&mut self) -> Result<()> {
        self.settings_handlers += 1;
        Ok(())
    }

    fn set_settings_visible(&mut self, visible: bool) {
        self.settings_visible = visible;
    }
}
