// File: crates/chart-core/src/reconcile.rs
// Summary: Chart-state reconciliation: diff the tracked render config against this cycle's inputs
//          and emit the smallest ordered set of surface mutations.
// Notes:
// - Structural objects (surface, series) are expensive and stateful (zoom/pan);
//   they are only created, resized or replaced when their input changed.
// - Data payloads are cheap and are re-sent every cycle.

use crate::properties::{ScaleMode, VolumeVisibility};
use crate::series::{ChartKind, PriceBar, VolumeBar};
use crate::types::{Size, SurfaceOffsets};

/// State carried between render cycles. Starts empty ("no surface yet").
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub chart_kind: Option<ChartKind>,
    pub volume: VolumeVisibility,
    pub scale_mode: ScaleMode,
    /// Last viewport seen; `None` until the surface exists.
    pub viewport: Option<Size>,
    pub has_price_series: bool,
    pub has_volume_series: bool,
}

impl RenderConfig {
    pub fn has_surface(&self) -> bool {
        self.viewport.is_some()
    }
}

/// Inputs observed for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observed {
    pub chart_kind: Option<ChartKind>,
    pub volume: VolumeVisibility,
    pub scale_mode: ScaleMode,
    pub viewport: Size,
    pub offsets: SurfaceOffsets,
}

impl Observed {
    pub fn surface_size(&self) -> Size {
        self.offsets.surface_size(self.viewport)
    }
}

/// One mutation of the rendering surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    CreateSurface { size: Size, scale_mode: ScaleMode },
    ResizeSurface(Size),
    SetScaleMode(ScaleMode),
    ReplacePriceSeries(ChartKind),
    RemovePriceSeries,
    AddVolumeSeries,
    RemoveVolumeSeries,
    SetPriceData(Vec<PriceBar>),
    SetVolumeData(Vec<VolumeBar>),
}

impl Directive {
    /// Creates, removes or replaces a surface or series object.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Directive::CreateSurface { .. }
                | Directive::ReplacePriceSeries(_)
                | Directive::RemovePriceSeries
                | Directive::AddVolumeSeries
                | Directive::RemoveVolumeSeries
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Directive::CreateSurface { .. } => "create_surface",
            Directive::ResizeSurface(_) => "resize_surface",
            Directive::SetScaleMode(_) => "set_scale_mode",
            Directive::ReplacePriceSeries(_) => "replace_price_series",
            Directive::RemovePriceSeries => "remove_price_series",
            Directive::AddVolumeSeries => "add_volume_series",
            Directive::RemoveVolumeSeries => "remove_volume_series",
            Directive::SetPriceData(_) => "set_price_data",
            Directive::SetVolumeData(_) => "set_volume_data",
        }
    }
}

/// Result of one reconciliation: the config to commit once the directives
/// have been applied, and the directives in application order.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub config: RenderConfig,
    pub directives: Vec<Directive>,
}

/// Diff `prev` against `next`. Order: surface, price structure, volume
/// structure, price data, volume data.
pub fn reconcile(prev: &RenderConfig, next: &Observed, price: &[PriceBar], volume: &[VolumeBar]) -> Reconciliation {
    let mut config = prev.clone();
    let mut directives = Vec::new();

    // surface
    match prev.viewport {
        None => directives.push(Directive::CreateSurface { size: next.surface_size(), scale_mode: next.scale_mode }),
        Some(old) if old != next.viewport => {
            directives.push(Directive::ResizeSurface(next.surface_size()));
            directives.push(Directive::SetScaleMode(next.scale_mode));
        }
        Some(_) => directives.push(Directive::SetScaleMode(next.scale_mode)),
    }
    config.viewport = Some(next.viewport);
    config.scale_mode = next.scale_mode;

    // price series
    if !prev.has_surface() || prev.chart_kind != next.chart_kind {
        if config.has_price_series {
            directives.push(Directive::RemovePriceSeries);
            config.has_price_series = false;
        }
        if let Some(kind) = next.chart_kind {
            directives.push(Directive::ReplacePriceSeries(kind));
            config.has_price_series = true;
        }
        config.chart_kind = next.chart_kind;
    }

    // volume series
    match next.volume {
        VolumeVisibility::Yes if prev.volume != VolumeVisibility::Yes && !config.has_volume_series => {
            directives.push(Directive::AddVolumeSeries);
            config.has_volume_series = true;
        }
        VolumeVisibility::No if prev.volume != VolumeVisibility::No && config.has_volume_series => {
            directives.push(Directive::RemoveVolumeSeries);
            config.has_volume_series = false;
        }
        _ => {}
    }
    config.volume = next.volume;

    if config.has_price_series {
        directives.push(Directive::SetPriceData(price.to_vec()));
    }
    if config.has_volume_series {
        directives.push(Directive::SetVolumeData(volume.to_vec()));
    }

    Reconciliation { config, directives }
}
