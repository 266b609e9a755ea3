// File: crates/chart-core/tests/reconcile.rs
// Purpose: Chart-state reconciliation emits only the mutations an input change requires.

use chart_core::{
    colorize, reconcile, ChartKind, Directive, Observed, Palette, PriceBar, RenderConfig, ScaleMode, Size,
    SurfaceOffsets, VolumeVisibility,
};

fn bars() -> Vec<PriceBar> {
    vec![
        PriceBar { time: "2024-3-1".into(), open: 10.0, high: 12.0, low: 9.0, close: 11.0, volume: 100.0, marked: false },
        PriceBar { time: "2024-3-2".into(), open: 11.0, high: 11.0, low: 8.0, close: 9.0, volume: 50.0, marked: false },
    ]
}

fn observed(kind: Option<ChartKind>, volume: VolumeVisibility) -> Observed {
    Observed {
        chart_kind: kind,
        volume,
        scale_mode: ScaleMode::Linear,
        viewport: Size::new(800, 600),
        offsets: SurfaceOffsets::for_mode(false),
    }
}

fn names(ds: &[Directive]) -> Vec<&'static str> {
    ds.iter().map(Directive::name).collect()
}

#[test]
fn first_cycle_creates_surface_and_series() {
    let price = bars();
    let vol = colorize(&price, &Palette::default());
    let r = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Candlestick), VolumeVisibility::Unset), &price, &vol);
    assert_eq!(
        r.directives,
        vec![
            Directive::CreateSurface { size: Size::new(790, 590), scale_mode: ScaleMode::Linear },
            Directive::ReplacePriceSeries(ChartKind::Candlestick),
            Directive::SetPriceData(price.clone()),
        ]
    );
    assert!(r.config.has_price_series);
    assert!(!r.config.has_volume_series);
    assert_eq!(r.config.viewport, Some(Size::new(800, 600)));
}

#[test]
fn first_cycle_with_volume_adds_histogram() {
    let price = bars();
    let vol = colorize(&price, &Palette::default());
    let r = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Bar), VolumeVisibility::Yes), &price, &vol);
    assert_eq!(
        names(&r.directives),
        vec!["create_surface", "replace_price_series", "add_volume_series", "set_price_data", "set_volume_data"]
    );
}

#[test]
fn identical_inputs_only_refresh_data() {
    let price = bars();
    let vol = colorize(&price, &Palette::default());
    let obs = observed(Some(ChartKind::Candlestick), VolumeVisibility::Yes);
    let first = reconcile(&RenderConfig::default(), &obs, &price, &vol);
    let second = reconcile(&first.config, &obs, &price, &vol);
    assert_eq!(names(&second.directives), vec!["set_scale_mode", "set_price_data", "set_volume_data"]);
    assert_eq!(second.config, first.config);
}

#[test]
fn resize_only_emits_one_resize() {
    let price = bars();
    let obs = observed(Some(ChartKind::Candlestick), VolumeVisibility::No);
    let first = reconcile(&RenderConfig::default(), &obs, &price, &[]);
    let bigger = Observed { viewport: Size::new(1000, 700), ..obs };
    let r = reconcile(&first.config, &bigger, &price, &[]);
    let resizes = r.directives.iter().filter(|d| matches!(d, Directive::ResizeSurface(_))).count();
    assert_eq!(resizes, 1);
    assert_eq!(r.directives[0], Directive::ResizeSurface(Size::new(990, 690)));
    assert!(r.directives.iter().all(|d| !d.is_structural()));
}

#[test]
fn volume_no_to_yes() {
    let price = bars();
    let vol = colorize(&price, &Palette::default());
    let first = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Candlestick), VolumeVisibility::No), &price, &vol);
    let r = reconcile(&first.config, &observed(Some(ChartKind::Candlestick), VolumeVisibility::Yes), &price, &vol);
    assert_eq!(
        r.directives,
        vec![
            Directive::SetScaleMode(ScaleMode::Linear),
            Directive::AddVolumeSeries,
            Directive::SetPriceData(price.clone()),
            Directive::SetVolumeData(vol.clone()),
        ]
    );
}

#[test]
fn volume_yes_to_no_removes_series() {
    let price = bars();
    let vol = colorize(&price, &Palette::default());
    let first = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Candlestick), VolumeVisibility::Yes), &price, &vol);
    let r = reconcile(&first.config, &observed(Some(ChartKind::Candlestick), VolumeVisibility::No), &price, &vol);
    assert_eq!(names(&r.directives), vec!["set_scale_mode", "remove_volume_series", "set_price_data"]);
    assert!(!r.config.has_volume_series);
    assert_eq!(r.config.volume, VolumeVisibility::No);
}

#[test]
fn volume_unset_then_yes_does_not_duplicate() {
    let price = bars();
    let yes = observed(Some(ChartKind::Candlestick), VolumeVisibility::Yes);
    let a = reconcile(&RenderConfig::default(), &yes, &price, &[]);
    let b = reconcile(&a.config, &observed(Some(ChartKind::Candlestick), VolumeVisibility::Unset), &price, &[]);
    assert!(b.config.has_volume_series);
    assert_eq!(b.config.volume, VolumeVisibility::Unset);
    let c = reconcile(&b.config, &yes, &price, &[]);
    assert!(!c.directives.contains(&Directive::AddVolumeSeries));
    assert!(c.directives.contains(&Directive::SetVolumeData(Vec::new())));
}

#[test]
fn kind_change_replaces_price_series() {
    let price = bars();
    let first = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Candlestick), VolumeVisibility::Unset), &price, &[]);
    let r = reconcile(&first.config, &observed(Some(ChartKind::Bar), VolumeVisibility::Unset), &price, &[]);
    assert_eq!(names(&r.directives), vec!["set_scale_mode", "remove_price_series", "replace_price_series", "set_price_data"]);
    assert_eq!(r.config.chart_kind, Some(ChartKind::Bar));
}

#[test]
fn unknown_kind_drops_price_series() {
    let price = bars();
    let first = reconcile(&RenderConfig::default(), &observed(Some(ChartKind::Candlestick), VolumeVisibility::Unset), &price, &[]);
    let r = reconcile(&first.config, &observed(None, VolumeVisibility::Unset), &price, &[]);
    assert_eq!(names(&r.directives), vec!["set_scale_mode", "remove_price_series"]);
    assert!(!r.config.has_price_series);
}

#[test]
fn scale_mode_is_reapplied() {
    let price = bars();
    let obs = observed(Some(ChartKind::Candlestick), VolumeVisibility::Unset);
    let first = reconcile(&RenderConfig::default(), &obs, &price, &[]);
    let log = Observed { scale_mode: ScaleMode::Logarithmic, ..obs };
    let r = reconcile(&first.config, &log, &price, &[]);
    assert_eq!(r.directives[0], Directive::SetScaleMode(ScaleMode::Logarithmic));
    assert_eq!(r.config.scale_mode, ScaleMode::Logarithmic);
}
