// File: crates/demo/src/main.rs
// Summary: Demo loads OHLCV rows from CSV (or synthesizes them), then drives a scripted sequence of
//          render cycles through the reconciler and writes a PNG after each one.

use anyhow::{Context, Result};
use chart_core::rows::Measure;
use chart_core::{
    ChartPlugin, ChartProperties, LogOverlay, PluginOptions, PopoutEvent, RawRow, Rgba, Size, TableView, Theme,
};
use chart_render_skia::{RenderStyle, SkiaSurface};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rows = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            load_rows_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            info!("no input file given; using synthetic intraday rows");
            synthetic_rows(60, 6)
        }
    };
    if rows.is_empty() {
        anyhow::bail!("no rows loaded; check headers/delimiter.");
    }
    info!(rows = rows.len(), "loaded rows");

    let out_dir = PathBuf::from("target/out");
    // host styling: black background, light scale font
    let theme = Theme::dark().with_styling(Rgba::opaque(0, 0, 0), Rgba::new(255, 255, 255, 0.9));
    let surface = SkiaSurface::new(RenderStyle { theme, ..Default::default() });
    let mut plugin = ChartPlugin::new(surface, PluginOptions { is_editing: true, ..Default::default() });
    let mut overlay = LogOverlay::default();
    let mut props = ChartProperties::new("candle", None, None);
    let mut viewport = Size::new(1024, 640);
    let view = TableView::from_rows(rows.iter().copied());

    let mut step = |name: &str, plugin: &mut ChartPlugin<SkiaSurface>, props: &ChartProperties, view: &TableView, viewport| -> Result<()> {
        let outcome = plugin.render(view, props, viewport, &mut overlay)?;
        let out = out_dir.join(format!("chart_{name}.png"));
        plugin.surface().render_to_png(&out)?;
        info!(?outcome, file = %out.display(), "wrote");
        Ok(())
    };

    step("01_candles", &mut plugin, &props, &view, viewport)?;

    plugin.on_popout_change(PopoutEvent::VolumeToggled(true), &mut props);
    step("02_volume", &mut plugin, &props, &view, viewport)?;

    // pretend the user selected the last week
    let cutoff = rows.last().map(|(t, _)| *t - Duration::days(7));
    let selected = TableView::from_rows(rows.iter().map(|&(t, r)| (t, r.with_marked(Some(t) > cutoff))));
    step("03_selection", &mut plugin, &props, &selected, viewport)?;

    plugin.on_popout_change(PopoutEvent::ChartKindSelected("bars".into()), &mut props);
    step("04_bars", &mut plugin, &props, &view, viewport)?;

    plugin.on_popout_change(PopoutEvent::LogScaleToggled(true), &mut props);
    step("05_log", &mut plugin, &props, &view, viewport)?;

    viewport = Size::new(800, 480);
    step("06_resized", &mut plugin, &props, &view, viewport)?;

    plugin.on_popout_change(PopoutEvent::VolumeToggled(false), &mut props);
    step("07_no_volume", &mut plugin, &props, &view, viewport)?;

    let stats = plugin.surface().stats();
    info!(?stats, "done");
    Ok(())
}

/// Deterministic random-walk rows, `per_day` observations per UTC day.
fn synthetic_rows(days: i64, per_day: i64) -> Vec<(DateTime<Utc>, RawRow)> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let step = Duration::hours(24 / per_day.max(1));
    let mut price = 100.0f64;
    let mut out = Vec::new();
    for d in 0..days {
        for k in 0..per_day {
            let t = start + Duration::days(d) + step * k as i32;
            let drift = ((d * per_day + k) as f64 * 0.37).sin() * 1.5;
            let o = price;
            let c = (o + drift).max(1.0);
            let h = o.max(c) + 0.6;
            let l = (o.min(c) - 0.6).max(0.5);
            out.push((t, RawRow::ohlcv(o, h, l, c, 1_000.0 + (k as f64 * 250.0))));
            price = c;
        }
    }
    out
}

/// Load rows from a CSV with time/open/high/low/close/volume columns
/// and an optional marked column.
fn load_rows_csv(path: &Path) -> Result<Vec<(DateTime<Utc>, RawRow)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    // host axis name first, then common aliases
    let col = |m: Measure, aliases: &[&str]| {
        let axis = m.axis_name().to_lowercase();
        headers.iter().position(|h| *h == axis).or_else(|| idx(aliases))
    };
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"])
        .context("no time column (time/timestamp/open_time/date/datetime)")?;
    let i_open = col(Measure::Open, &["o"]);
    let i_high = col(Measure::High, &["h"]);
    let i_low = col(Measure::Low, &["l"]);
    let i_close = col(Measure::Close, &["c", "adj_close", "close_price"]);
    let i_volume = col(Measure::Volume, &["vol", "v"]);
    let i_marked = idx(&["marked", "selected"]);

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(t) = rec.get(i_time).and_then(parse_time) else {
            continue;
        };
        let num = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let marked = i_marked
            .and_then(|ix| rec.get(ix))
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        out.push((
            t,
            RawRow {
                open: num(i_open),
                high: num(i_high),
                low: num(i_low),
                close: num(i_close),
                volume: num(i_volume),
                marked,
            },
        ));
    }
    Ok(out)
}

/// Epoch seconds/milliseconds, RFC 3339, or a bare `YYYY-MM-DD` date.
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
