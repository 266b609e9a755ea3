// File: crates/chart-render-skia/src/draw.rs
// Summary: CPU raster drawing of grid, price series (candles or OHLC bars) and the volume overlay.

use anyhow::{anyhow, Result};
use chart_core::{ChartKind, PriceBar, Rgba, VolumeBar};
use skia_safe as skia;

use crate::scale::{price_range, SlotScale, ValueScale};
use crate::surface::{RenderStyle, SurfaceState};

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.alpha_u8(), c.r, c.g, c.b)
}

fn stroke(c: Rgba, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color(c));
    p
}

fn fill(c: Rgba) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color(c));
    p
}

pub fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f32 - 1.0);
    (0..steps).map(|i| start + step * i as f32).collect()
}

/// Plot rectangle (l, t, r, b) inside the surface.
struct Plot {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
}

/// Draw `state` and read the pixels back as unpremultiplied RGBA8.
pub fn rasterize(state: &SurfaceState, style: &RenderStyle) -> Result<Vec<u8>> {
    let (w, h) = (state.size.width as i32, state.size.height as i32);
    let mut surface =
        skia::surfaces::raster_n32_premul((w, h)).ok_or_else(|| anyhow!("failed to create raster surface"))?;

    let ins = style.insets;
    let plot = Plot {
        l: ins.left as f32,
        t: ins.top as f32,
        r: (w - ins.right as i32).max(ins.left as i32 + 1) as f32,
        b: (h - ins.bottom as i32).max(ins.top as i32 + 1) as f32,
    };

    {
        let canvas = surface.canvas();
        canvas.clear(color(style.theme.background));
        draw_grid(canvas, &plot, style);

        if let Some(volume) = &state.volume {
            let top = plot.t + (plot.b - plot.t) * style.volume_top;
            draw_volume(canvas, &plot, top, volume, style.bar_fill);
        }
        if let Some(series) = &state.price {
            if let Some((lo, hi)) = price_range(&series.bars) {
                let ys = ValueScale::new(state.scale_mode, plot.t, plot.b, lo, hi);
                let xs = SlotScale::fit(plot.l, plot.r, series.bars.len());
                match series.kind {
                    ChartKind::Candlestick => draw_candles(canvas, &xs, &ys, &series.bars, style),
                    ChartKind::Bar => draw_bars(canvas, &xs, &ys, &series.bars, style),
                }
            }
        }
    }

    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut px = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut px, row_bytes, (0, 0)) {
        return Err(anyhow!("failed to read back surface pixels"));
    }
    Ok(px)
}

fn draw_grid(canvas: &skia::Canvas, plot: &Plot, style: &RenderStyle) {
    let grid = stroke(style.theme.grid, 1.0);
    // verticals
    for x in linspace(plot.l, plot.r, 10) {
        canvas.draw_line((x, plot.t), (x, plot.b), &grid);
    }
    // horizontals
    for y in linspace(plot.t, plot.b, 6) {
        canvas.draw_line((plot.l, y), (plot.r, y), &grid);
    }
    let border = stroke(style.theme.axis_line, 1.0);
    canvas.draw_line((plot.l, plot.b), (plot.r, plot.b), &border);
    canvas.draw_line((plot.r, plot.t), (plot.r, plot.b), &border);
}

fn direction_color(bar: &PriceBar, style: &RenderStyle) -> Rgba {
    if bar.is_bearish() { style.theme.palette.down } else { style.theme.palette.up }
}

fn draw_candles(canvas: &skia::Canvas, xs: &SlotScale, ys: &ValueScale, bars: &[PriceBar], style: &RenderStyle) {
    let half = (xs.bar_spacing * style.bar_fill * 0.5).max(1.0);
    for (i, bar) in bars.iter().enumerate() {
        let c = direction_color(bar, style);
        let x = xs.to_px(i);
        canvas.draw_line((x, ys.to_px(bar.high)), (x, ys.to_px(bar.low)), &stroke(c, 1.0));

        let (y_o, y_c) = (ys.to_px(bar.open), ys.to_px(bar.close));
        let top = y_o.min(y_c);
        let bot = y_o.max(y_c).max(top + 1.0);
        canvas.draw_rect(skia::Rect::from_ltrb(x - half, top, x + half, bot), &fill(c));
    }
}

fn draw_bars(canvas: &skia::Canvas, xs: &SlotScale, ys: &ValueScale, bars: &[PriceBar], style: &RenderStyle) {
    let half = (xs.bar_spacing * style.bar_fill * 0.5).max(1.0);
    for (i, bar) in bars.iter().enumerate() {
        let paint = stroke(direction_color(bar, style), 1.5);
        let x = xs.to_px(i);
        let (y_o, y_c) = (ys.to_px(bar.open), ys.to_px(bar.close));
        canvas.draw_line((x, ys.to_px(bar.high)), (x, ys.to_px(bar.low)), &paint);
        canvas.draw_line((x - half, y_o), (x, y_o), &paint);
        canvas.draw_line((x, y_c), (x + half, y_c), &paint);
    }
}

fn draw_volume(canvas: &skia::Canvas, plot: &Plot, top: f32, bars: &[VolumeBar], bar_fill: f32) {
    let max = bars.iter().map(|v| v.value).fold(0.0f64, f64::max);
    if bars.is_empty() || max <= 0.0 {
        return;
    }
    let ys = ValueScale::new_linear(top, plot.b, 0.0, max);
    let xs = SlotScale::fit(plot.l, plot.r, bars.len());
    let half = (xs.bar_spacing * bar_fill * 0.5).max(0.5);
    for (i, v) in bars.iter().enumerate() {
        let x = xs.to_px(i);
        canvas.draw_rect(skia::Rect::from_ltrb(x - half, ys.to_px(v.value), x + half, plot.b), &fill(v.color));
    }
}
