// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia render executor: applies chart directives to a CPU raster surface and exports RGBA/PNG.

pub mod draw;
pub mod scale;
pub mod surface;

pub use scale::{SlotScale, ValueScale};
pub use surface::{Insets, PriceSeries, RenderStyle, SkiaSurface, SurfaceError, SurfaceState, SurfaceStats};
