// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; daily OHLC aggregation and incremental chart-state reconciliation.

pub mod types;
pub mod error;
pub mod rows;
pub mod series;
pub mod aggregate;
pub mod theme;
pub mod colorize;
pub mod properties;
pub mod reconcile;
pub mod executor;
pub mod cycle;

pub use aggregate::{aggregate, is_missing, Aggregation, RejectReason};
pub use colorize::{colorize, Direction};
pub use cycle::{ChartPlugin, CycleOutcome, PluginOptions};
pub use error::{CycleError, SchemaError, ViewError};
pub use executor::{ErrorOverlay, LogOverlay, RenderSurface};
pub use properties::{ChartProperties, PopoutEvent, PropertyStore, PropertyWrite, ScaleMode, VolumeVisibility};
pub use reconcile::{reconcile, Directive, Observed, Reconciliation, RenderConfig};
pub use rows::{DataView, Leaf, RawRow, TableView, TimeHierarchy};
pub use series::{ChartKind, PriceBar, VolumeBar};
pub use theme::{Palette, Rgba, Theme};
pub use types::{Size, SurfaceOffsets};
