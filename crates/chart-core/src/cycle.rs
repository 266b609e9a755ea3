// File: crates/chart-core/src/cycle.rs
// Summary: Render-cycle driver: error checks, aggregation, colorizing, reconciliation and directive application.
// Notes:
// - Cycles are serialized by the host; nothing here locks or blocks.
// - The tracked RenderConfig is only committed after every directive applied,
//   so an aborted cycle leaves the previous state untouched.

use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::colorize::colorize;
use crate::error::CycleError;
use crate::executor::{ErrorOverlay, RenderSurface};
use crate::properties::{popout_content, ChartProperties, PopoutEvent, PopoutSection, PropertyStore, PropertyWrite};
use crate::reconcile::{reconcile, Directive, Observed, RenderConfig};
use crate::rows::DataView;
use crate::theme::Palette;
use crate::types::{Size, SurfaceOffsets};

/// Per-instance settings fixed when the plugin starts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PluginOptions {
    pub is_editing: bool,
    pub palette: Palette,
}

impl PluginOptions {
    pub fn offsets(&self) -> SurfaceOffsets {
        SurfaceOffsets::for_mode(self.is_editing)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered { bars: usize, rejected: usize, directives: usize },
    /// The data view expired mid-cycle; nothing was touched.
    Aborted,
}

/// One chart instance: tracked render state plus the surface it drives.
pub struct ChartPlugin<S> {
    options: PluginOptions,
    config: RenderConfig,
    surface: S,
    settings_bound: bool,
}

impl<S: RenderSurface> ChartPlugin<S> {
    pub fn new(surface: S, options: PluginOptions) -> Self {
        Self { options, config: RenderConfig::default(), surface, settings_bound: false }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Run one cycle and report failures on `overlay`.
    pub fn render<V, O>(
        &mut self,
        view: &V,
        props: &ChartProperties,
        viewport: Size,
        overlay: &mut O,
    ) -> Result<CycleOutcome, CycleError>
    where
        V: DataView + ?Sized,
        O: ErrorOverlay + ?Sized,
    {
        let errors = view.errors();
        if !errors.is_empty() {
            warn!(count = errors.len(), "data view has errors; skipping cycle");
            overlay.show(&errors);
            return Err(CycleError::Upstream(errors));
        }
        overlay.hide();

        self.run_cycle(view, props, viewport).inspect_err(|e| {
            warn!(error = %e, "render cycle aborted");
            overlay.show(&e.overlay_messages());
        })
    }

    fn run_cycle<V>(&mut self, view: &V, props: &ChartProperties, viewport: Size) -> Result<CycleOutcome, CycleError>
    where
        V: DataView + ?Sized,
    {
        if view.is_expired() {
            debug!("data view expired; keeping previous render");
            return Ok(CycleOutcome::Aborted);
        }
        self.surface.set_settings_visible(self.options.is_editing);

        let hierarchy = view.time_hierarchy()?;
        hierarchy.validate()?;

        let agg = aggregate(&hierarchy.leaves);
        let volume = colorize(&agg.bars, &self.options.palette);

        let observed = Observed {
            chart_kind: props.chart_kind(),
            volume: props.volume(),
            scale_mode: props.scale_mode(),
            viewport,
            offsets: self.options.offsets(),
        };
        let plan = reconcile(&self.config, &observed, &agg.bars, &volume);
        for directive in &plan.directives {
            debug!(directive = directive.name(), "apply");
            self.surface.apply(directive).map_err(CycleError::Surface)?;
            if matches!(directive, Directive::CreateSurface { .. }) && !self.settings_bound {
                self.surface.bind_settings_handler().map_err(CycleError::Surface)?;
                self.settings_bound = true;
            }
        }
        let directives = plan.directives.len();
        self.config = plan.config;

        info!(bars = agg.bars.len(), rejected = agg.rejected, directives, "render cycle complete");
        Ok(CycleOutcome::Rendered { bars: agg.bars.len(), rejected: agg.rejected, directives })
    }

    /// Popout content for the current state.
    pub fn popout(&self, props: &ChartProperties) -> Vec<PopoutSection> {
        popout_content(props, &self.config, self.options.is_editing)
    }

    /// Forward a popout change to the host property store.
    pub fn on_popout_change<P: PropertyStore + ?Sized>(&self, event: PopoutEvent, store: &mut P) {
        let write = PropertyWrite::from_event(event);
        debug!(property = write.property_name(), "property write-back");
        store.write(write);
    }
}
