// File: crates/chart-core/src/executor.rs
// Summary: Render-executor contract: a stateful surface that accepts reconciler directives.

use anyhow::Result;

use crate::reconcile::Directive;

/// Rendering engine seen from the core. Implementations own the drawing
/// surface, its series objects and the settings affordance.
pub trait RenderSurface {
    fn apply(&mut self, directive: &Directive) -> Result<()>;

    /// Hook the settings button up to the popout. Called once per surface.
    fn bind_settings_handler(&mut self) -> Result<()>;

    /// The settings button is only visible in edit mode.
    fn set_settings_visible(&mut self, visible: bool);
}

/// Host error overlay.
pub trait ErrorOverlay {
    fn show(&mut self, messages: &[String]);
    fn hide(&mut self);
}

/// Overlay that only logs; for headless use.
#[derive(Debug, Default)]
pub struct LogOverlay {
    pub visible: bool,
}

impl ErrorOverlay for LogOverlay {
    fn show(&mut self, messages: &[String]) {
        for m in messages {
            tracing::warn!(message = %m, "error overlay");
        }
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}
