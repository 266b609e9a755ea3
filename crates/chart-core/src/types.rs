// File: crates/chart-core/src/types.rs
// Summary: Shared layout types and constants (viewport sizes, surface offsets).

/// Height taken off the viewport before sizing the rendering surface.
pub const OFFSET_HEIGHT: u32 = 10;
/// Width taken off the viewport outside edit mode.
pub const OFFSET_WIDTH: u32 = 10;
/// Width taken off the viewport in edit mode (room for the settings button).
pub const OFFSET_WIDTH_EDITING: u32 = 40;

/// Width/height pair in layout units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the rendering surface inside the viewport.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOffsets {
    pub width: u32,
    pub height: u32,
}

impl SurfaceOffsets {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Offsets for the host's edit mode: the settings button needs extra width.
    pub const fn for_mode(is_editing: bool) -> Self {
        if is_editing {
            Self::new(OFFSET_WIDTH_EDITING, OFFSET_HEIGHT)
        } else {
            Self::new(OFFSET_WIDTH, OFFSET_HEIGHT)
        }
    }

    /// Surface size for a viewport; saturates at zero for tiny viewports.
    pub const fn surface_size(&self, viewport: Size) -> Size {
        Size {
            width: viewport.width.saturating_sub(self.width),
            height: viewport.height.saturating_sub(self.height),
        }
    }
}

impl Default for SurfaceOffsets {
    fn default() -> Self {
        Self::for_mode(false)
    }
}
