// File: crates/chart-core/src/theme.rs
// Summary: Colors, the up/down series palette and the chart theme with host styling overrides.

/// RGB color with fractional alpha, as the host styling expresses it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) ..= 1.0 (opaque)
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Alpha scaled to a byte.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Up/down colors plus the dimmed variants used when a selection exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub up: Rgba,
    pub down: Rgba,
    pub up_dim: Rgba,
    pub down_dim: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: Rgba::new(7, 137, 213, 0.955),
            down: Rgba::new(213, 7, 44, 0.955),
            up_dim: Rgba::new(7, 137, 213, 0.5),
            down_dim: Rgba::new(213, 7, 44, 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub text: Rgba,
    pub palette: Palette,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::opaque(18, 18, 20),
            grid: Rgba::new(197, 203, 206, 0.5),
            axis_line: Rgba::new(197, 203, 206, 0.8),
            text: Rgba::new(255, 255, 255, 0.9),
            palette: Palette::default(),
        }
    }

    /// Take background and text color from the host's styling.
    pub fn with_styling(mut self, background: Rgba, text: Rgba) -> Self {
        self.background = background;
        self.text = text;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
