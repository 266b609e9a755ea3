// File: crates/chart-core/src/properties.rs
// Summary: The three host display properties, their typed views, and the settings popout model.
// Notes:
// - The host stores property values verbatim. Volume visibility is a string
//   property ("yes"/"no"), not a boolean; write-backs must keep that shape.

use crate::reconcile::RenderConfig;
use crate::series::ChartKind;

/// Host property names.
pub const CHART_TYPE: &str = "chartType";
pub const SHOW_VOLUME: &str = "showVolume";
pub const SHOW_LOG_SCALE: &str = "showLogScale";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VolumeVisibility {
    #[default]
    Unset,
    Yes,
    No,
}

impl VolumeVisibility {
    /// Only the exact strings `yes` and `no` are recognized.
    pub fn from_property(value: Option<&str>) -> Self {
        match value {
            Some("yes") => VolumeVisibility::Yes,
            Some("no") => VolumeVisibility::No,
            _ => VolumeVisibility::Unset,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    #[default]
    Linear,
    Logarithmic,
}

impl ScaleMode {
    /// Unset means linear.
    pub fn from_property(value: Option<bool>) -> Self {
        match value {
            Some(true) => ScaleMode::Logarithmic,
            _ => ScaleMode::Linear,
        }
    }

    pub const fn is_log(self) -> bool {
        matches!(self, ScaleMode::Logarithmic)
    }
}

/// Raw property values as last delivered by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartProperties {
    pub chart_kind: Option<String>,
    pub show_volume: Option<String>,
    pub show_log_scale: Option<bool>,
}

impl ChartProperties {
    pub fn new(chart_kind: &str, show_volume: Option<&str>, show_log_scale: Option<bool>) -> Self {
        Self {
            chart_kind: Some(chart_kind.to_string()),
            show_volume: show_volume.map(str::to_string),
            show_log_scale,
        }
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        self.chart_kind.as_deref().and_then(ChartKind::from_property)
    }

    pub fn volume(&self) -> VolumeVisibility {
        VolumeVisibility::from_property(self.show_volume.as_deref())
    }

    pub fn scale_mode(&self) -> ScaleMode {
        ScaleMode::from_property(self.show_log_scale)
    }

    /// Apply a write-back locally, the way the host will store it.
    pub fn apply(&mut self, write: &PropertyWrite) {
        match write {
            PropertyWrite::ChartType(v) => self.chart_kind = Some(v.clone()),
            PropertyWrite::ShowVolume(v) => self.show_volume = Some((*v).to_string()),
            PropertyWrite::ShowLogScale(v) => self.show_log_scale = Some(*v),
        }
    }
}

/// A change made by the user through the settings popout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopoutEvent {
    ChartKindSelected(String),
    VolumeToggled(bool),
    LogScaleToggled(bool),
}

/// Property write-back request for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyWrite {
    ChartType(String),
    ShowVolume(&'static str),
    ShowLogScale(bool),
}

impl PropertyWrite {
    pub fn from_event(event: PopoutEvent) -> Self {
        match event {
            PopoutEvent::ChartKindSelected(value) => PropertyWrite::ChartType(value),
            PopoutEvent::VolumeToggled(on) => PropertyWrite::ShowVolume(if on { "yes" } else { "no" }),
            PopoutEvent::LogScaleToggled(on) => PropertyWrite::ShowLogScale(on),
        }
    }

    pub const fn property_name(&self) -> &'static str {
        match self {
            PropertyWrite::ChartType(_) => CHART_TYPE,
            PropertyWrite::ShowVolume(_) => SHOW_VOLUME,
            PropertyWrite::ShowLogScale(_) => SHOW_LOG_SCALE,
        }
    }
}

/// Host property storage.
pub trait PropertyStore {
    fn write(&mut self, write: PropertyWrite);
}

impl PropertyStore for ChartProperties {
    fn write(&mut self, write: PropertyWrite) {
        self.apply(&write);
    }
}

// ---- popout model -----------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum PopoutControl {
    Radio { property: &'static str, text: &'static str, value: &'static str, checked: bool, enabled: bool },
    Checkbox { property: &'static str, text: &'static str, checked: bool, enabled: bool },
}

impl PopoutControl {
    pub fn is_checked(&self) -> bool {
        match self {
            PopoutControl::Radio { checked, .. } | PopoutControl::Checkbox { checked, .. } => *checked,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            PopoutControl::Radio { enabled, .. } | PopoutControl::Checkbox { enabled, .. } => *enabled,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopoutSection {
    pub heading: &'static str,
    pub children: Vec<PopoutControl>,
}

/// Settings popout content for the current properties. Controls are only
/// enabled while the host is in edit mode.
pub fn popout_content(props: &ChartProperties, config: &RenderConfig, is_editing: bool) -> Vec<PopoutSection> {
    let kind = props.chart_kind.as_deref();
    let radio = |text, value: &'static str| PopoutControl::Radio {
        property: CHART_TYPE,
        text,
        value,
        checked: kind == Some(value),
        enabled: is_editing,
    };
    vec![
        PopoutSection {
            heading: "Chart Type",
            children: vec![
                radio("Candle Sticks", ChartKind::Candlestick.as_property()),
                radio("OHLC Bars", ChartKind::Bar.as_property()),
            ],
        },
        PopoutSection {
            heading: "Options",
            children: vec![
                PopoutControl::Checkbox {
                    property: SHOW_LOG_SCALE,
                    text: "Log Scale",
                    checked: props.scale_mode().is_log(),
                    enabled: is_editing,
                },
                PopoutControl::Checkbox {
                    property: SHOW_VOLUME,
                    text: "Show Volume",
                    checked: config.volume == VolumeVisibility::Yes,
                    enabled: is_editing,
                },
            ],
        },
    ]
}
