// File: crates/chart-core/src/rows.rs
// Summary: Row contract for the host data view: typed rows, date leaves and the time hierarchy.
// Notes:
// - The host groups rows into one leaf per calendar date. Rows inside a leaf
//   must arrive in their original order; open/close depend on first/last row.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveTime, Utc};

use crate::error::{SchemaError, ViewError};

/// Continuous measures a row exposes, by axis name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measure {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Measure {
    /// Axis name as configured in the host.
    pub const fn axis_name(self) -> &'static str {
        match self {
            Measure::Open => "Open",
            Measure::High => "High",
            Measure::Low => "Low",
            Measure::Close => "Close",
            Measure::Volume => "Volume",
        }
    }
}

/// One observation. Absent measures are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawRow {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    /// Selected by the end user in the host.
    pub marked: bool,
}

impl RawRow {
    /// Row with every measure present and not marked.
    pub fn ohlcv(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
            marked: false,
        }
    }

    pub fn with_marked(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }

    pub fn continuous(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Open => self.open,
            Measure::High => self.high,
            Measure::Low => self.low,
            Measure::Close => self.close,
            Measure::Volume => self.volume,
        }
    }
}

/// One date bucket as delivered by the host hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub value: DateTime<Utc>,
    pub rows: Vec<RawRow>,
}

impl Leaf {
    pub fn new(value: DateTime<Utc>, rows: Vec<RawRow>) -> Self {
        Self { value, rows }
    }

    pub fn key(&self) -> String {
        bucket_key(self.value)
    }
}

/// `YYYY-M-D` in UTC, no zero padding.
pub fn bucket_key(at: DateTime<Utc>) -> String {
    format!("{}-{}-{}", at.year(), at.month(), at.day())
}

/// Start of the UTC calendar day containing `at`.
pub fn truncate_to_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::default()).and_utc()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Date,
    DateTime,
    Time,
    String,
    Integer,
    Real,
}

impl DataType {
    pub const fn is_date(self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyLevel {
    pub name: String,
    pub data_type: DataType,
}

impl HierarchyLevel {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self { name: name.into(), data_type }
    }
}

/// The host's "Time" hierarchy: its levels and the leaves under its root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeHierarchy {
    pub levels: Vec<HierarchyLevel>,
    pub leaves: Vec<Leaf>,
}

impl TimeHierarchy {
    /// Exactly one level, and it must be date typed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let first = self.levels.first().ok_or(SchemaError::MissingTimeAxis)?;
        if self.levels.len() > 1 {
            return Err(SchemaError::TooManyLevels(self.levels.len()));
        }
        if !first.data_type.is_date() {
            return Err(SchemaError::NotDateTyped);
        }
        Ok(())
    }
}

/// Host data view consumed by one render cycle.
pub trait DataView {
    /// Errors the host reports for the current configuration.
    fn errors(&self) -> Vec<String>;
    /// True when a user interaction invalidated this view mid-cycle.
    fn is_expired(&self) -> bool;
    fn time_hierarchy(&self) -> Result<TimeHierarchy, ViewError>;
}

/// In-memory data view over timestamped rows, grouped by UTC date.
#[derive(Clone, Debug)]
pub struct TableView {
    level: HierarchyLevel,
    leaves: Vec<Leaf>,
    errors: Vec<String>,
}

impl TableView {
    /// Leaves appear in order of each date's first row; rows keep arrival order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, RawRow)>,
    {
        let mut leaves: Vec<Leaf> = Vec::new();
        let mut index: HashMap<DateTime<Utc>, usize> = HashMap::new();
        for (at, row) in rows {
            let day = truncate_to_day(at);
            let slot = *index.entry(day).or_insert_with(|| {
                leaves.push(Leaf::new(day, Vec::new()));
                leaves.len() - 1
            });
            leaves[slot].rows.push(row);
        }
        Self::from_leaves(leaves)
    }

    pub fn from_leaves(leaves: Vec<Leaf>) -> Self {
        Self { level: HierarchyLevel::new("Date", DataType::Date), leaves, errors: Vec::new() }
    }

    pub fn with_level(mut self, level: HierarchyLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

impl DataView for TableView {
    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }

    fn is_expired(&self) -> bool {
        false
    }

    fn time_hierarchy(&self) -> Result<TimeHierarchy, ViewError> {
        Ok(TimeHierarchy { levels: vec![self.level.clone()], leaves: self.leaves.clone() })
    }
}
