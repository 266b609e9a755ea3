// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for a render cycle (upstream, schema, computation, surface).

use thiserror::Error;

/// Time-axis configuration problems detected before aggregation.
/// The display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Please configure a column of type date on the Time axis.")]
    MissingTimeAxis,
    #[error("Only one level is allowed in the X hierarchy. There are currently {0}")]
    TooManyLevels(usize),
    #[error("Only date type is allowed on the x axis")]
    NotDateTyped,
}

/// Failure raised by the host while walking the time hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ViewError(pub String);

impl ViewError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Everything that aborts a render cycle. None of these are fatal; the next
/// cycle starts from the last committed state.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("data view reported {} error(s)", .0.len())]
    Upstream(Vec<String>),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to read the time hierarchy: {0}")]
    Computation(#[from] ViewError),
    #[error("rendering surface rejected a directive: {0:#}")]
    Surface(anyhow::Error),
}

impl CycleError {
    /// Messages to put on the host's error overlay.
    pub fn overlay_messages(&self) -> Vec<String> {
        match self {
            CycleError::Upstream(errors) => errors.clone(),
            CycleError::Schema(e) => vec![e.to_string()],
            CycleError::Computation(e) => vec![e.0.clone()],
            CycleError::Surface(_) => vec![self.to_string()],
        }
    }
}
