//! Query configuration

use cityquery_core::Axis;
use serde::{Deserialize, Serialize};

/// Query interpretation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Height above which a building counts as "high"
    pub high_threshold: f64,

    /// Height below which a building counts as "low"
    pub low_threshold: f64,

    /// World axis compared against the camera for "left"/"right"
    pub lateral_axis: Axis,

    /// Lowercase lemmas before matching the command vocabulary
    pub fold_case: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            high_threshold: 30.0,
            low_threshold: 15.0,
            lateral_axis: Axis::Y,
            fold_case: false,
        }
    }
}

impl QueryConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the "high" threshold
    pub fn high_threshold(mut self, height: f64) -> Self {
        self.high_threshold = height;
        self
    }

    /// Builder: set the "low" threshold
    pub fn low_threshold(mut self, height: f64) -> Self {
        self.low_threshold = height;
        self
    }

    /// Builder: set the lateral axis
    pub fn lateral_axis(mut self, axis: Axis) -> Self {
        self.lateral_axis = axis;
        self
    }

    /// Builder: enable case folding
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }
}
