//! Rows produced by the aggregators.

use serde::Serialize;

/// Mean percentage of one homework across all groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeworkMean {
    pub homework: String,
    /// `None` when no record of this homework has a defined percentage.
    pub mean_percentage: Option<f64>,
}

/// Number of submissions of one homework that fall into one percentage bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinCount {
    pub bin: String,
    pub homework: String,
    pub count: usize,
}

/// Summed results of one programming group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub group: String,
    pub points: f64,
    pub total_possible_points: f64,
    pub percentage: f64,
    pub even_weighting_percentage: f64,
    pub score: String,
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub graded: usize,
    pub passed: usize,
    pub failed: usize,
    /// Rounded mean percentage, 0 when nothing has a defined percentage.
    pub average: i64,
}

/// One point of the per-group percentage line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPoint {
    pub homework: String,
    pub group: String,
    pub percentage: Option<f64>,
}
