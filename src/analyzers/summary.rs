use crate::analyzers::types::{GroupPoint, Summary};
use crate::analyzers::utility::{defined_percentages, mean};
use crate::records::GradeRecord;

/// Percentage a submission needs to count as passed.
pub const PASS_THRESHOLD: f64 = 50.0;

/// Counts graded, passed and failed submissions and the rounded mean
/// percentage. Undefined percentages count as neither passed nor failed.
pub fn summarize(records: &[GradeRecord]) -> Summary {
    let percentages = defined_percentages(records);

    let passed = percentages.iter().filter(|p| **p >= PASS_THRESHOLD).count();
    let failed = percentages.len() - passed;
    let average = mean(&percentages).map_or(0, |m| m.round_ties_even() as i64);

    Summary {
        graded: records.len(),
        passed,
        failed,
        average,
    }
}

/// Per-record series for the percentage-per-group line chart.
pub fn group_series(records: &[GradeRecord]) -> Vec<GroupPoint> {
    records
        .iter()
        .map(|r| GroupPoint {
            homework: r.homework.clone(),
            group: r.group.clone(),
            percentage: r.percentage,
        })
        .collect()
}
