//! Grade record cleaning and aggregation.
//!
//! Records are cleaned once (excluded groups dropped, percentages derived,
//! allow-lists applied) and then fed to independent aggregators: mean per
//! homework, percentage bins per homework, totals per group and the headline
//! summary. [`dashboard::Dashboard`] bundles all of them for one page view.

pub mod bins;
pub mod clean;
pub mod dashboard;
pub mod filter;
pub mod homework;
pub mod summary;
pub mod totals;
pub mod types;
pub mod utility;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDateTime;

    use crate::records::{GradeRecord, MARK_DATE_FORMAT};

    pub fn record(group: &str, homework: &str, points: f64, total: f64) -> GradeRecord {
        let date = NaiveDateTime::parse_from_str("2023-04-01T12:00:00", MARK_DATE_FORMAT).unwrap();
        GradeRecord::new(group, homework, points, total, date)
    }

    /// Two groups, two homeworks, g2 missing hw2.
    pub fn scenario() -> Vec<GradeRecord> {
        vec![
            record("g1", "hw1", 8.0, 10.0),
            record("g1", "hw2", 5.0, 10.0),
            record("g2", "hw1", 10.0, 10.0),
        ]
    }
}
