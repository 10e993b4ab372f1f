use chrono::NaiveDateTime;
use serde::Serialize;

/// Format of `mark_date` in the grade sheet.
pub const MARK_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One graded homework submission of a programming group.
///
/// `percentage` is not part of the source data. It stays `None` until
/// [`crate::analyzers::clean::clean`] derives it, and stays `None` afterwards
/// when `total_possible_points` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    pub group: String,
    pub homework: String,
    pub points: f64,
    pub total_possible_points: f64,
    pub mark_date: NaiveDateTime,
    pub percentage: Option<f64>,
}

impl GradeRecord {
    pub fn new(
        group: impl Into<String>,
        homework: impl Into<String>,
        points: f64,
        total_possible_points: f64,
        mark_date: NaiveDateTime,
    ) -> Self {
        GradeRecord {
            group: group.into(),
            homework: homework.into(),
            points,
            total_possible_points,
            mark_date,
            percentage: None,
        }
    }

    /// Rounded share of `points` in `total_possible_points`, or `None` for a
    /// zero denominator. Ties round to the even integer.
    pub fn derive_percentage(&self) -> Option<f64> {
        if self.total_possible_points == 0.0 {
            return None;
        }
        Some(((self.points / self.total_possible_points) * 100.0).round_ties_even())
    }

    /// Returns a copy with `percentage` derived from the point fields.
    pub fn with_percentage(&self) -> Self {
        GradeRecord {
            percentage: self.derive_percentage(),
            ..self.clone()
        }
    }
}
