//! Errors raised while turning raw sheet rows into typed records.

/// A grade row could not be converted into a [`crate::records::GradeRecord`].
///
/// Row numbers are 1-based and count data rows only (the CSV header is not a
/// row).
#[derive(thiserror::Error, Debug)]
pub enum DataFormatError {
    /// A required column is missing or empty.
    #[error("row {row}: missing value for `{field}`")]
    MissingField { row: usize, field: &'static str },
    /// A numeric column holds something that is not a number.
    #[error("row {row}: `{field}` is not a number: {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    /// `mark_date` does not match `%Y-%m-%dT%H:%M:%S`.
    #[error("row {row}: `mark_date` is not a timestamp: {value:?}")]
    InvalidDate { row: usize, value: String },
    /// The CSV document itself is malformed.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The JSON document itself is malformed or not an array of objects.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
