//! Parser for grade sheet exports.
//!
//! Rows arrive loosely typed (CSV text cells, or JSON values that may be
//! strings or numbers) and are converted into [`GradeRecord`]s in one step.
//! Any bad row fails the whole document.

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DataFormatError;
use crate::records::{GradeRecord, MARK_DATE_FORMAT};

/// Encoding of a grade sheet document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Json,
}

impl SheetFormat {
    /// Picks the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".json") {
            SheetFormat::Json
        } else {
            SheetFormat::Csv
        }
    }
}

/// A sheet row before validation. Every cell is kept as text.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    homework: Option<String>,
    #[serde(default)]
    points: Option<String>,
    #[serde(default)]
    total_possible_points: Option<String>,
    #[serde(default)]
    mark_date: Option<String>,
}

impl RawRow {
    fn from_json(object: &Map<String, Value>) -> Self {
        let cell = |name: &str| object.get(name).and_then(json_cell);
        RawRow {
            group: cell("group"),
            homework: cell("homework"),
            points: cell("points"),
            total_possible_points: cell("total_possible_points"),
            mark_date: cell("mark_date"),
        }
    }

    fn validate(self, row: usize) -> Result<GradeRecord, DataFormatError> {
        let group = required(self.group, row, "group")?;
        let homework = required(self.homework, row, "homework")?;
        let points = number(self.points, row, "points")?;
        let total_possible_points =
            number(self.total_possible_points, row, "total_possible_points")?;
        let raw_date = required(self.mark_date, row, "mark_date")?;
        let mark_date = NaiveDateTime::parse_from_str(&raw_date, MARK_DATE_FORMAT)
            .map_err(|_| DataFormatError::InvalidDate {
                row,
                value: raw_date.clone(),
            })?;

        Ok(GradeRecord::new(
            group,
            homework,
            points,
            total_possible_points,
            mark_date,
        ))
    }
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn required(
    value: Option<String>,
    row: usize,
    field: &'static str,
) -> Result<String, DataFormatError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DataFormatError::MissingField { row, field }),
    }
}

fn number(value: Option<String>, row: usize, field: &'static str) -> Result<f64, DataFormatError> {
    let raw = required(value, row, field)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(DataFormatError::InvalidNumber {
            row,
            field,
            value: raw,
        }),
    }
}

/// Parses a CSV export with a header row naming the grade columns.
///
/// Extra columns are ignored.
///
/// # Errors
///
/// Returns a [`DataFormatError`] for malformed CSV or the first invalid row.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<GradeRecord>, DataFormatError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize::<RawRow>().enumerate() {
        records.push(result?.validate(i + 1)?);
    }

    Ok(records)
}

/// Parses a JSON array of row objects. Cells may be strings or numbers.
///
/// # Errors
///
/// Returns a [`DataFormatError`] for malformed JSON or the first invalid row.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<GradeRecord>, DataFormatError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_slice(bytes)?;

    rows.iter()
        .enumerate()
        .map(|(i, object)| RawRow::from_json(object).validate(i + 1))
        .collect()
}

/// Parses a grade sheet document in the given format.
pub fn parse_records(bytes: &[u8], format: SheetFormat) -> Result<Vec<GradeRecord>, DataFormatError> {
    match format {
        SheetFormat::Csv => parse_csv(bytes),
        SheetFormat::Json => parse_json(bytes),
    }
}
