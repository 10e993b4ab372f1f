//! Output formatting and persistence for dashboards.
//!
//! Supports terminal tables, JSON serialization and CSV export.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::{debug, info};

use crate::analyzers::dashboard::Dashboard;
use crate::analyzers::filter::FilterOptions;

/// Logs a dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Serializes a dashboard as pretty-printed JSON.
pub fn to_json(dashboard: &Dashboard) -> Result<String> {
    Ok(serde_json::to_string_pretty(dashboard)?)
}

const RECORD_HEADERS: &[&str] = &[
    "group",
    "homework",
    "points",
    "total_possible_points",
    "mark_date",
    "percentage",
];
const MEAN_HEADERS: &[&str] = &["homework", "mean_percentage"];
const BIN_HEADERS: &[&str] = &["bin", "homework", "count"];
const TOTAL_HEADERS: &[&str] = &[
    "group",
    "points",
    "total_possible_points",
    "percentage",
    "even_weighting_percentage",
    "score",
];

/// Writes serializable rows to a CSV file with a header row, replacing any
/// existing file.
///
/// The header comes from the rows' field names. `headers` is only written
/// when there are no rows, so an empty table still names its columns.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    if rows.is_empty() {
        writer.write_record(headers)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes every dashboard table as CSV into `dir`, creating it if needed.
pub fn export_dashboard(dir: &Path, dashboard: &Dashboard) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    write_table(&dir.join("records.csv"), RECORD_HEADERS, &dashboard.records)?;
    write_table(
        &dir.join("mean_by_homework.csv"),
        MEAN_HEADERS,
        &dashboard.mean_by_homework,
    )?;
    write_table(&dir.join("bins.csv"), BIN_HEADERS, &dashboard.histogram)?;
    write_table(&dir.join("group_totals.csv"), TOTAL_HEADERS, &dashboard.group_totals)?;

    info!(dir = %dir.display(), "Dashboard tables exported");
    Ok(())
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Graded")]
    graded: usize,
    #[tabled(rename = "Pass")]
    passed: usize,
    #[tabled(rename = "Fail")]
    failed: usize,
    #[tabled(rename = "Average")]
    average: String,
}

#[derive(Tabled)]
struct MeanRow {
    #[tabled(rename = "Homework")]
    homework: String,
    #[tabled(rename = "Mean %")]
    mean: String,
}

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Bin")]
    bin: String,
    #[tabled(rename = "Homework")]
    homework: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Percentage")]
    percentage: String,
    #[tabled(rename = "Even weighting")]
    even_weighting: String,
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1} %"),
        None => "n/a".to_string(),
    }
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}

/// Renders the dashboard as terminal tables.
pub fn render_tables(dashboard: &Dashboard) -> String {
    let s = &dashboard.summary;
    let metrics = table(vec![MetricRow {
        graded: s.graded,
        passed: s.passed,
        failed: s.failed,
        average: format!("{} %", s.average),
    }]);

    let means = table(
        dashboard
            .mean_by_homework
            .iter()
            .map(|m| MeanRow {
                homework: m.homework.clone(),
                mean: percent(m.mean_percentage),
            })
            .collect(),
    );

    let bins = table(
        dashboard
            .histogram
            .iter()
            .map(|b| BinRow {
                bin: b.bin.clone(),
                homework: b.homework.clone(),
                count: b.count,
            })
            .collect(),
    );

    let totals = table(
        dashboard
            .group_totals
            .iter()
            .map(|t| TotalRow {
                group: t.group.clone(),
                score: t.score.clone(),
                percentage: format!("{} %", t.percentage),
                even_weighting: format!("{} %", t.even_weighting_percentage),
            })
            .collect(),
    );

    format!(
        "{}\n\n{metrics}\n\nMean percentage per homework\n{means}\n\n\
         Submissions per percentage bin\n{bins}\n\nGroup totals\n{totals}\n",
        dashboard.title
    )
}

/// Renders the available filter options as a two-line listing.
pub fn render_filter_options(options: &FilterOptions) -> String {
    format!(
        "Homework: {}\nGroup: {}\n",
        options.homework.join(", "),
        options.group.join(", ")
    )
}
