use serde::Serialize;
use tracing::info;

use crate::analyzers::bins::bin_histogram;
use crate::analyzers::clean::clean;
use crate::analyzers::filter::FilterOptions;
use crate::analyzers::homework::mean_by_homework;
use crate::analyzers::summary::{group_series, summarize};
use crate::analyzers::totals::group_totals;
use crate::analyzers::types::{BinCount, GroupPoint, GroupTotal, HomeworkMean, Summary};
use crate::records::GradeRecord;
use crate::session::Session;

/// Homework and group identifiers picked by the viewer. Empty lists select
/// everything.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub homework: Vec<String>,
    pub group: Vec<String>,
}

/// Everything the presentation layer renders for one page view.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub authenticated: bool,
    pub filter_options: FilterOptions,
    pub summary: Summary,
    pub records: Vec<GradeRecord>,
    pub group_series: Vec<GroupPoint>,
    pub mean_by_homework: Vec<HomeworkMean>,
    pub histogram: Vec<BinCount>,
    pub group_totals: Vec<GroupTotal>,
}

impl Dashboard {
    /// Runs the pipeline over freshly fetched records.
    ///
    /// Filter options come from the cleaned but unfiltered records; the
    /// aggregates from the records that pass the viewer's selection.
    pub fn build(records: &[GradeRecord], session: &Session, selection: &Selection) -> Self {
        let filter_options = FilterOptions::from_records(&clean(records, None));
        let filter = filter_options.select(&selection.homework, &selection.group);
        let cleaned = clean(records, Some(&filter));

        let dashboard = Dashboard {
            title: session.title().to_string(),
            authenticated: session.is_authenticated(),
            summary: summarize(&cleaned),
            group_series: group_series(&cleaned),
            mean_by_homework: mean_by_homework(&cleaned),
            histogram: bin_histogram(&cleaned),
            group_totals: group_totals(&cleaned),
            filter_options,
            records: cleaned,
        };

        info!(
            graded = dashboard.summary.graded,
            homeworks = dashboard.mean_by_homework.len(),
            groups = dashboard.group_totals.len(),
            "Dashboard built"
        );

        dashboard
    }
}
