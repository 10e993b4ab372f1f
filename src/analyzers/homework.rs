use std::collections::BTreeMap;

use crate::analyzers::types::HomeworkMean;
use crate::analyzers::utility::mean;
use crate::records::GradeRecord;

/// Mean percentage per homework, one row per distinct homework, ordered by
/// homework identifier.
///
/// Undefined percentages are left out of the mean. A homework without any
/// defined percentage keeps its row with an undefined mean.
pub fn mean_by_homework(records: &[GradeRecord]) -> Vec<HomeworkMean> {
    let mut series: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for r in records {
        let entry = series.entry(r.homework.as_str()).or_default();
        if let Some(p) = r.percentage {
            entry.push(p);
        }
    }

    series
        .into_iter()
        .map(|(homework, values)| HomeworkMean {
            homework: homework.to_string(),
            mean_percentage: mean(&values),
        })
        .collect()
}
