//! Homework and group allow-lists.

use serde::Serialize;
use std::collections::HashSet;

use crate::records::GradeRecord;

/// Allow-lists applied by [`crate::analyzers::clean::clean`]. A record passes
/// only when both its homework and its group are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub homework: HashSet<String>,
    pub group: HashSet<String>,
}

impl Filter {
    pub fn new<H, G>(homework: H, group: G) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Filter {
            homework: homework.into_iter().map(Into::into).collect(),
            group: group.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, record: &GradeRecord) -> bool {
        self.homework.contains(&record.homework) && self.group.contains(&record.group)
    }
}

/// Distinct homework and group identifiers a viewer can choose from, in
/// order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub homework: Vec<String>,
    pub group: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[GradeRecord]) -> Self {
        FilterOptions {
            homework: unique(records.iter().map(|r| r.homework.as_str())),
            group: unique(records.iter().map(|r| r.group.as_str())),
        }
    }

    /// Builds a filter from a viewer's selection. An empty selection for a
    /// dimension selects all of its options.
    pub fn select(&self, homework: &[String], group: &[String]) -> Filter {
        let pick = |chosen: &[String], options: &[String]| -> HashSet<String> {
            if chosen.is_empty() {
                options.iter().cloned().collect()
            } else {
                chosen.iter().cloned().collect()
            }
        };
        Filter {
            homework: pick(homework, &self.homework),
            group: pick(group, &self.group),
        }
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
