use std::collections::{BTreeMap, HashSet};

use crate::analyzers::types::GroupTotal;
use crate::records::GradeRecord;

#[derive(Default)]
struct Sums {
    points: f64,
    total_possible_points: f64,
    percentage: f64,
}

/// Sums points, possible points and percentages per group, ordered by summed
/// points ascending.
///
/// `even_weighting_percentage` divides the summed percentage by the number of
/// distinct homeworks in the whole input, not by the homeworks the group
/// handed in. `percentage` is 0 for a group whose possible points sum to 0.
pub fn group_totals(records: &[GradeRecord]) -> Vec<GroupTotal> {
    let homework_count = records
        .iter()
        .map(|r| r.homework.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut sums: BTreeMap<&str, Sums> = BTreeMap::new();
    for r in records {
        let s = sums.entry(r.group.as_str()).or_default();
        s.points += r.points;
        s.total_possible_points += r.total_possible_points;
        s.percentage += r.percentage.unwrap_or(0.0);
    }

    let mut totals: Vec<GroupTotal> = sums
        .into_iter()
        .map(|(group, s)| {
            let percentage = if s.total_possible_points == 0.0 {
                0.0
            } else {
                ((s.points / s.total_possible_points) * 100.0).round_ties_even()
            };

            GroupTotal {
                group: group.to_string(),
                points: s.points,
                total_possible_points: s.total_possible_points,
                percentage,
                even_weighting_percentage: (s.percentage / homework_count as f64)
                    .round_ties_even(),
                score: format!("{} / {}", s.points, s.total_possible_points),
            }
        })
        .collect();

    totals.sort_by(|a, b| a.points.total_cmp(&b.points));
    totals
}
