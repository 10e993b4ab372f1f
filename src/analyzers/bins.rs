use std::collections::BTreeMap;

use crate::analyzers::types::BinCount;
use crate::records::GradeRecord;

/// Bin edges in percent. Bins are right-closed, the first one also holds 0.
pub static BIN_EDGES: &[u32] = &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Label of the bin at `index`, e.g. `"40% - 50%"`.
pub fn bin_label(index: usize) -> String {
    format!("{}% - {}%", BIN_EDGES[index], BIN_EDGES[index + 1])
}

/// Index of the bin holding `percentage`, or `None` outside `[0, 100]`.
pub fn bin_index(percentage: f64) -> Option<usize> {
    let lowest = f64::from(BIN_EDGES[0]);
    if percentage == lowest {
        return Some(0);
    }
    BIN_EDGES
        .windows(2)
        .position(|w| percentage > f64::from(w[0]) && percentage <= f64::from(w[1]))
}

/// Counts submissions per `(bin, homework)`. Only combinations that occur
/// produce a row; rows are ordered by bin, then homework.
///
/// Records without a defined percentage, or with one outside every bin, are
/// not counted.
pub fn bin_histogram(records: &[GradeRecord]) -> Vec<BinCount> {
    let mut counts: BTreeMap<(usize, &str), usize> = BTreeMap::new();

    for r in records {
        let Some(index) = r.percentage.and_then(bin_index) else {
            continue;
        };
        *counts.entry((index, r.homework.as_str())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((index, homework), count)| BinCount {
            bin: bin_label(index),
            homework: homework.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::clean::clean;
    use crate::analyzers::test_support::{record, scenario};

    #[test]
    fn test_bin_index_boundaries() {
        assert_eq!(bin_index(0.0), Some(0));
        assert_eq!(bin_index(10.0), Some(0));
        assert_eq!(bin_index(11.0), Some(1));
        assert_eq!(bin_index(50.0), Some(4));
        assert_eq!(bin_index(51.0), Some(5));
        assert_eq!(bin_index(100.0), Some(9));
        assert_eq!(bin_index(101.0), None);
        assert_eq!(bin_index(-1.0), None);
        assert_eq!(bin_index(f64::NAN), None);
    }

    #[test]
    fn test_bin_labels() {
        assert_eq!(bin_label(0), "0% - 10%");
        assert_eq!(bin_label(4), "40% - 50%");
        assert_eq!(bin_label(9), "90% - 100%");
    }

    #[test]
    fn test_bin_histogram_scenario() {
        let bins = bin_histogram(&clean(&scenario(), None));

        let rows: Vec<_> = bins
            .iter()
            .map(|b| (b.bin.as_str(), b.homework.as_str(), b.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("40% - 50%", "hw2", 1),
                ("70% - 80%", "hw1", 1),
                ("90% - 100%", "hw1", 1),
            ]
        );
    }

    #[test]
    fn test_bin_histogram_counts_per_homework() {
        let records = vec![
            record("g1", "hw1", 9.5, 10.0),
            record("g2", "hw1", 10.0, 10.0),
            record("g3", "hw1", 0.0, 10.0),
            record("g4", "hw1", 3.0, 0.0),
        ];
        let bins = bin_histogram(&clean(&records, None));

        let total: usize = bins.iter().filter(|b| b.homework == "hw1").map(|b| b.count).sum();
        assert_eq!(total, 3);
        assert_eq!(bins[0].bin, "0% - 10%");
        assert_eq!(bins[1].bin, "90% - 100%");
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn test_bin_histogram_skips_bonus_above_hundred() {
        let records = vec![record("g1", "hw1", 12.0, 10.0)];
        assert!(bin_histogram(&clean(&records, None)).is_empty());
    }

    #[test]
    fn test_bin_histogram_empty() {
        assert!(bin_histogram(&[]).is_empty());
    }
}
