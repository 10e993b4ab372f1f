use tracing::debug;

use crate::analyzers::filter::Filter;
use crate::records::GradeRecord;

/// Groups that never show up in any report: the test group and the group
/// that does not receive bonus points.
pub static EXCLUDED_GROUPS: &[&str] = &["programmiergruppe00", "programmiergruppekeinebonuspunkte"];

pub fn is_excluded(group: &str) -> bool {
    EXCLUDED_GROUPS.contains(&group)
}

/// Drops excluded groups, derives `percentage` for each remaining record and
/// applies the optional allow-list filter.
///
/// Records with a zero denominator are kept with an undefined percentage.
/// The input is left untouched.
pub fn clean(records: &[GradeRecord], filter: Option<&Filter>) -> Vec<GradeRecord> {
    let cleaned: Vec<GradeRecord> = records
        .iter()
        .filter(|r| !is_excluded(&r.group))
        .map(GradeRecord::with_percentage)
        .filter(|r| filter.is_none_or(|f| f.allows(r)))
        .collect();

    debug!(
        input = records.len(),
        output = cleaned.len(),
        filtered = filter.is_some(),
        "Cleaned grade records"
    );

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{record, scenario};

    #[test]
    fn test_clean_drops_excluded_groups() {
        let mut records = scenario();
        records.push(record("programmiergruppe00", "hw1", 10.0, 10.0));
        records.push(record("programmiergruppekeinebonuspunkte", "hw2", 3.0, 10.0));

        let cleaned = clean(&records, None);

        assert_eq!(cleaned.len(), 3);
        assert!(cleaned.iter().all(|r| !is_excluded(&r.group)));
    }

    #[test]
    fn test_clean_excludes_sentinel_even_when_filter_lists_it() {
        let records = vec![record("programmiergruppe00", "hw1", 10.0, 10.0)];
        let filter = Filter::new(["hw1"], ["programmiergruppe00"]);

        assert!(clean(&records, Some(&filter)).is_empty());
    }

    #[test]
    fn test_clean_derives_percentage() {
        let cleaned = clean(&scenario(), None);
        let pcts: Vec<_> = cleaned.iter().map(|r| r.percentage).collect();

        assert_eq!(pcts, vec![Some(80.0), Some(50.0), Some(100.0)]);
    }

    #[test]
    fn test_clean_keeps_zero_denominator_records() {
        let records = vec![record("g1", "hw1", 0.0, 0.0)];
        let cleaned = clean(&records, None);

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].percentage, None);
    }

    #[test]
    fn test_clean_applies_filter() {
        let filter = Filter::new(["hw1"], ["g1", "g2"]);
        let cleaned = clean(&scenario(), Some(&filter));

        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.iter().all(|r| r.homework == "hw1"));
    }

    #[test]
    fn test_clean_filter_with_unknown_ids_yields_nothing() {
        let filter = Filter::new(["hw9"], ["g9"]);
        assert!(clean(&scenario(), Some(&filter)).is_empty());
    }

    #[test]
    fn test_clean_empty_filter_drops_everything() {
        let filter = Filter::default();
        assert!(clean(&scenario(), Some(&filter)).is_empty());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let filter = Filter::new(["hw1", "hw2"], ["g1"]);
        let once = clean(&scenario(), Some(&filter));
        let twice = clean(&once, Some(&filter));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_leaves_input_untouched() {
        let records = scenario();
        let _ = clean(&records, None);
        assert!(records.iter().all(|r| r.percentage.is_none()));
    }
}
