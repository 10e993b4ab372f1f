/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Collects the defined percentages of a record iterator.
pub fn defined_percentages<'a, I>(records: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a crate::records::GradeRecord>,
{
    records.into_iter().filter_map(|r| r.percentage).collect()
}
