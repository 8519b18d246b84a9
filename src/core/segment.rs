use crate::core::DataPoint;

/// Splits `source` into maximal runs of items for which `is_invalid` is false.
///
/// Invalid items are dropped and never appear in the output. Every returned
/// segment is non-empty, and consecutive segments were separated by at least
/// one invalid item in the input.
#[must_use]
pub fn split_segments<T, F>(source: &[T], is_invalid: F) -> Vec<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let mut segments = Vec::new();
    let mut rest = source;

    loop {
        let skip = rest.iter().take_while(|item| is_invalid(*item)).count();
        rest = &rest[skip..];
        if rest.is_empty() {
            break;
        }

        let run = rest.iter().take_while(|item| !is_invalid(*item)).count();
        segments.push(rest[..run].to_vec());
        rest = &rest[run..];
    }

    segments
}

/// Gap predicate used by series: a NaN in either coordinate.
#[must_use]
pub fn is_gap(point: &DataPoint) -> bool {
    !point.is_defined()
}

/// Splits a data sequence at NaN gaps.
#[must_use]
pub fn split_at_gaps(points: &[DataPoint]) -> Vec<Vec<DataPoint>> {
    split_segments(points, is_gap)
}
