use crate::core::ScreenPoint;

/// Thins a dense screen-space polyline before smoothing.
///
/// The first point is always kept. A later point is kept when it lies at
/// least `minimum_distance` from the last kept point; the final point is
/// kept unconditionally so the curve ends exactly where the data does.
#[must_use]
pub fn resample_points(points: &[ScreenPoint], minimum_distance: f64) -> Vec<ScreenPoint> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let minimum_squared = minimum_distance * minimum_distance;
    let last_index = rest.len().saturating_sub(1);
    let mut result = Vec::with_capacity(points.len());
    result.push(first);
    let mut anchor = first;

    for (index, &point) in rest.iter().enumerate() {
        if anchor.distance_to_squared(point) < minimum_squared && index != last_index {
            continue;
        }
        anchor = point;
        result.push(point);
    }

    result
}
