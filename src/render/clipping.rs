//! Clipping and point-reduction helpers behind the clipped drawing calls.
//!
//! Lines are clipped per segment (Cohen-Sutherland) and may split into
//! several visible runs; polygons are clipped against the rectangle as a
//! whole (Sutherland-Hodgman).

use std::collections::HashSet;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::{Color, LineStroke, RenderContext};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn outcode(rect: ScreenRect, point: ScreenPoint) -> u8 {
    let mut code = 0;
    if point.x < rect.left {
        code |= LEFT;
    } else if point.x > rect.right() {
        code |= RIGHT;
    }
    if point.y < rect.top {
        code |= TOP;
    } else if point.y > rect.bottom() {
        code |= BOTTOM;
    }
    code
}

/// Clips one segment to `rect`; `None` when nothing is visible.
#[must_use]
pub fn clip_segment(
    rect: ScreenRect,
    mut a: ScreenPoint,
    mut b: ScreenPoint,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut code_a = outcode(rect, a);
    let mut code_b = outcode(rect, b);

    // Each pass pins one endpoint onto a boundary, so four passes suffice.
    for _ in 0..8 {
        if code_a | code_b == 0 {
            return Some((a, b));
        }
        if code_a & code_b != 0 {
            return None;
        }

        let out = if code_a != 0 { code_a } else { code_b };
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let pinned = if out & TOP != 0 {
            ScreenPoint::new(a.x + dx * (rect.top - a.y) / dy, rect.top)
        } else if out & BOTTOM != 0 {
            ScreenPoint::new(a.x + dx * (rect.bottom() - a.y) / dy, rect.bottom())
        } else if out & RIGHT != 0 {
            ScreenPoint::new(rect.right(), a.y + dy * (rect.right() - a.x) / dx)
        } else {
            ScreenPoint::new(rect.left, a.y + dy * (rect.left - a.x) / dx)
        };

        if out == code_a {
            a = pinned;
            code_a = outcode(rect, a);
        } else {
            b = pinned;
            code_b = outcode(rect, b);
        }
    }
    None
}

/// Clips a polyline, returning every visible run with at least two points.
#[must_use]
pub fn clip_polyline(rect: ScreenRect, points: &[ScreenPoint]) -> Vec<Vec<ScreenPoint>> {
    fn flush(runs: &mut Vec<Vec<ScreenPoint>>, current: &mut Vec<ScreenPoint>) {
        if current.len() >= 2 {
            runs.push(std::mem::take(current));
        } else {
            current.clear();
        }
    }

    let mut runs = Vec::new();
    let mut current = Vec::new();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !a.is_finite() || !b.is_finite() {
            flush(&mut runs, &mut current);
            continue;
        }
        match clip_segment(rect, a, b) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    flush(&mut runs, &mut current);
                    current.push(start);
                }
                current.push(end);
                if end != b {
                    flush(&mut runs, &mut current);
                }
            }
            None => flush(&mut runs, &mut current),
        }
    }
    flush(&mut runs, &mut current);
    runs
}

/// Clips a closed polygon to `rect`.
#[must_use]
pub fn clip_polygon(rect: ScreenRect, points: &[ScreenPoint]) -> Vec<ScreenPoint> {
    type Inside = fn(ScreenRect, ScreenPoint) -> bool;
    type Cross = fn(ScreenRect, ScreenPoint, ScreenPoint) -> ScreenPoint;

    let edges: [(Inside, Cross); 4] = [
        (|r, p| p.x >= r.left, |r, a, b| at_x(a, b, r.left)),
        (|r, p| p.x <= r.right(), |r, a, b| at_x(a, b, r.right())),
        (|r, p| p.y >= r.top, |r, a, b| at_y(a, b, r.top)),
        (|r, p| p.y <= r.bottom(), |r, a, b| at_y(a, b, r.bottom())),
    ];

    let mut output: Vec<ScreenPoint> = points.iter().copied().filter(|p| p.is_finite()).collect();
    for (inside, cross) in edges {
        let Some(&last) = output.last() else {
            break;
        };
        let input = std::mem::take(&mut output);
        let mut previous = last;
        for current in input {
            match (inside(rect, current), inside(rect, previous)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(cross(rect, previous, current));
                    output.push(current);
                }
                (false, true) => output.push(cross(rect, previous, current)),
                (false, false) => {}
            }
            previous = current;
        }
    }
    output
}

fn at_x(a: ScreenPoint, b: ScreenPoint, x: f64) -> ScreenPoint {
    let t = (x - a.x) / (b.x - a.x);
    ScreenPoint::new(x, a.y + (b.y - a.y) * t)
}

fn at_y(a: ScreenPoint, b: ScreenPoint, y: f64) -> ScreenPoint {
    let t = (y - a.y) / (b.y - a.y);
    ScreenPoint::new(a.x + (b.x - a.x) * t, y)
}

/// Drops points closer than `sqrt(min_dist_squared)` to the previously kept
/// one. The last input point is always kept.
#[must_use]
pub fn reduce_points(points: &[ScreenPoint], min_dist_squared: f64) -> Vec<ScreenPoint> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len());
    out.push(first);
    let mut last = first;
    for &point in rest {
        if last.distance_to_squared(point) >= min_dist_squared {
            out.push(point);
            last = point;
        }
    }
    if let Some(&end) = rest.last() {
        if last != end {
            out.push(end);
        }
    }
    out
}

/// Marker centres inside `clip`, keeping one centre per `bin_size` cell.
#[must_use]
pub fn marker_positions(clip: ScreenRect, points: &[ScreenPoint], bin_size: usize) -> Vec<ScreenPoint> {
    let inside = points.iter().copied().filter(|p| p.is_finite() && clip.contains(*p));
    if bin_size <= 1 {
        return inside.collect();
    }

    let bin = bin_size as f64;
    let mut seen = HashSet::new();
    inside
        .filter(|p| seen.insert(((p.x / bin).floor() as i64, (p.y / bin).floor() as i64)))
        .collect()
}

/// Clips, thins and strokes a polyline through `context.draw_line`.
pub fn stroke_clipped_line<C>(
    context: &mut C,
    clip: ScreenRect,
    points: &[ScreenPoint],
    min_dist_squared: f64,
    stroke: &LineStroke,
) -> PlotResult<()>
where
    C: RenderContext + ?Sized,
{
    let reduced = reduce_points(points, min_dist_squared);
    for run in clip_polyline(clip, &reduced) {
        context.draw_line(&run, stroke)?;
    }
    Ok(())
}

/// Thins, clips and fills a polygon through `context.draw_polygon`.
pub fn fill_clipped_polygon<C>(
    context: &mut C,
    clip: ScreenRect,
    points: &[ScreenPoint],
    min_dist_squared: f64,
    fill: Color,
    stroke: Option<&LineStroke>,
) -> PlotResult<()>
where
    C: RenderContext + ?Sized,
{
    let reduced = reduce_points(points, min_dist_squared);
    let clipped = clip_polygon(clip, &reduced);
    if clipped.len() < 3 {
        return Ok(());
    }
    context.draw_polygon(&clipped, fill, stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ScreenRect {
        ScreenRect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn segment_crossing_rect_is_trimmed_to_edges() {
        let clipped = clip_segment(rect(), ScreenPoint::new(-5.0, 5.0), ScreenPoint::new(15.0, 5.0));
        assert_eq!(
            clipped,
            Some((ScreenPoint::new(0.0, 5.0), ScreenPoint::new(10.0, 5.0)))
        );
    }

    #[test]
    fn polyline_leaving_and_reentering_splits_into_two_runs() {
        let points = [
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(5.0, 20.0),
            ScreenPoint::new(9.0, 1.0),
        ];
        let runs = clip_polyline(rect(), &points);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0], points[0]);
        assert_eq!(runs[1].last(), Some(&points[2]));
    }

    #[test]
    fn polygon_fully_outside_vanishes() {
        let points = [
            ScreenPoint::new(20.0, 20.0),
            ScreenPoint::new(30.0, 20.0),
            ScreenPoint::new(25.0, 30.0),
        ];
        assert!(clip_polygon(rect(), &points).is_empty());
    }

    #[test]
    fn polygon_overlapping_corner_is_cut() {
        let points = [
            ScreenPoint::new(5.0, 5.0),
            ScreenPoint::new(15.0, 5.0),
            ScreenPoint::new(15.0, 15.0),
            ScreenPoint::new(5.0, 15.0),
        ];
        let clipped = clip_polygon(rect(), &points);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| rect().contains(*p)));
    }

    #[test]
    fn reduce_keeps_last_point() {
        let points = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(0.1, 0.0),
            ScreenPoint::new(0.2, 0.0),
        ];
        let reduced = reduce_points(&points, 4.0);
        assert_eq!(reduced, vec![points[0], points[2]]);
    }

    #[test]
    fn markers_share_bins() {
        let points = [
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(1.5, 1.5),
            ScreenPoint::new(8.0, 8.0),
            ScreenPoint::new(50.0, 50.0),
        ];
        assert_eq!(marker_positions(rect(), &points, 4).len(), 2);
        assert_eq!(marker_positions(rect(), &points, 1).len(), 3);
    }
}
