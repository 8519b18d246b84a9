use crate::core::ScreenPoint;

/// Tension used by series smoothing.
pub const DEFAULT_TENSION: f64 = 0.5;
/// Subdivision tolerance used by series smoothing, in pixels.
pub const DEFAULT_TOLERANCE: f64 = 0.25;

const MAX_SAMPLES_PER_SEGMENT: usize = 1 << 16;

/// Builds a canonical (cardinal) spline through `points`.
///
/// Each knot's tangent is `tension * (next - previous)`; a tension of zero
/// degenerates to straight segments. `tensions`, when non-empty, overrides
/// `tension` per knot and is cycled. `closed` treats the first and last
/// knots as neighbours and adds the closing segment. Every control point is
/// reproduced exactly; `tolerance` sets the spacing of the samples placed
/// between knots (smaller means denser).
#[must_use]
pub fn create_spline(
    points: &[ScreenPoint],
    tension: f64,
    tensions: Option<&[f64]>,
    closed: bool,
    tolerance: f64,
) -> Vec<ScreenPoint> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let tension_at = |index: usize| match tensions {
        Some(list) if !list.is_empty() => list[index % list.len()],
        _ => tension,
    };

    let segment_count = if closed { n } else { n - 1 };
    let mut result = Vec::with_capacity(n * 4);
    for i in 0..segment_count {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p0 = match (i, closed) {
            (0, true) => points[n - 1],
            (0, false) => points[0],
            _ => points[i - 1],
        };
        let p3 = if i + 2 < n || closed {
            points[(i + 2) % n]
        } else {
            points[n - 1]
        };
        push_segment(
            &mut result,
            [p0, p1, p2, p3],
            tension_at(i),
            tension_at(i + 1),
            tolerance,
        );
    }
    result.push(if closed { points[0] } else { points[n - 1] });
    result
}

/// Appends the start knot of `p1 -> p2` plus interior samples, excluding `p2`.
fn push_segment(
    out: &mut Vec<ScreenPoint>,
    [p0, p1, p2, p3]: [ScreenPoint; 4],
    t1: f64,
    t2: f64,
    tolerance: f64,
) {
    let s1 = (p2 - p0) * t1;
    let s2 = (p3 - p1) * t2;

    let a = s1 + s2 + p1 * 2.0 - p2 * 2.0;
    let b = s1 * -2.0 - s2 - p1 * 3.0 + p2 * 3.0;
    let c = s1;
    let d = p1;

    out.push(p1);

    let samples = sample_count(p1, p2, tolerance);
    for k in 1..samples {
        let t = k as f64 / samples as f64;
        out.push(a * (t * t * t) + b * (t * t) + c * t + d);
    }
}

fn sample_count(p1: ScreenPoint, p2: ScreenPoint, tolerance: f64) -> usize {
    if tolerance.is_nan() || tolerance <= 0.0 {
        return 1;
    }
    let length = (p1.x - p2.x).abs() + (p1.y - p2.y).abs();
    let count = (length / tolerance).floor();
    if !count.is_finite() {
        return 1;
    }
    (count as usize).clamp(1, MAX_SAMPLES_PER_SEGMENT)
}
