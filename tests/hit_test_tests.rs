use approx::assert_relative_eq;
use proptest::prelude::*;
use xyplot::core::hit_test::{TrackerArg, TrackerHitResult, format_tracker, pick_nearest};
use xyplot::core::{
    AreaSeries, Axis, AxisPosition, AxisValue, AxisValueKind, DataPoint, LineSeries, ScreenPoint,
    Series,
};

fn axes() -> (Axis, Axis) {
    (
        Axis::new(AxisPosition::Bottom).with_title("Time"),
        Axis::new(AxisPosition::Left),
    )
}

fn area(primary: Vec<DataPoint>, secondary: Vec<DataPoint>) -> AreaSeries {
    let mut series = AreaSeries::new(LineSeries::new().with_title("band").with_points(primary))
        .with_points2(secondary);
    series.update_data().expect("update");
    series
}

#[test]
fn equidistant_boundaries_resolve_to_primary() {
    let (x_axis, y_axis) = axes();
    let series = area(
        vec![DataPoint::new(0.0, 2.0)],
        vec![DataPoint::new(0.0, -2.0)],
    );

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(0.0, 0.0), false)
        .expect("hit");
    assert_eq!(hit.data_point, DataPoint::new(0.0, 2.0));
}

#[test]
fn strictly_closer_secondary_wins() {
    let (x_axis, y_axis) = axes();
    let series = area(
        vec![DataPoint::new(0.0, 2.0)],
        vec![DataPoint::new(0.0, -1.0)],
    );

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(0.0, 0.0), false)
        .expect("hit");
    assert_eq!(hit.data_point, DataPoint::new(0.0, -1.0));
}

#[test]
fn empty_boundaries_give_no_hit() {
    let (x_axis, y_axis) = axes();
    let mut series = AreaSeries::new(LineSeries::new()).with_constant_y2(f64::NAN);
    series.update_data().expect("update");
    assert!(
        series
            .nearest_point(&x_axis, &y_axis, ScreenPoint::new(1.0, 1.0), true)
            .is_none()
    );
}

#[test]
fn interpolated_hit_lands_on_the_segment() {
    let (x_axis, y_axis) = axes();
    let mut series = LineSeries::new().with_points([DataPoint::new(0.0, 0.0), DataPoint::new(4.0, 0.0)]);
    series.update_data().expect("update");

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(1.0, 3.0), true)
        .expect("hit");
    assert_relative_eq!(hit.position.x, 1.0);
    assert_relative_eq!(hit.position.y, 0.0);
    assert_relative_eq!(hit.index, 0.25);
    assert_relative_eq!(hit.data_point.x, 1.0);

    let vertex = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(1.0, 3.0), false)
        .expect("hit");
    assert_eq!(vertex.data_point, DataPoint::new(0.0, 0.0));
    assert_eq!(vertex.index, 0.0);
}

#[test]
fn smoothed_series_snaps_to_vertices() {
    let (x_axis, y_axis) = axes();
    let mut series = LineSeries::new()
        .with_smooth(true)
        .with_points([DataPoint::new(0.0, 0.0), DataPoint::new(4.0, 0.0)]);
    series.update_data().expect("update");
    assert!(!series.can_tracker_interpolate());

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(3.5, 1.0), true)
        .expect("hit");
    assert_eq!(hit.data_point, DataPoint::new(4.0, 0.0));
}

#[test]
fn gaps_are_never_hit() {
    let (x_axis, y_axis) = axes();
    let mut series = LineSeries::new().with_points([
        DataPoint::new(0.0, 0.0),
        DataPoint::new(1.0, f64::NAN),
        DataPoint::new(10.0, 0.0),
    ]);
    series.update_data().expect("update");

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(1.0, 0.0), false)
        .expect("hit");
    assert_eq!(hit.data_point, DataPoint::new(0.0, 0.0));

    // No two adjacent defined points, so there is no line to slide along.
    assert!(
        series
            .nearest_point(&x_axis, &y_axis, ScreenPoint::new(1.0, 0.0), true)
            .is_none()
    );
}

#[test]
fn tracker_text_uses_titles_and_formatted_values() {
    let (x_axis, y_axis) = axes();
    let series = area(
        vec![DataPoint::new(1.5, 2.0)],
        vec![DataPoint::new(1.5, -5.0)],
    );

    let hit = Series::nearest_point(&series, &x_axis, &y_axis, ScreenPoint::new(1.5, 2.0), false)
        .expect("hit");
    assert_eq!(hit.text, "band\nTime: 1.5\nY: 2");
    assert_eq!(hit.series_title.as_deref(), Some("band"));
    assert_eq!(hit.x_axis_title, "Time");
    assert_eq!(hit.y_axis_title, "Y");
}

#[test]
fn date_time_axes_accept_strftime_patterns() {
    let x_axis = Axis::new(AxisPosition::Bottom).with_value_kind(AxisValueKind::DateTime);
    let y_axis = Axis::new(AxisPosition::Left);
    let mut series = LineSeries::new()
        .with_tracker_format("{2:%Y-%m-%d}|{4:0.0}")
        .with_points([DataPoint::new(86_400.0, 3.0)]);
    series.update_data().expect("update");

    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(0.0, 0.0), false)
        .expect("hit");
    assert_eq!(hit.text, "1970-01-02|3.0");
}

#[test]
fn format_tracker_leaves_unknown_placeholders() {
    let args = [TrackerArg::Value(AxisValue::Number(2.6))];
    assert_eq!(format_tracker("{0:0} {1} {x}", &args), "3 {1} {x}");
}

fn hit_at(x: f64, y: f64) -> TrackerHitResult {
    let mut series = LineSeries::new().with_points([DataPoint::new(x, y)]);
    series.update_data().expect("update");
    let (x_axis, y_axis) = axes();
    series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(x, y), false)
        .expect("hit")
}

proptest! {
    #[test]
    fn pick_nearest_prefers_primary_unless_strictly_closer(
        tx in -100.0f64..100.0,
        ty in -100.0f64..100.0,
        dx1 in -50.0f64..50.0,
        dy1 in -50.0f64..50.0,
        dx2 in -50.0f64..50.0,
        dy2 in -50.0f64..50.0,
    ) {
        let target = ScreenPoint::new(tx, ty);
        let primary = hit_at(tx + dx1, ty + dy1);
        let secondary = hit_at(tx + dx2, ty + dy2);
        let d1 = primary.distance_to(target);
        let d2 = secondary.distance_to(target);

        let picked = pick_nearest(Some(primary.clone()), Some(secondary.clone()), target)
            .expect("hit");
        if d2 < d1 {
            prop_assert_eq!(picked.position, secondary.position);
        } else {
            prop_assert_eq!(picked.position, primary.position);
        }

        let mirrored = pick_nearest(Some(primary.clone()), Some(primary.clone()), target)
            .expect("hit");
        prop_assert_eq!(mirrored.position, primary.position);
        prop_assert_eq!(pick_nearest(None, Some(secondary.clone()), target).map(|h| h.position), Some(secondary.position));
    }
}
