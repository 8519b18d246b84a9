use std::sync::Arc;

use serde_json::json;
use xyplot::core::{
    Axis, AxisPosition, DataPoint, FieldMapping, LineSeries, ScreenPoint, ScreenRect, Series,
    refresh_axes,
};
use xyplot::render::{Color, DrawCommand, LineJoin, LineStyle, MarkerType, RecordingContext};

fn identity_axes() -> (Axis, Axis) {
    (
        Axis::new(AxisPosition::Bottom),
        Axis::new(AxisPosition::Left),
    )
}

#[test]
fn segments_render_as_separate_polylines_with_markers() {
    let mut series = LineSeries::new()
        .with_markers(MarkerType::Square, 4.0)
        .with_points([
            DataPoint::new(0.0, 1.0),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(f64::NAN, 3.0),
            DataPoint::new(3.0, 4.0),
            DataPoint::new(4.0, 5.0),
        ]);
    series.update_data().expect("update");

    let (x_axis, y_axis) = identity_axes();
    let mut ctx = RecordingContext::new();
    series.render(&mut ctx, &x_axis, &y_axis).expect("render");
    let frame = ctx.into_frame();

    assert_eq!(frame.clipped_lines().count(), 2);
    let markers: Vec<&[ScreenPoint]> = frame.marker_batches().collect();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[1], &[ScreenPoint::new(3.0, 4.0), ScreenPoint::new(4.0, 5.0)]);
    frame.validate().expect("valid frame");
}

#[test]
fn stroke_carries_dash_join_and_thickness() {
    let color = Color::rgb(0.2, 0.4, 0.6);
    let mut series = LineSeries::new()
        .with_color(color)
        .with_stroke_thickness(3.0)
        .with_line_style(LineStyle::Dash)
        .with_line_join(LineJoin::Round)
        .with_minimum_segment_length(4.0)
        .with_points([DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 0.0)]);
    series.update_data().expect("update");

    let (x_axis, y_axis) = identity_axes();
    let mut ctx = RecordingContext::new();
    series.render(&mut ctx, &x_axis, &y_axis).expect("render");

    let Some(DrawCommand::ClippedLine {
        min_dist_squared,
        stroke,
        ..
    }) = ctx.frame.commands.get(1)
    else {
        panic!("expected a clipped line after set_clip");
    };
    assert_eq!(*min_dist_squared, 16.0);
    assert_eq!(stroke.color, color);
    assert_eq!(stroke.thickness, 3.0);
    assert_eq!(stroke.line_join, LineJoin::Round);
    assert_eq!(stroke.dash_in_pixels().as_deref(), Some(&[12.0, 3.0][..]));
}

#[test]
fn line_style_none_keeps_markers_only() {
    let mut series = LineSeries::new()
        .with_line_style(LineStyle::None)
        .with_markers(MarkerType::Circle, 2.0)
        .with_points([DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)]);
    series.update_data().expect("update");

    let (x_axis, y_axis) = identity_axes();
    let mut ctx = RecordingContext::new();
    series.render(&mut ctx, &x_axis, &y_axis).expect("render");
    assert_eq!(ctx.frame.clipped_lines().count(), 0);
    assert_eq!(ctx.frame.marker_batches().count(), 1);
}

#[test]
fn smoothing_adds_samples_between_knots() {
    let points = [
        DataPoint::new(0.0, 0.0),
        DataPoint::new(10.0, 10.0),
        DataPoint::new(20.0, 0.0),
    ];
    let mut series = LineSeries::new().with_smooth(true).with_points(points);
    series.update_data().expect("update");

    let (x_axis, y_axis) = identity_axes();
    let mut ctx = RecordingContext::new();
    series.render(&mut ctx, &x_axis, &y_axis).expect("render");

    let line = ctx.frame.clipped_lines().next().expect("one line");
    assert!(line.len() > points.len());
    assert_eq!(line.first(), Some(&ScreenPoint::new(0.0, 0.0)));
    assert_eq!(line.last(), Some(&ScreenPoint::new(20.0, 0.0)));
    assert!(line.contains(&ScreenPoint::new(10.0, 10.0)));
}

#[test]
fn items_source_takes_precedence_over_points() {
    let source: Arc<[serde_json::Value]> = Arc::from(vec![
        json!({ "x": 0.0, "y": 1.0 }),
        json!({ "x": 1.0, "y": null }),
    ]);
    let mut series = LineSeries::new()
        .with_points([DataPoint::new(5.0, 5.0)])
        .with_items_source(source, None);
    series.update_data().expect("update");
    assert_eq!(series.actual_points().len(), 2);
    assert!(series.actual_points()[1].y.is_nan());

    let (x_axis, y_axis) = identity_axes();
    let hit = series
        .nearest_point(&x_axis, &y_axis, ScreenPoint::new(0.0, 1.0), false)
        .expect("hit");
    assert_eq!(hit.item, Some(json!({ "x": 0.0, "y": 1.0 })));
}

#[test]
fn mapped_records_and_legend() {
    let source: Arc<[serde_json::Value]> = Arc::from(vec![json!({ "t": 2, "v": { "close": 7 } })]);
    let mut series = LineSeries::new()
        .with_markers(MarkerType::Diamond, 3.0)
        .with_items_source(source, Some(FieldMapping::new("t", "v.close")));
    series.update_data().expect("update");
    assert_eq!(series.actual_points(), &[DataPoint::new(2.0, 7.0)]);

    let mut ctx = RecordingContext::new();
    series
        .render_legend(&mut ctx, ScreenRect::new(0.0, 0.0, 16.0, 8.0))
        .expect("legend");
    let line = ctx.frame.lines().next().expect("legend line");
    assert_eq!(line, &[ScreenPoint::new(0.0, 4.0), ScreenPoint::new(16.0, 4.0)]);
    let marker = ctx.frame.marker_batches().next().expect("legend marker");
    assert_eq!(marker, &[ScreenPoint::new(8.0, 4.0)]);
}

#[test]
fn refresh_axes_fits_visible_series() {
    let mut visible = LineSeries::new().with_points([DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 5.0)]);
    let mut hidden = LineSeries::new().with_points([DataPoint::new(-100.0, 100.0)]);
    hidden.set_visible(false);

    let mut x_axis = Axis::new(AxisPosition::Bottom);
    let mut y_axis = Axis::new(AxisPosition::Left);
    let plot_area = ScreenRect::new(0.0, 0.0, 100.0, 50.0);
    refresh_axes(
        &mut [&mut visible as &mut dyn Series, &mut hidden],
        &mut x_axis,
        &mut y_axis,
        plot_area,
    )
    .expect("refresh");

    assert_eq!(x_axis.actual_range(), (0.0, 10.0));
    assert_eq!(y_axis.actual_range(), (0.0, 5.0));
    assert_eq!(
        x_axis.transform(10.0, 0.0, &y_axis),
        ScreenPoint::new(100.0, 50.0)
    );
}
