#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use xyplot::PlotError;
use xyplot::core::{AreaSeries, Axis, AxisPosition, DataPoint, LineSeries, ScreenRect};
use xyplot::render::{CairoRenderContext, Color, MarkerType};

fn fitted_axes(width: f64, height: f64) -> (Axis, Axis) {
    let plot_area = ScreenRect::new(0.0, 0.0, width, height);
    let mut x_axis = Axis::new(AxisPosition::Bottom).with_range(0.0, 10.0);
    let mut y_axis = Axis::new(AxisPosition::Left).with_range(-5.0, 5.0);
    x_axis.update_actual_range();
    y_axis.update_actual_range();
    x_axis.update_transform(plot_area).expect("x transform");
    y_axis.update_transform(plot_area).expect("y transform");
    (x_axis, y_axis)
}

fn sample_area() -> AreaSeries {
    let mut series = AreaSeries::new(
        LineSeries::new()
            .with_markers(MarkerType::Circle, 2.0)
            .with_points((0..=10).map(|i| DataPoint::new(f64::from(i), (f64::from(i) * 0.7).sin() * 4.0))),
    )
    .with_constant_y2(-1.0);
    series.update_data().expect("update");
    series
}

#[test]
fn cairo_context_rejects_invalid_surface_size() {
    let err = CairoRenderContext::new_image(0, 480, Color::WHITE).expect_err("invalid width");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn cairo_context_renders_area_fill_outlines_and_markers() {
    let mut ctx = CairoRenderContext::new_image(400, 200, Color::WHITE).expect("surface");
    let (x_axis, y_axis) = fitted_axes(400.0, 200.0);

    sample_area()
        .render(&mut ctx, &x_axis, &y_axis)
        .expect("render");

    let stats = ctx.stats();
    assert_eq!(ctx.backend_name(), "cairo");
    assert_eq!(stats.polygons_drawn, 1);
    assert!(stats.lines_drawn >= 2);
    assert!(stats.markers_drawn >= 11);
    assert!(ctx.surface().is_some());
}

#[test]
fn cairo_context_draws_on_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 300, 150).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut ctx = CairoRenderContext::new(context);

    sample_area()
        .render_legend(&mut ctx, ScreenRect::new(10.0, 10.0, 40.0, 20.0))
        .expect("legend");

    let stats = ctx.stats();
    assert_eq!(stats.lines_drawn, 2);
    assert_eq!(stats.polygons_drawn, 1);
    assert!(ctx.surface().is_none());
}
