use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xyplot::core::{
    AreaSeries, Axis, AxisPosition, DataPoint, LineSeries, ScreenPoint, ScreenRect,
    create_spline, resample_points, split_segments,
};
use xyplot::render::RecordingContext;

fn wave(count: usize) -> Vec<DataPoint> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            let y = if i % 97 == 0 { f64::NAN } else { (x * 0.01).sin() * 100.0 };
            DataPoint::new(x, y)
        })
        .collect()
}

fn fitted_axes(count: usize) -> (Axis, Axis) {
    let plot_area = ScreenRect::new(0.0, 0.0, 1600.0, 900.0);
    let mut x_axis = Axis::new(AxisPosition::Bottom).with_range(0.0, count as f64);
    let mut y_axis = Axis::new(AxisPosition::Left).with_range(-120.0, 120.0);
    x_axis.update_actual_range();
    y_axis.update_actual_range();
    x_axis.update_transform(plot_area).expect("x transform");
    y_axis.update_transform(plot_area).expect("y transform");
    (x_axis, y_axis)
}

fn bench_split_segments_10k(c: &mut Criterion) {
    let points = wave(10_000);
    c.bench_function("split_segments_10k", |b| {
        b.iter(|| {
            let _ = split_segments(black_box(&points), |p| p.x.is_nan() || p.y.is_nan());
        })
    });
}

fn bench_spline_pipeline_2k(c: &mut Criterion) {
    let screen: Vec<ScreenPoint> = (0..2_000)
        .map(|i| {
            let x = i as f64 * 0.8;
            ScreenPoint::new(x, 450.0 + (x * 0.05).sin() * 200.0)
        })
        .collect();

    c.bench_function("resample_then_spline_2k", |b| {
        b.iter(|| {
            let resampled = resample_points(black_box(&screen), 2.0);
            let _ = create_spline(&resampled, 0.5, None, false, 0.25);
        })
    });
}

fn bench_area_render_10k(c: &mut Criterion) {
    let count = 10_000;
    let mut series = AreaSeries::new(LineSeries::new().with_points(wave(count)))
        .with_points2(wave(count).into_iter().map(|p| DataPoint::new(p.x, p.y - 15.0)));
    series.update_data().expect("update");
    let (x_axis, y_axis) = fitted_axes(count);

    c.bench_function("area_render_10k", |b| {
        b.iter(|| {
            let mut ctx = RecordingContext::resolving_clipping();
            series
                .render(&mut ctx, black_box(&x_axis), black_box(&y_axis))
                .expect("render");
            black_box(ctx.into_frame());
        })
    });
}

criterion_group!(
    benches,
    bench_split_segments_10k,
    bench_spline_pipeline_2k,
    bench_area_render_10k
);
criterion_main!(benches);
