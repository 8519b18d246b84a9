use crate::core::hit_test::TrackerHitResult;
use crate::core::{AreaSeries, Axis, DataRange, LineSeries, ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::RenderContext;

/// Contract between a plot host and its series.
///
/// Hosts drive the sequence `update_data`, `update_min_max`, axis range and
/// transform updates, then `render`. Series never call back into the host.
pub trait Series {
    fn title(&self) -> Option<&str>;

    fn is_visible(&self) -> bool;

    /// Extent of the data after the last `update_min_max`.
    fn data_range(&self) -> DataRange;

    fn update_data(&mut self) -> PlotResult<()>;

    fn update_min_max(&mut self);

    fn render(&self, ctx: &mut dyn RenderContext, x_axis: &Axis, y_axis: &Axis) -> PlotResult<()>;

    fn render_legend(&self, ctx: &mut dyn RenderContext, legend_box: ScreenRect) -> PlotResult<()>;

    fn nearest_point(
        &self,
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult>;
}

impl Series for LineSeries {
    fn title(&self) -> Option<&str> {
        LineSeries::title(self)
    }

    fn is_visible(&self) -> bool {
        LineSeries::is_visible(self)
    }

    fn data_range(&self) -> DataRange {
        LineSeries::data_range(self)
    }

    fn update_data(&mut self) -> PlotResult<()> {
        LineSeries::update_data(self)
    }

    fn update_min_max(&mut self) {
        LineSeries::update_min_max(self);
    }

    fn render(&self, ctx: &mut dyn RenderContext, x_axis: &Axis, y_axis: &Axis) -> PlotResult<()> {
        LineSeries::render(self, ctx, x_axis, y_axis)
    }

    fn render_legend(&self, ctx: &mut dyn RenderContext, legend_box: ScreenRect) -> PlotResult<()> {
        LineSeries::render_legend(self, ctx, legend_box)
    }

    fn nearest_point(
        &self,
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult> {
        LineSeries::nearest_point(self, x_axis, y_axis, target, interpolate)
    }
}

impl Series for AreaSeries {
    fn title(&self) -> Option<&str> {
        self.line().title()
    }

    fn is_visible(&self) -> bool {
        self.line().is_visible()
    }

    fn data_range(&self) -> DataRange {
        AreaSeries::data_range(self)
    }

    fn update_data(&mut self) -> PlotResult<()> {
        AreaSeries::update_data(self)
    }

    fn update_min_max(&mut self) {
        AreaSeries::update_min_max(self);
    }

    fn render(&self, ctx: &mut dyn RenderContext, x_axis: &Axis, y_axis: &Axis) -> PlotResult<()> {
        AreaSeries::render(self, ctx, x_axis, y_axis)
    }

    fn render_legend(&self, ctx: &mut dyn RenderContext, legend_box: ScreenRect) -> PlotResult<()> {
        AreaSeries::render_legend(self, ctx, legend_box)
    }

    fn nearest_point(
        &self,
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult> {
        AreaSeries::nearest_point(self, x_axis, y_axis, target, interpolate)
    }
}

/// Runs one data/range/transform refresh for `series` over an axis pair.
///
/// Axis data ranges are reset and refolded from every visible series before
/// both transforms are rebuilt for `plot_area`.
pub fn refresh_axes(
    series: &mut [&mut dyn Series],
    x_axis: &mut Axis,
    y_axis: &mut Axis,
    plot_area: ScreenRect,
) -> PlotResult<()> {
    x_axis.reset_data_range();
    y_axis.reset_data_range();
    for item in series.iter_mut() {
        item.update_data()?;
        item.update_min_max();
        if item.is_visible() {
            let range = item.data_range();
            x_axis.include_span(range.x_span());
            y_axis.include_span(range.y_span());
        }
    }
    x_axis.update_actual_range();
    y_axis.update_actual_range();
    x_axis.update_transform(plot_area)?;
    y_axis.update_transform(plot_area)
}
