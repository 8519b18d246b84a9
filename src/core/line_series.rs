use tracing::{debug, trace};

use crate::core::axis::clipping_rect;
use crate::core::data_source::{FieldMapping, ItemsSource, PointAccessor, collect_points};
use crate::core::hit_test::{
    DEFAULT_TRACKER_FORMAT, TrackerHitResult, describe_hit, nearest_interpolated, nearest_vertex,
};
use crate::core::resample::resample_points;
use crate::core::segment::split_at_gaps;
use crate::core::spline::{DEFAULT_TENSION, DEFAULT_TOLERANCE, create_spline};
use crate::core::{Axis, DataPoint, DataRange, ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::{
    Color, ColorSpec, DashPattern, LineJoin, LineStroke, LineStyle, MarkerStyle, MarkerType,
    RenderContext,
};

pub const DEFAULT_STROKE_THICKNESS: f64 = 2.0;
pub const DEFAULT_MARKER_SIZE: f64 = 3.0;
pub const DEFAULT_MINIMUM_SEGMENT_LENGTH: f64 = 2.0;

/// First entry of the default series palette (`#4E9A06`).
pub const DEFAULT_SERIES_COLOR: Color = Color::rgb(78.0 / 255.0, 154.0 / 255.0, 6.0 / 255.0);

/// Polyline series over one data sequence.
///
/// Holds the primary data (explicit points or an items source binding) and
/// the stroke and marker style. Its per-segment helpers
/// ([`transform_segment`](Self::transform_segment),
/// [`smooth`](Self::smooth), [`render_segment_line`](Self::render_segment_line))
/// are shared by series composed over it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    title: Option<String>,
    is_visible: bool,
    points: Vec<DataPoint>,
    items_source: Option<ItemsSource>,
    mapping: Option<FieldMapping>,
    actual_points: Vec<DataPoint>,
    data_range: DataRange,

    default_color: Color,
    color: ColorSpec,
    stroke_thickness: f64,
    line_style: LineStyle,
    dashes: Option<DashPattern>,
    line_join: LineJoin,
    marker_type: MarkerType,
    marker_size: f64,
    marker_fill: ColorSpec,
    marker_stroke: ColorSpec,
    marker_stroke_thickness: f64,
    smooth: bool,
    minimum_segment_length: f64,
    tracker_format: String,
}

impl Default for LineSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            is_visible: true,
            points: Vec::new(),
            items_source: None,
            mapping: None,
            actual_points: Vec::new(),
            data_range: DataRange::EMPTY,
            default_color: DEFAULT_SERIES_COLOR,
            color: ColorSpec::Automatic,
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            line_style: LineStyle::Solid,
            dashes: None,
            line_join: LineJoin::Miter,
            marker_type: MarkerType::None,
            marker_size: DEFAULT_MARKER_SIZE,
            marker_fill: ColorSpec::Automatic,
            marker_stroke: ColorSpec::Automatic,
            marker_stroke_thickness: 1.0,
            smooth: false,
            minimum_segment_length: DEFAULT_MINIMUM_SEGMENT_LENGTH,
            tracker_format: DEFAULT_TRACKER_FORMAT.to_owned(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = DataPoint>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    /// Binds the series to source records; takes precedence over `points`.
    #[must_use]
    pub fn with_items_source(mut self, source: ItemsSource, mapping: Option<FieldMapping>) -> Self {
        self.items_source = Some(source);
        self.mapping = mapping;
        self
    }

    /// Field binding applied to the items source. Without one, records must
    /// deserialize as data points.
    #[must_use]
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_stroke_thickness(mut self, thickness: f64) -> Self {
        self.stroke_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Explicit dash lengths, overriding the line style pattern.
    #[must_use]
    pub fn with_dashes(mut self, dashes: Option<DashPattern>) -> Self {
        self.dashes = dashes;
        self
    }

    #[must_use]
    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, marker_type: MarkerType, size: f64) -> Self {
        self.marker_type = marker_type;
        self.marker_size = size;
        self
    }

    #[must_use]
    pub fn with_marker_colors(
        mut self,
        fill: impl Into<ColorSpec>,
        stroke: impl Into<ColorSpec>,
        stroke_thickness: f64,
    ) -> Self {
        self.marker_fill = fill.into();
        self.marker_stroke = stroke.into();
        self.marker_stroke_thickness = stroke_thickness;
        self
    }

    #[must_use]
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[must_use]
    pub fn with_minimum_segment_length(mut self, length: f64) -> Self {
        self.minimum_segment_length = length;
        self
    }

    #[must_use]
    pub fn with_tracker_format(mut self, format: impl Into<String>) -> Self {
        self.tracker_format = format.into();
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, is_visible: bool) {
        self.is_visible = is_visible;
    }

    /// Palette color used while `color` is automatic. Assigned by the host.
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        self.points = points;
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Replaces the items source, keeping the current mapping.
    pub fn set_items_source(&mut self, source: Option<ItemsSource>) {
        self.items_source = source;
    }

    #[must_use]
    pub fn items_source(&self) -> Option<&ItemsSource> {
        self.items_source.as_ref()
    }

    /// Points produced by the last `update_data`.
    #[must_use]
    pub fn actual_points(&self) -> &[DataPoint] {
        &self.actual_points
    }

    #[must_use]
    pub fn data_range(&self) -> DataRange {
        self.data_range
    }

    #[must_use]
    pub fn actual_color(&self) -> Color {
        self.color.resolve(self.default_color)
    }

    #[must_use]
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    #[must_use]
    pub fn minimum_segment_length(&self) -> f64 {
        self.minimum_segment_length
    }

    #[must_use]
    pub fn stroke_thickness(&self) -> f64 {
        self.stroke_thickness
    }

    #[must_use]
    pub fn tracker_format(&self) -> &str {
        &self.tracker_format
    }

    /// Smoothed curves do not pass through the straight chords, so the
    /// tracker only snaps to vertices.
    #[must_use]
    pub fn can_tracker_interpolate(&self) -> bool {
        !self.smooth
    }

    /// Re-reads the primary sequence from the items source, if any.
    pub fn update_data(&mut self) -> PlotResult<()> {
        self.actual_points = match &self.items_source {
            Some(source) => collect_points(
                source,
                self.mapping.as_ref().map(|mapping| mapping as &dyn PointAccessor),
            )?,
            None => self.points.clone(),
        };
        debug!(
            count = self.actual_points.len(),
            bound = self.items_source.is_some(),
            "line series data updated"
        );
        Ok(())
    }

    pub fn update_min_max(&mut self) {
        let mut range = DataRange::EMPTY;
        range.include_all(&self.actual_points);
        self.data_range = range;
    }

    /// Stroke for one boundary line in `color`.
    #[must_use]
    pub fn stroke(&self, color: Color) -> LineStroke {
        LineStroke {
            color,
            thickness: self.stroke_thickness,
            dash: self.dashes.clone().or_else(|| self.line_style.dash_array()),
            line_join: self.line_join,
            aliased: false,
        }
    }

    /// Marker style resolved against the series color.
    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        let actual_color = self.actual_color();
        MarkerStyle {
            marker_type: self.marker_type,
            size: self.marker_size,
            fill: self.marker_fill.resolve(actual_color),
            stroke: self.marker_stroke.resolve(actual_color),
            stroke_thickness: self.marker_stroke_thickness,
            bin_size: 1,
        }
    }

    /// Maps one segment to screen space.
    ///
    /// With `reverse`, source index `i` lands at output index `n - 1 - i`.
    #[must_use]
    pub fn transform_segment(
        &self,
        segment: &[DataPoint],
        x_axis: &Axis,
        y_axis: &Axis,
        reverse: bool,
    ) -> Vec<ScreenPoint> {
        let mapped = segment.iter().map(|p| x_axis.transform_point(*p, y_axis));
        if reverse {
            let mut points: Vec<ScreenPoint> = mapped.collect();
            points.reverse();
            points
        } else {
            mapped.collect()
        }
    }

    /// Resamples and splines `points` when smoothing is on.
    #[must_use]
    pub fn smooth(&self, points: Vec<ScreenPoint>) -> Vec<ScreenPoint> {
        if !self.smooth {
            return points;
        }
        let resampled = resample_points(&points, self.minimum_segment_length);
        create_spline(&resampled, DEFAULT_TENSION, None, false, DEFAULT_TOLERANCE)
    }

    /// Draws one boundary polyline, clipped and thinned by the context.
    pub fn render_segment_line(
        &self,
        ctx: &mut dyn RenderContext,
        clip: ScreenRect,
        points: &[ScreenPoint],
        color: Color,
    ) -> PlotResult<()> {
        if self.line_style == LineStyle::None {
            return Ok(());
        }
        let min_dist_squared = self.minimum_segment_length * self.minimum_segment_length;
        ctx.draw_clipped_line(clip, points, min_dist_squared, &self.stroke(color))
    }

    pub fn render(
        &self,
        ctx: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> PlotResult<()> {
        if !self.is_visible || self.actual_points.is_empty() {
            return Ok(());
        }

        let clip = clipping_rect(x_axis, y_axis);
        let color = self.actual_color();
        let markers = self.marker_style();
        let segments = split_at_gaps(&self.actual_points);
        trace!(segments = segments.len(), "render line series");

        ctx.set_clip(clip)?;
        let drawn = segments.iter().try_for_each(|segment| {
            let screen = self.transform_segment(segment, x_axis, y_axis, false);
            let line = self.smooth(screen.clone());
            self.render_segment_line(ctx, clip, &line, color)?;
            ctx.draw_markers(clip, &screen, &markers)
        });
        let reset = ctx.reset_clip();
        drawn.and(reset)
    }

    /// Horizontal line through the box centre with a marker on its midpoint.
    pub fn render_legend(&self, ctx: &mut dyn RenderContext, legend_box: ScreenRect) -> PlotResult<()> {
        let mid = legend_box.center();
        let line = [
            ScreenPoint::new(legend_box.left, mid.y),
            ScreenPoint::new(legend_box.right(), mid.y),
        ];
        if self.line_style != LineStyle::None {
            ctx.draw_line(&line, &self.stroke(self.actual_color()))?;
        }
        ctx.draw_markers(legend_box, &[mid], &self.marker_style())
    }

    pub fn nearest_point(
        &self,
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult> {
        let mut hit = self.search(&self.actual_points, x_axis, y_axis, target, interpolate)?;
        self.finish_hit(&mut hit, true, x_axis, y_axis);
        Some(hit)
    }

    /// Raw nearest-point search over `points` with this series' settings.
    pub(crate) fn search(
        &self,
        points: &[DataPoint],
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult> {
        if interpolate && self.can_tracker_interpolate() {
            nearest_interpolated(points, x_axis, y_axis, target)
        } else {
            nearest_vertex(points, x_axis, y_axis, target)
        }
    }

    /// Attaches tracker text to a raw hit, plus the source record when
    /// `hit.index` points into the items source.
    pub(crate) fn finish_hit(
        &self,
        hit: &mut TrackerHitResult,
        indexes_items: bool,
        x_axis: &Axis,
        y_axis: &Axis,
    ) {
        hit.item = self
            .items_source
            .as_ref()
            .filter(|_| indexes_items)
            .and_then(|source| {
                let index = hit.index.round();
                (index >= 0.0)
                    .then(|| source.get(index as usize))
                    .flatten()
                    .cloned()
            });
        describe_hit(hit, &self.tracker_format, self.title(), x_axis, y_axis);
    }
}
