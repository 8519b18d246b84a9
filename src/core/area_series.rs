use tracing::{debug, trace};

use crate::core::axis::clipping_rect;
use crate::core::data_source::{FieldMapping, PointAccessor, collect_points};
use crate::core::hit_test::{Boundary, TrackerHitResult, pick_nearest_boundary};
use crate::core::segment::split_at_gaps;
use crate::core::{Axis, DataPoint, DataRange, LineSeries, ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::{Color, ColorSpec, RenderContext};

/// Alpha applied to the series color when the fill is automatic.
const AUTOMATIC_FILL_ALPHA: u8 = 100;

/// Where the secondary boundary was read from on the last data update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondarySource {
    Points,
    Mapped,
    Constant,
}

/// Area between two boundary lines.
///
/// The primary boundary and all shared style live in the inner
/// [`LineSeries`]. The secondary boundary is explicit points, a field
/// mapping over the same items source, or a horizontal line at
/// `constant_y2` spanning the first and last primary x.
///
/// The fill polygon for segment `i` is secondary segment `i` followed by
/// primary segment `i`. With `reverse2` set (the default) the secondary
/// segment is walked backwards so the outline closes without crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSeries {
    line: LineSeries,
    points2: Vec<DataPoint>,
    mapping2: Option<FieldMapping>,
    constant_y2: f64,
    reverse2: bool,
    color2: ColorSpec,
    fill: ColorSpec,
    actual_points2: Vec<DataPoint>,
    secondary_source: SecondarySource,
    data_range: DataRange,
}

impl Default for AreaSeries {
    fn default() -> Self {
        Self::new(LineSeries::new())
    }
}

impl AreaSeries {
    #[must_use]
    pub fn new(line: LineSeries) -> Self {
        Self {
            line,
            points2: Vec::new(),
            mapping2: None,
            constant_y2: 0.0,
            reverse2: true,
            color2: ColorSpec::Automatic,
            fill: ColorSpec::Automatic,
            actual_points2: Vec::new(),
            secondary_source: SecondarySource::Constant,
            data_range: DataRange::EMPTY,
        }
    }

    #[must_use]
    pub fn with_points2(mut self, points: impl IntoIterator<Item = DataPoint>) -> Self {
        self.points2 = points.into_iter().collect();
        self
    }

    /// Field binding of the secondary boundary over the primary items source.
    #[must_use]
    pub fn with_mapping2(mut self, mapping: FieldMapping) -> Self {
        self.mapping2 = Some(mapping);
        self
    }

    #[must_use]
    pub fn with_constant_y2(mut self, constant_y2: f64) -> Self {
        self.constant_y2 = constant_y2;
        self
    }

    #[must_use]
    pub fn with_reverse2(mut self, reverse2: bool) -> Self {
        self.reverse2 = reverse2;
        self
    }

    #[must_use]
    pub fn with_color2(mut self, color2: impl Into<ColorSpec>) -> Self {
        self.color2 = color2.into();
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<ColorSpec>) -> Self {
        self.fill = fill.into();
        self
    }

    #[must_use]
    pub fn line(&self) -> &LineSeries {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut LineSeries {
        &mut self.line
    }

    pub fn set_points2(&mut self, points: Vec<DataPoint>) {
        self.points2 = points;
    }

    #[must_use]
    pub fn points2(&self) -> &[DataPoint] {
        &self.points2
    }

    #[must_use]
    pub fn constant_y2(&self) -> f64 {
        self.constant_y2
    }

    #[must_use]
    pub fn reverse2(&self) -> bool {
        self.reverse2
    }

    #[must_use]
    pub fn actual_points(&self) -> &[DataPoint] {
        self.line.actual_points()
    }

    #[must_use]
    pub fn actual_points2(&self) -> &[DataPoint] {
        &self.actual_points2
    }

    #[must_use]
    pub fn secondary_source(&self) -> SecondarySource {
        self.secondary_source
    }

    #[must_use]
    pub fn data_range(&self) -> DataRange {
        self.data_range
    }

    #[must_use]
    pub fn actual_color(&self) -> Color {
        self.line.actual_color()
    }

    #[must_use]
    pub fn actual_color2(&self) -> Color {
        self.color2.resolve(self.actual_color())
    }

    #[must_use]
    pub fn actual_fill(&self) -> Color {
        self.fill
            .resolve(self.actual_color().with_alpha8(AUTOMATIC_FILL_ALPHA))
    }

    /// Rebuilds both boundaries.
    ///
    /// The secondary boundary is read, in order of preference, from the
    /// explicit `points2`, from `mapping2` over the items source, or from
    /// the constant line.
    pub fn update_data(&mut self) -> PlotResult<()> {
        self.line.update_data()?;

        let mapped_source = self.line.items_source().zip(self.mapping2.as_ref());
        (self.actual_points2, self.secondary_source) = if !self.points2.is_empty() {
            (self.points2.clone(), SecondarySource::Points)
        } else if let Some((source, mapping)) = mapped_source {
            let points = collect_points(source, Some(mapping as &dyn PointAccessor))?;
            (points, SecondarySource::Mapped)
        } else {
            (self.constant_points2(), SecondarySource::Constant)
        };

        debug!(
            primary = self.line.actual_points().len(),
            secondary = self.actual_points2.len(),
            source = ?self.secondary_source,
            "area series data updated"
        );
        Ok(())
    }

    fn constant_points2(&self) -> Vec<DataPoint> {
        let primary = self.line.actual_points();
        match (primary.first(), primary.last()) {
            (Some(first), Some(last)) if !self.constant_y2.is_nan() => vec![
                DataPoint::new(first.x, self.constant_y2),
                DataPoint::new(last.x, self.constant_y2),
            ],
            _ => Vec::new(),
        }
    }

    pub fn update_min_max(&mut self) {
        self.line.update_min_max();
        let mut range = self.line.data_range();
        range.include_all(&self.actual_points2);
        self.data_range = range;
    }

    pub fn render(
        &self,
        ctx: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> PlotResult<()> {
        let line = &self.line;
        if !line.is_visible() || line.actual_points().is_empty() {
            return Ok(());
        }

        let clip = clipping_rect(x_axis, y_axis);
        let segments = split_at_gaps(line.actual_points());
        let segments2 = split_at_gaps(&self.actual_points2);
        trace!(
            segments = segments.len(),
            segments2 = segments2.len(),
            "render area series"
        );

        ctx.set_clip(clip)?;
        let drawn = self.render_clipped(ctx, clip, &segments, &segments2, x_axis, y_axis);
        let reset = ctx.reset_clip();
        drawn.and(reset)
    }

    /// Outlines, fills and markers; the caller owns the clip.
    fn render_clipped(
        &self,
        ctx: &mut dyn RenderContext,
        clip: ScreenRect,
        segments: &[Vec<DataPoint>],
        segments2: &[Vec<DataPoint>],
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> PlotResult<()> {
        let line = &self.line;
        let min_length = line.minimum_segment_length();
        let min_dist_squared = min_length * min_length;

        let boundaries: Vec<Vec<ScreenPoint>> = segments
            .iter()
            .map(|segment| line.smooth(line.transform_segment(segment, x_axis, y_axis, false)))
            .collect();
        for points in &boundaries {
            line.render_segment_line(ctx, clip, points, self.actual_color())?;
        }

        let boundaries2: Vec<Vec<ScreenPoint>> = segments2
            .iter()
            .map(|segment| {
                line.smooth(line.transform_segment(segment, x_axis, y_axis, self.reverse2))
            })
            .collect();
        for points in &boundaries2 {
            line.render_segment_line(ctx, clip, points, self.actual_color2())?;
        }

        if segments.len() != segments2.len() {
            return Ok(());
        }

        let fill = self.actual_fill();
        let markers = line.marker_style();
        for (points, points2) in boundaries.iter().zip(&boundaries2) {
            let mut polygon = Vec::with_capacity(points.len() + points2.len());
            polygon.extend_from_slice(points2);
            polygon.extend_from_slice(points);
            ctx.draw_clipped_polygon(clip, &polygon, min_dist_squared, fill, None)?;

            ctx.draw_markers(clip, points, &markers)?;
            ctx.draw_markers(clip, points2, &markers)?;
        }
        Ok(())
    }

    /// Two slanted boundary strokes and the band between them.
    pub fn render_legend(&self, ctx: &mut dyn RenderContext, legend_box: ScreenRect) -> PlotResult<()> {
        let top = legend_box.top;
        let bottom = legend_box.bottom();
        let y0 = top * 0.2 + bottom * 0.8;
        let y1 = top * 0.4 + bottom * 0.6;
        let y2 = top * 0.8 + bottom * 0.2;

        let upper = [
            ScreenPoint::new(legend_box.left, y0),
            ScreenPoint::new(legend_box.right(), y0),
        ];
        let lower = [
            ScreenPoint::new(legend_box.right(), y2),
            ScreenPoint::new(legend_box.left, y1),
        ];
        let band: Vec<ScreenPoint> = upper.iter().chain(&lower).copied().collect();

        ctx.draw_line(&upper, &self.line.stroke(self.actual_color()))?;
        ctx.draw_line(&lower, &self.line.stroke(self.actual_color2()))?;
        ctx.draw_polygon(&band, self.actual_fill(), None)
    }

    /// Nearest hit over both boundaries; the primary wins ties.
    pub fn nearest_point(
        &self,
        x_axis: &Axis,
        y_axis: &Axis,
        target: ScreenPoint,
        interpolate: bool,
    ) -> Option<TrackerHitResult> {
        let primary = self
            .line
            .search(self.line.actual_points(), x_axis, y_axis, target, interpolate);
        let secondary = self
            .line
            .search(&self.actual_points2, x_axis, y_axis, target, interpolate);
        let (mut hit, boundary) = pick_nearest_boundary(primary, secondary, target)?;
        let indexes_items = match boundary {
            Boundary::Primary => true,
            Boundary::Secondary => self.secondary_source == SecondarySource::Mapped,
        };
        self.line.finish_hit(&mut hit, indexes_items, x_axis, y_axis);
        Some(hit)
    }
}
