use std::f64::consts::TAU;

use cairo::{Antialias, Context, Format, ImageSurface};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::render::clipping::marker_positions;
use crate::render::{
    Color, LineJoin, LineStroke, MarkerShape, MarkerStyle, RenderContext, marker_shape,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polygons_drawn: usize,
    pub markers_drawn: usize,
}

/// Cairo implementation of [`RenderContext`].
///
/// Works on any Cairo context: an offscreen image surface created through
/// [`CairoRenderContext::new_image`] or a context handed over by a host
/// widget's draw callback. Clipping uses the shared helpers so the visible
/// geometry matches every other backend.
#[derive(Debug)]
pub struct CairoRenderContext {
    context: Context,
    surface: Option<ImageSurface>,
    stats: CairoRenderStats,
}

impl CairoRenderContext {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self {
            context,
            surface: None,
            stats: CairoRenderStats::default(),
        }
    }

    /// Creates an ARGB32 image surface cleared to `background`.
    pub fn new_image(width: i32, height: i32, background: Color) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }
        background.validate()?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        apply_color(&context, background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        Ok(Self {
            context,
            surface: Some(surface),
            stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    fn apply_stroke(&self, stroke: &LineStroke) {
        apply_color(&self.context, stroke.color);
        self.context.set_line_width(stroke.thickness);
        self.context.set_line_join(match stroke.line_join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        });
        match stroke.dash_in_pixels() {
            Some(dash) => self.context.set_dash(&dash, 0.0),
            None => self.context.set_dash(&[], 0.0),
        }
        self.context.set_antialias(if stroke.aliased {
            Antialias::None
        } else {
            Antialias::Default
        });
    }

    fn trace_path(&self, points: &[ScreenPoint], close: bool) {
        self.context.new_path();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                self.context.move_to(point.x, point.y);
            } else {
                self.context.line_to(point.x, point.y);
            }
        }
        if close {
            self.context.close_path();
        }
    }

    fn draw_marker(&self, shape: &MarkerShape, style: &MarkerStyle) -> PlotResult<()> {
        self.context.new_path();
        let fillable = match shape {
            MarkerShape::Ellipse { center, radius } => {
                self.context.new_sub_path();
                self.context.arc(center.x, center.y, *radius, 0.0, TAU);
                true
            }
            MarkerShape::Polygon(points) => {
                self.trace_path(points, true);
                true
            }
            MarkerShape::Strokes(pairs) => {
                for (start, end) in pairs {
                    self.context.move_to(start.x, start.y);
                    self.context.line_to(end.x, end.y);
                }
                false
            }
        };

        if fillable && !style.fill.is_invisible() {
            apply_color(&self.context, style.fill);
            self.context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
        }
        if style.stroke_thickness > 0.0 && !style.stroke.is_invisible() {
            apply_color(&self.context, style.stroke);
            self.context.set_line_width(style.stroke_thickness);
            self.context.set_dash(&[], 0.0);
            self.context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke marker", err))?;
        } else {
            self.context.new_path();
        }
        Ok(())
    }
}

impl RenderContext for CairoRenderContext {
    fn set_clip(&mut self, rect: ScreenRect) -> PlotResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.new_path();
        self.context
            .rectangle(rect.left, rect.top, rect.width, rect.height);
        self.context.clip();
        Ok(())
    }

    fn reset_clip(&mut self) -> PlotResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }

    fn draw_line(&mut self, points: &[ScreenPoint], stroke: &LineStroke) -> PlotResult<()> {
        if points.len() < 2 || stroke.thickness <= 0.0 {
            return Ok(());
        }
        stroke.validate()?;
        self.apply_stroke(stroke);
        self.trace_path(points, false);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Option<&LineStroke>,
    ) -> PlotResult<()> {
        if points.len() < 3 {
            return Ok(());
        }
        fill.validate()?;
        self.trace_path(points, true);
        apply_color(&self.context, fill);
        match stroke {
            Some(stroke) if stroke.thickness > 0.0 => {
                stroke.validate()?;
                self.context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill polygon", err))?;
                self.apply_stroke(stroke);
                self.context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke polygon", err))?;
            }
            _ => {
                self.context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill polygon", err))?;
            }
        }
        self.stats.polygons_drawn += 1;
        Ok(())
    }

    fn draw_markers(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        style: &MarkerStyle,
    ) -> PlotResult<()> {
        if style.is_empty() {
            return Ok(());
        }
        style.validate()?;
        for center in marker_positions(clip, points, style.bin_size) {
            if let Some(shape) = marker_shape(style.marker_type, center, style.size) {
                self.draw_marker(&shape, style)?;
                self.stats.markers_drawn += 1;
            }
        }
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::Backend(format!("{prefix}: {err}"))
}
