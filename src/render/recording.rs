use crate::core::{ScreenPoint, ScreenRect};
use crate::error::PlotResult;
use crate::render::clipping::{fill_clipped_polygon, stroke_clipped_line};
use crate::render::{Color, DrawCommand, LineStroke, MarkerStyle, RenderContext, RenderFrame};

/// Headless surface that records every call into a [`RenderFrame`].
///
/// By default clipped calls are stored as issued so tests can inspect the
/// exact geometry a series asked for. With `resolve_clipping` they are
/// clipped and thinned first and land as plain lines and polygons, the way
/// a pixel backend would see them.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub frame: RenderFrame,
    resolve_clipping: bool,
}

impl RecordingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolving_clipping() -> Self {
        Self {
            frame: RenderFrame::new(),
            resolve_clipping: true,
        }
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }
}

impl RenderContext for RecordingContext {
    fn set_clip(&mut self, rect: ScreenRect) -> PlotResult<()> {
        self.frame.push(DrawCommand::SetClip(rect));
        Ok(())
    }

    fn reset_clip(&mut self) -> PlotResult<()> {
        self.frame.push(DrawCommand::ResetClip);
        Ok(())
    }

    fn draw_line(&mut self, points: &[ScreenPoint], stroke: &LineStroke) -> PlotResult<()> {
        self.frame.push(DrawCommand::Line {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Option<&LineStroke>,
    ) -> PlotResult<()> {
        self.frame.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke: stroke.cloned(),
        });
        Ok(())
    }

    fn draw_markers(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        style: &MarkerStyle,
    ) -> PlotResult<()> {
        if style.is_empty() || points.is_empty() {
            return Ok(());
        }
        self.frame.push(DrawCommand::Markers {
            clip,
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn draw_clipped_line(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        min_dist_squared: f64,
        stroke: &LineStroke,
    ) -> PlotResult<()> {
        if self.resolve_clipping {
            return stroke_clipped_line(self, clip, points, min_dist_squared, stroke);
        }
        self.frame.push(DrawCommand::ClippedLine {
            clip,
            points: points.to_vec(),
            min_dist_squared,
            stroke: stroke.clone(),
        });
        Ok(())
    }

    fn draw_clipped_polygon(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        min_dist_squared: f64,
        fill: Color,
        stroke: Option<&LineStroke>,
    ) -> PlotResult<()> {
        if self.resolve_clipping {
            return fill_clipped_polygon(self, clip, points, min_dist_squared, fill, stroke);
        }
        self.frame.push(DrawCommand::ClippedPolygon {
            clip,
            points: points.to_vec(),
            min_dist_squared,
            fill,
            stroke: stroke.cloned(),
        });
        Ok(())
    }
}
