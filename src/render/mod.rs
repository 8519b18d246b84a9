pub mod clipping;
mod frame;
pub mod markers;
mod primitives;
mod recording;

pub use frame::{DrawCommand, RenderFrame};
pub use markers::{MarkerShape, marker_shape};
pub use primitives::{
    Color, ColorSpec, DashPattern, LineJoin, LineStroke, LineStyle, MarkerStyle, MarkerType,
};
pub use recording::RecordingContext;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::PlotResult;

/// Drawing surface consumed by series.
///
/// Series issue primitive calls in screen space; backends own the canvas.
/// The clipped variants default to clipping and thinning through
/// [`clipping`] before forwarding to `draw_line` / `draw_polygon`. Backends
/// with native clipping may override them.
pub trait RenderContext {
    fn set_clip(&mut self, rect: ScreenRect) -> PlotResult<()>;

    fn reset_clip(&mut self) -> PlotResult<()>;

    fn draw_line(&mut self, points: &[ScreenPoint], stroke: &LineStroke) -> PlotResult<()>;

    /// Fills a closed polygon; `stroke` of `None` means no outline.
    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Option<&LineStroke>,
    ) -> PlotResult<()>;

    fn draw_markers(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        style: &MarkerStyle,
    ) -> PlotResult<()>;

    fn draw_clipped_line(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        min_dist_squared: f64,
        stroke: &LineStroke,
    ) -> PlotResult<()> {
        clipping::stroke_clipped_line(self, clip, points, min_dist_squared, stroke)
    }

    fn draw_clipped_polygon(
        &mut self,
        clip: ScreenRect,
        points: &[ScreenPoint],
        min_dist_squared: f64,
        fill: Color,
        stroke: Option<&LineStroke>,
    ) -> PlotResult<()> {
        clipping::fill_clipped_polygon(self, clip, points, min_dist_squared, fill, stroke)
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderContext, CairoRenderStats};
