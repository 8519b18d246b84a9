use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, LineStroke, MarkerStyle};

/// One call received by a rendering surface, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetClip(ScreenRect),
    ResetClip,
    Line {
        points: Vec<ScreenPoint>,
        stroke: LineStroke,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Color,
        stroke: Option<LineStroke>,
    },
    Markers {
        clip: ScreenRect,
        points: Vec<ScreenPoint>,
        style: MarkerStyle,
    },
    ClippedLine {
        clip: ScreenRect,
        points: Vec<ScreenPoint>,
        min_dist_squared: f64,
        stroke: LineStroke,
    },
    ClippedPolygon {
        clip: ScreenRect,
        points: Vec<ScreenPoint>,
        min_dist_squared: f64,
        fill: Color,
        stroke: Option<LineStroke>,
    },
}

/// Backend-agnostic record of one draw pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Point lists of every clipped polyline, in call order.
    pub fn clipped_lines(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::ClippedLine { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// Point lists of every clipped polygon, in call order.
    pub fn clipped_polygons(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::ClippedPolygon { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Polygon { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn marker_batches(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Markers { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// Checks styles and that clip calls are balanced.
    pub fn validate(&self) -> PlotResult<()> {
        let mut clip_depth = 0_usize;
        for command in &self.commands {
            match command {
                DrawCommand::SetClip(rect) => {
                    if !rect.width.is_finite() || !rect.height.is_finite() {
                        return Err(PlotError::InvalidData(
                            "clip rectangle must be finite".to_owned(),
                        ));
                    }
                    clip_depth += 1;
                }
                DrawCommand::ResetClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        PlotError::InvalidData("reset_clip without set_clip".to_owned())
                    })?;
                }
                DrawCommand::Line { stroke, .. } | DrawCommand::ClippedLine { stroke, .. } => {
                    stroke.validate()?;
                }
                DrawCommand::Polygon { fill, stroke, .. }
                | DrawCommand::ClippedPolygon { fill, stroke, .. } => {
                    fill.validate()?;
                    if let Some(stroke) = stroke {
                        stroke.validate()?;
                    }
                }
                DrawCommand::Markers { style, .. } => style.validate()?,
            }
        }
        if clip_depth != 0 {
            return Err(PlotError::InvalidData(
                "set_clip without matching reset_clip".to_owned(),
            ));
        }
        Ok(())
    }
}
