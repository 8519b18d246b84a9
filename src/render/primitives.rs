use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_argb8(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    /// Same color with an 8-bit alpha channel.
    #[must_use]
    pub fn with_alpha8(self, alpha: u8) -> Self {
        Self {
            alpha: f64::from(alpha) / 255.0,
            ..self
        }
    }

    #[must_use]
    pub fn is_invisible(self) -> bool {
        self.alpha <= 0.0
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// A configured color or "inherit from the parent style".
///
/// Series resolve every `Automatic` slot once per render pass through
/// [`ColorSpec::resolve`], never by implicit null-coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpec {
    #[default]
    Automatic,
    Fixed(Color),
}

impl ColorSpec {
    #[must_use]
    pub fn resolve(self, fallback: Color) -> Color {
        match self {
            Self::Automatic => fallback,
            Self::Fixed(color) => color,
        }
    }

    #[must_use]
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Fixed(color)
    }
}

/// Join style between stroked polyline segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Named dash patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDashDot,
    LongDash,
    /// Nothing is stroked.
    None,
}

/// Dash lengths in units of stroke thickness.
pub type DashPattern = SmallVec<[f64; 6]>;

impl LineStyle {
    /// Dash lengths relative to the stroke thickness; `None` for solid lines.
    #[must_use]
    pub fn dash_array(self) -> Option<DashPattern> {
        let pattern: &[f64] = match self {
            Self::Solid | Self::None => return None,
            Self::Dash => &[4.0, 1.0],
            Self::Dot => &[1.0, 1.0],
            Self::DashDot => &[4.0, 1.0, 1.0, 1.0],
            Self::DashDashDot => &[4.0, 1.0, 4.0, 1.0, 1.0, 1.0],
            Self::LongDash => &[10.0, 1.0],
        };
        Some(SmallVec::from_slice(pattern))
    }
}

/// Stroke parameters for polylines and polygon outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStroke {
    pub color: Color,
    pub thickness: f64,
    /// Dash lengths in units of `thickness`.
    pub dash: Option<DashPattern>,
    pub line_join: LineJoin,
    /// Disables anti-aliasing when set.
    pub aliased: bool,
}

impl LineStroke {
    #[must_use]
    pub fn solid(color: Color, thickness: f64) -> Self {
        Self {
            color,
            thickness,
            dash: None,
            line_join: LineJoin::Miter,
            aliased: false,
        }
    }

    /// Dash lengths scaled to device pixels.
    #[must_use]
    pub fn dash_in_pixels(&self) -> Option<DashPattern> {
        self.dash
            .as_ref()
            .map(|dash| dash.iter().map(|len| len * self.thickness).collect())
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(PlotError::InvalidData(
                "stroke thickness must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(dash) = &self.dash {
            if dash.iter().any(|len| !len.is_finite() || *len < 0.0) {
                return Err(PlotError::InvalidData(
                    "dash lengths must be finite and >= 0".to_owned(),
                ));
            }
        }
        self.color.validate()
    }
}

/// Marker glyph drawn at data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    #[default]
    None,
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
    Plus,
    Star,
}

/// Resolved marker appearance for one `draw_markers` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub marker_type: MarkerType,
    /// Half-extent of the glyph in pixels.
    pub size: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_thickness: f64,
    /// Markers whose centres share a `bin_size` pixel cell are drawn once.
    pub bin_size: usize,
}

impl MarkerStyle {
    /// `true` when drawing would produce nothing visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marker_type == MarkerType::None || self.size <= 0.0
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(PlotError::InvalidData(
                "marker size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.stroke_thickness.is_finite() || self.stroke_thickness < 0.0 {
            return Err(PlotError::InvalidData(
                "marker stroke thickness must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.stroke.validate()
    }
}
