use std::ops::{Add, Mul, Sub};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::PlotResult;

/// Point in data space.
///
/// A NaN coordinate is a valid value: it marks "no data at this index" and
/// splits the owning sequence into separately drawn segments. JSON has no
/// NaN, so gaps serialize as `null` and `null` reads back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(deserialize_with = "nan_from_null")]
    pub x: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub y: f64,
}

/// Reads a number, mapping `null` to NaN.
pub(crate) fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl DataPoint {
    pub const UNDEFINED: Self = Self {
        x: f64::NAN,
        y: f64::NAN,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> PlotResult<Self> {
        Ok(Self {
            x: datetime_to_unix_seconds(time),
            y: decimal_to_f64(value, "value")?,
        })
    }

    /// Returns `true` when both coordinates are non-NaN.
    #[must_use]
    pub fn is_defined(self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Point in device/pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.distance_to_squared(other).sqrt()
    }

    #[must_use]
    pub fn distance_to_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for ScreenPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScreenPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for ScreenPoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a rectangle from two corner coordinates in any order.
    #[must_use]
    pub fn from_ltrb(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let left = x0.min(x1);
        let top = y0.min(y1);
        Self::new(left, top, (x1 - x0).abs(), (y1 - y0).abs())
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Running min/max accumulator over data coordinates.
///
/// Non-finite coordinates are ignored per axis, so a point with a NaN `y`
/// still extends the x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for DataRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl DataRange {
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x && self.min_y > self.max_y
    }

    pub fn include(&mut self, point: DataPoint) {
        if point.x.is_finite() {
            self.min_x = self.min_x.min(point.x);
            self.max_x = self.max_x.max(point.x);
        }
        if point.y.is_finite() {
            self.min_y = self.min_y.min(point.y);
            self.max_y = self.max_y.max(point.y);
        }
    }

    pub fn include_all<'a>(&mut self, points: impl IntoIterator<Item = &'a DataPoint>) {
        for point in points {
            self.include(*point);
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    #[must_use]
    pub fn x_span(&self) -> Option<(f64, f64)> {
        (self.min_x <= self.max_x).then_some((self.min_x, self.max_x))
    }

    #[must_use]
    pub fn y_span(&self) -> Option<(f64, f64)> {
        (self.min_y <= self.max_y).then_some((self.min_y, self.max_y))
    }
}
