use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::{DataPoint, ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};

const DEFAULT_EMPTY_RANGE: (f64, f64) = (0.0, 100.0);

/// Edge of the plot area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisPosition {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl AxisPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }
}

/// Mapping applied before the linear screen transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisScaleKind {
    #[default]
    Linear,
    /// Natural-log mapping. Non-positive values are floored to the smallest
    /// positive `f64` so they stay finite and ordered.
    Logarithmic,
}

/// How raw coordinates are presented to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisValueKind {
    #[default]
    Numeric,
    /// Coordinates are unix seconds.
    DateTime,
}

/// Display value of an axis coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisValue {
    Number(f64),
    DateTime(DateTime<Utc>),
}

impl AxisValue {
    /// Formats with an optional pattern.
    ///
    /// Numbers accept `0`, `0.00`, `0.###` style patterns where the count of
    /// `0`/`#` after the dot sets the maximum decimals (`#` trims trailing
    /// zeros). Date-times accept `strftime` patterns.
    #[must_use]
    pub fn format(&self, pattern: Option<&str>) -> String {
        match (*self, pattern) {
            (Self::Number(value), Some(pattern)) => format_number(value, pattern),
            (Self::DateTime(time), Some(pattern)) => time.format(pattern).to_string(),
            (Self::DateTime(time), None) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
            (Self::Number(value), None) => value.to_string(),
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(None))
    }
}

fn format_number(value: f64, pattern: &str) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    let Some((_, fraction)) = pattern.split_once('.') else {
        return format!("{value:.0}");
    };
    let fixed = fraction.chars().filter(|c| *c == '0').count();
    let optional = fraction.chars().filter(|c| *c == '#').count();
    let rendered = format!("{value:.prec$}", prec = fixed + optional);
    if optional == 0 || !rendered.contains('.') {
        return rendered;
    }

    let (whole, decimals) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let mut keep = decimals.len();
    while keep > fixed && decimals.as_bytes()[keep - 1] == b'0' {
        keep -= 1;
    }
    let whole = if whole == "-0" && decimals[..keep].bytes().all(|b| b == b'0') {
        "0"
    } else {
        whole
    };
    if keep == 0 {
        whole.to_owned()
    } else {
        format!("{whole}.{}", &decimals[..keep])
    }
}

/// One plot axis: maps data coordinates to one screen direction.
///
/// Screen mapping is `(t(v) - offset) * scale` where `t` is the identity or
/// the natural log. `update_transform` derives `offset`/`scale` from the
/// actual range and the plot area; before that the axis is an identity map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    title: Option<String>,
    position: AxisPosition,
    scale_kind: AxisScaleKind,
    value_kind: AxisValueKind,
    #[serde(default)]
    minimum: Option<f64>,
    #[serde(default)]
    maximum: Option<f64>,
    #[serde(skip)]
    data_range: Option<(f64, f64)>,
    #[serde(skip)]
    view_range: Option<(f64, f64)>,
    actual_minimum: f64,
    actual_maximum: f64,
    screen_start: f64,
    screen_end: f64,
    offset: f64,
    scale: f64,
    is_pan_enabled: bool,
    is_zoom_enabled: bool,
}

impl Axis {
    /// Creates a linear numeric axis with an identity transform.
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        Self {
            title: None,
            position,
            scale_kind: AxisScaleKind::Linear,
            value_kind: AxisValueKind::Numeric,
            minimum: None,
            maximum: None,
            data_range: None,
            view_range: None,
            actual_minimum: DEFAULT_EMPTY_RANGE.0,
            actual_maximum: DEFAULT_EMPTY_RANGE.1,
            screen_start: 0.0,
            screen_end: 0.0,
            offset: 0.0,
            scale: 1.0,
            is_pan_enabled: true,
            is_zoom_enabled: true,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_scale_kind(mut self, scale_kind: AxisScaleKind) -> Self {
        self.scale_kind = scale_kind;
        self
    }

    #[must_use]
    pub fn with_value_kind(mut self, value_kind: AxisValueKind) -> Self {
        self.value_kind = value_kind;
        self
    }

    /// Pins the actual range instead of deriving it from series data.
    #[must_use]
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self.actual_minimum = minimum;
        self.actual_maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_pan_zoom(mut self, is_pan_enabled: bool, is_zoom_enabled: bool) -> Self {
        self.is_pan_enabled = is_pan_enabled;
        self.is_zoom_enabled = is_zoom_enabled;
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn scale_kind(&self) -> AxisScaleKind {
        self.scale_kind
    }

    #[must_use]
    pub fn is_pan_enabled(&self) -> bool {
        self.is_pan_enabled
    }

    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.is_zoom_enabled
    }

    #[must_use]
    pub fn actual_range(&self) -> (f64, f64) {
        (self.actual_minimum, self.actual_maximum)
    }

    /// Screen coordinates of the actual minimum and maximum, in that order.
    #[must_use]
    pub fn screen_extent(&self) -> (f64, f64) {
        (self.screen_start, self.screen_end)
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Clears the data-driven range before series fold their extents in.
    pub fn reset_data_range(&mut self) {
        self.data_range = None;
    }

    /// Folds one coordinate span of a series extent, e.g. `range.x_span()`.
    pub fn include_span(&mut self, span: Option<(f64, f64)>) {
        let Some((min, max)) = span else {
            return;
        };
        self.data_range = Some(match self.data_range {
            Some((current_min, current_max)) => (current_min.min(min), current_max.max(max)),
            None => (min, max),
        });
    }

    /// Drops any pan/zoom view so the next range update follows the data.
    pub fn reset_view(&mut self) {
        self.view_range = None;
    }

    /// Resolves the actual range: pan/zoom view, then pinned range, then data.
    pub fn update_actual_range(&mut self) {
        let (mut min, mut max) = self
            .view_range
            .or(self.data_range)
            .unwrap_or(DEFAULT_EMPTY_RANGE);
        if self.view_range.is_none() {
            min = self.minimum.unwrap_or(min);
            max = self.maximum.unwrap_or(max);
        }

        if self.scale_kind == AxisScaleKind::Logarithmic && min <= 0.0 {
            warn!(
                minimum = min,
                "logarithmic axis range starts at a non-positive value; clamping"
            );
            min = if max > 0.0 { max / 100.0 } else { 1.0 };
            max = max.max(min * 10.0);
        }
        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.01 };
            min -= pad;
            max += pad;
        }

        self.actual_minimum = min;
        self.actual_maximum = max;
    }

    /// Derives `offset`/`scale` so the actual range spans the plot area.
    ///
    /// Horizontal axes run left to right; vertical axes bottom to top.
    pub fn update_transform(&mut self, plot_area: ScreenRect) -> PlotResult<()> {
        if !plot_area.width.is_finite()
            || !plot_area.height.is_finite()
            || plot_area.width <= 0.0
            || plot_area.height <= 0.0
        {
            return Err(PlotError::InvalidData(
                "plot area must be finite with positive size".to_owned(),
            ));
        }

        let (a0, a1) = if self.position.is_horizontal() {
            (plot_area.left, plot_area.right())
        } else {
            (plot_area.bottom(), plot_area.top)
        };

        let t_min = self.pre_transform(self.actual_minimum);
        let t_max = self.pre_transform(self.actual_maximum);
        if !t_min.is_finite() || !t_max.is_finite() || t_min == t_max {
            return Err(PlotError::InvalidData(
                "axis range must be finite and non-zero".to_owned(),
            ));
        }

        self.screen_start = a0;
        self.screen_end = a1;
        self.scale = (a1 - a0) / (t_max - t_min);
        self.offset = t_min - a0 / self.scale;
        Ok(())
    }

    #[inline]
    fn pre_transform(&self, value: f64) -> f64 {
        match self.scale_kind {
            AxisScaleKind::Linear => value,
            AxisScaleKind::Logarithmic if value.is_nan() => f64::NAN,
            AxisScaleKind::Logarithmic => value.max(f64::MIN_POSITIVE).ln(),
        }
    }

    #[inline]
    fn post_inverse(&self, value: f64) -> f64 {
        match self.scale_kind {
            AxisScaleKind::Linear => value,
            AxisScaleKind::Logarithmic => value.exp(),
        }
    }

    /// Maps one data coordinate to a screen coordinate along this axis.
    #[inline]
    #[must_use]
    pub fn transform_value(&self, value: f64) -> f64 {
        (self.pre_transform(value) - self.offset) * self.scale
    }

    /// Maps one screen coordinate back to data space.
    #[inline]
    #[must_use]
    pub fn inverse_transform(&self, screen: f64) -> f64 {
        self.post_inverse(screen / self.scale + self.offset)
    }

    /// Maps a data pair to screen space using `other` for the second coordinate.
    #[inline]
    #[must_use]
    pub fn transform(&self, x: f64, y: f64, other: &Axis) -> ScreenPoint {
        if self.position.is_horizontal() {
            ScreenPoint::new(self.transform_value(x), other.transform_value(y))
        } else {
            ScreenPoint::new(other.transform_value(y), self.transform_value(x))
        }
    }

    #[must_use]
    pub fn transform_point(&self, point: DataPoint, other: &Axis) -> ScreenPoint {
        self.transform(point.x, point.y, other)
    }

    #[must_use]
    pub fn inverse_transform_point(&self, point: ScreenPoint, other: &Axis) -> DataPoint {
        if self.position.is_horizontal() {
            DataPoint::new(self.inverse_transform(point.x), other.inverse_transform(point.y))
        } else {
            DataPoint::new(self.inverse_transform(point.y), other.inverse_transform(point.x))
        }
    }

    /// Presentation value of a raw coordinate.
    #[must_use]
    pub fn value_of(&self, coordinate: f64) -> AxisValue {
        match self.value_kind {
            AxisValueKind::Numeric => AxisValue::Number(coordinate),
            AxisValueKind::DateTime => unix_seconds_to_datetime(coordinate)
                .map_or(AxisValue::Number(coordinate), AxisValue::DateTime),
        }
    }

    /// Shifts the view by `delta_px` screen pixels along the axis direction.
    ///
    /// Returns `false` when panning is disabled or the transform is degenerate.
    pub fn pan(&mut self, delta_px: f64) -> bool {
        if !self.is_pan_enabled || !delta_px.is_finite() || self.scale == 0.0 {
            return false;
        }
        self.offset -= delta_px / self.scale;
        self.sync_view_from_screen();
        true
    }

    /// Scales the view by `factor` keeping `screen_coordinate` fixed.
    ///
    /// A factor above one zooms in.
    pub fn zoom_at(&mut self, factor: f64, screen_coordinate: f64) -> bool {
        if !self.is_zoom_enabled
            || !factor.is_finite()
            || factor <= 0.0
            || !screen_coordinate.is_finite()
            || self.scale == 0.0
        {
            return false;
        }
        let anchor = screen_coordinate / self.scale + self.offset;
        self.scale *= factor;
        self.offset = anchor - screen_coordinate / self.scale;
        self.sync_view_from_screen();
        true
    }

    fn sync_view_from_screen(&mut self) {
        let min = self.inverse_transform(self.screen_start);
        let max = self.inverse_transform(self.screen_end);
        self.actual_minimum = min;
        self.actual_maximum = max;
        self.view_range = Some((min, max));
    }
}

/// Clipping rectangle spanned by an axis pair.
#[must_use]
pub fn clipping_rect(x_axis: &Axis, y_axis: &Axis) -> ScreenRect {
    let (x0, x1) = x_axis.screen_extent();
    let (y0, y1) = y_axis.screen_extent();
    if x_axis.position().is_horizontal() {
        ScreenRect::from_ltrb(x0, y0, x1, y1)
    } else {
        ScreenRect::from_ltrb(y0, x0, y1, x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_patterns_trim_optional_decimals() {
        assert_eq!(format_number(1.5, "0.###"), "1.5");
        assert_eq!(format_number(2.0, "0.###"), "2");
        assert_eq!(format_number(2.0, "0.00"), "2.00");
        assert_eq!(format_number(1.23456, "0.##"), "1.23");
        assert_eq!(format_number(-0.0001, "0.##"), "0");
        assert_eq!(format_number(7.6, "0"), "8");
    }
}
