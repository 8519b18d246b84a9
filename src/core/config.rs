use serde::{Deserialize, Serialize};

use crate::core::data_source::FieldMapping;
use crate::core::hit_test::DEFAULT_TRACKER_FORMAT;
use crate::core::line_series::{
    DEFAULT_MARKER_SIZE, DEFAULT_MINIMUM_SEGMENT_LENGTH, DEFAULT_STROKE_THICKNESS,
};
use crate::core::types::nan_from_null;
use crate::core::{AreaSeries, DataPoint, LineSeries};
use crate::error::{PlotError, PlotResult};
use crate::render::{ColorSpec, LineJoin, LineStyle, MarkerType};

pub const SERIES_CONFIG_JSON_SCHEMA_V1: u32 = 1;

fn default_stroke_thickness() -> f64 {
    DEFAULT_STROKE_THICKNESS
}

fn default_marker_size() -> f64 {
    DEFAULT_MARKER_SIZE
}

fn default_marker_stroke_thickness() -> f64 {
    1.0
}

fn default_minimum_segment_length() -> f64 {
    DEFAULT_MINIMUM_SEGMENT_LENGTH
}

fn default_tracker_format() -> String {
    DEFAULT_TRACKER_FORMAT.to_owned()
}

fn default_true() -> bool {
    true
}

/// Declarative line series settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeriesConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub color: ColorSpec,
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f64,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub line_join: LineJoin,
    #[serde(default)]
    pub marker_type: MarkerType,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default)]
    pub marker_fill: ColorSpec,
    #[serde(default)]
    pub marker_stroke: ColorSpec,
    #[serde(default = "default_marker_stroke_thickness")]
    pub marker_stroke_thickness: f64,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default = "default_minimum_segment_length")]
    pub minimum_segment_length: f64,
    #[serde(default = "default_tracker_format")]
    pub tracker_format: String,
    /// Binding used when the series is given an items source.
    #[serde(default)]
    pub mapping: Option<FieldMapping>,
    #[serde(default)]
    pub points: Vec<DataPoint>,
}

impl Default for LineSeriesConfig {
    fn default() -> Self {
        Self {
            title: None,
            is_visible: true,
            color: ColorSpec::Automatic,
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            line_style: LineStyle::Solid,
            line_join: LineJoin::Miter,
            marker_type: MarkerType::None,
            marker_size: DEFAULT_MARKER_SIZE,
            marker_fill: ColorSpec::Automatic,
            marker_stroke: ColorSpec::Automatic,
            marker_stroke_thickness: 1.0,
            smooth: false,
            minimum_segment_length: DEFAULT_MINIMUM_SEGMENT_LENGTH,
            tracker_format: DEFAULT_TRACKER_FORMAT.to_owned(),
            mapping: None,
            points: Vec::new(),
        }
    }
}

impl LineSeriesConfig {
    pub fn validate(&self) -> PlotResult<()> {
        for (name, value) in [
            ("stroke_thickness", self.stroke_thickness),
            ("marker_size", self.marker_size),
            ("marker_stroke_thickness", self.marker_stroke_thickness),
            ("minimum_segment_length", self.minimum_segment_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, color) in [
            ("color", self.color),
            ("marker_fill", self.marker_fill),
            ("marker_stroke", self.marker_stroke),
        ] {
            validate_color(name, color)?;
        }
        Ok(())
    }

    /// Builds the series. Items sources are attached by the caller through
    /// [`LineSeries::set_items_source`].
    pub fn build(&self) -> PlotResult<LineSeries> {
        self.validate()?;
        let mut series = LineSeries::new()
            .with_points(self.points.iter().copied())
            .with_color(self.color)
            .with_stroke_thickness(self.stroke_thickness)
            .with_line_style(self.line_style)
            .with_line_join(self.line_join)
            .with_markers(self.marker_type, self.marker_size)
            .with_marker_colors(
                self.marker_fill,
                self.marker_stroke,
                self.marker_stroke_thickness,
            )
            .with_smooth(self.smooth)
            .with_minimum_segment_length(self.minimum_segment_length)
            .with_tracker_format(self.tracker_format.clone());
        if let Some(title) = &self.title {
            series = series.with_title(title.clone());
        }
        if let Some(mapping) = &self.mapping {
            series = series.with_mapping(mapping.clone());
        }
        series.set_visible(self.is_visible);
        Ok(series)
    }
}

/// Declarative area series settings: the shared line settings plus the
/// secondary boundary and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeriesConfig {
    #[serde(flatten)]
    pub line: LineSeriesConfig,
    #[serde(default)]
    pub color2: ColorSpec,
    #[serde(default)]
    pub fill: ColorSpec,
    #[serde(default = "default_true")]
    pub reverse2: bool,
    /// `null` (or NaN) disables the constant boundary.
    #[serde(default, deserialize_with = "nan_from_null")]
    pub constant_y2: f64,
    #[serde(default)]
    pub mapping2: Option<FieldMapping>,
    #[serde(default)]
    pub points2: Vec<DataPoint>,
}

impl Default for AreaSeriesConfig {
    fn default() -> Self {
        Self {
            line: LineSeriesConfig::default(),
            color2: ColorSpec::Automatic,
            fill: ColorSpec::Automatic,
            reverse2: true,
            constant_y2: 0.0,
            mapping2: None,
            points2: Vec::new(),
        }
    }
}

impl AreaSeriesConfig {
    pub fn validate(&self) -> PlotResult<()> {
        self.line.validate()?;
        validate_color("color2", self.color2)?;
        validate_color("fill", self.fill)?;
        if self.constant_y2.is_infinite() {
            return Err(PlotError::InvalidConfig(
                "`constant_y2` must be finite or NaN".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn build(&self) -> PlotResult<AreaSeries> {
        self.validate()?;
        let mut series = AreaSeries::new(self.line.build()?)
            .with_color2(self.color2)
            .with_fill(self.fill)
            .with_reverse2(self.reverse2)
            .with_constant_y2(self.constant_y2)
            .with_points2(self.points2.iter().copied());
        if let Some(mapping) = &self.mapping2 {
            series = series.with_mapping2(mapping.clone());
        }
        Ok(series)
    }
}

fn validate_color(name: &str, color: ColorSpec) -> PlotResult<()> {
    match color {
        ColorSpec::Automatic => Ok(()),
        ColorSpec::Fixed(color) => color
            .validate()
            .map_err(|err| PlotError::InvalidConfig(format!("`{name}`: {err}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeriesConfigJsonContractV1 {
    pub schema_version: u32,
    pub series: AreaSeriesConfig,
}

impl AreaSeriesConfig {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        let payload = AreaSeriesConfigJsonContractV1 {
            schema_version: SERIES_CONFIG_JSON_SCHEMA_V1,
            series: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidConfig(format!("failed to serialize area series contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned contract envelope.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to parse series json: {e}")))?;
        let config = if value.get("schema_version").is_some() {
            let payload: AreaSeriesConfigJsonContractV1 = serde_json::from_value(value)
                .map_err(|e| {
                    PlotError::InvalidConfig(format!("failed to parse series json payload: {e}"))
                })?;
            if payload.schema_version != SERIES_CONFIG_JSON_SCHEMA_V1 {
                return Err(PlotError::InvalidConfig(format!(
                    "unsupported series schema version: {}",
                    payload.schema_version
                )));
            }
            payload.series
        } else {
            serde_json::from_value(value).map_err(|e| {
                PlotError::InvalidConfig(format!("failed to parse series json: {e}"))
            })?
        };
        config.validate()?;
        Ok(config)
    }
}

impl LineSeriesConfig {
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PlotError::InvalidConfig(format!("failed to serialize line series config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to parse series json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
