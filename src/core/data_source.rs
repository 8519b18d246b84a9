//! Binding of opaque records to data points.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::DataPoint;
use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{PlotError, PlotResult};

/// Shared, immutable collection of source records.
pub type ItemsSource = Arc<[Value]>;

/// Extracts coordinates from one source record.
pub trait PointAccessor {
    fn extract_x(&self, index: usize, record: &Value) -> PlotResult<f64>;

    fn extract_y(&self, index: usize, record: &Value) -> PlotResult<f64>;

    fn extract_point(&self, index: usize, record: &Value) -> PlotResult<DataPoint> {
        Ok(DataPoint::new(
            self.extract_x(index, record)?,
            self.extract_y(index, record)?,
        ))
    }
}

/// Named-field binding. Field names may be dotted paths into nested objects.
///
/// A `null` field reads as NaN, so nullable columns become gaps. Numeric
/// strings are parsed as decimals and RFC 3339 strings as unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub x_field: String,
    pub y_field: String,
}

impl FieldMapping {
    #[must_use]
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            x_field: x_field.into(),
            y_field: y_field.into(),
        }
    }
}

impl PointAccessor for FieldMapping {
    fn extract_x(&self, index: usize, record: &Value) -> PlotResult<f64> {
        read_number(index, record, &self.x_field)
    }

    fn extract_y(&self, index: usize, record: &Value) -> PlotResult<f64> {
        read_number(index, record, &self.y_field)
    }
}

/// Resolves every record of `source` to a data point.
///
/// Without an accessor each record must deserialize as a [`DataPoint`].
pub fn collect_points(
    source: &[Value],
    accessor: Option<&dyn PointAccessor>,
) -> PlotResult<Vec<DataPoint>> {
    let mut points = Vec::with_capacity(source.len());
    for (index, record) in source.iter().enumerate() {
        let point = match accessor {
            Some(accessor) => accessor.extract_point(index, record)?,
            None => DataPoint::deserialize(record).map_err(|err| {
                PlotError::InvalidData(format!("record {index} is not a data point: {err}"))
            })?,
        };
        points.push(point);
    }
    Ok(points)
}

fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |value, key| match value {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn read_number(index: usize, record: &Value, field: &str) -> PlotResult<f64> {
    let missing = || PlotError::MissingField {
        index,
        field: field.to_owned(),
    };
    match lookup(record, field).ok_or_else(missing)? {
        Value::Null => Ok(f64::NAN),
        Value::Number(number) => number.as_f64().ok_or_else(missing),
        Value::String(text) => parse_text(text, field).ok_or_else(missing)?,
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(missing()),
    }
}

fn parse_text(text: &str, field: &str) -> Option<PlotResult<f64>> {
    if let Ok(value) = text.parse::<Decimal>() {
        return Some(decimal_to_f64(value, field));
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|time| Ok(datetime_to_unix_seconds(time.with_timezone(&Utc))))
}
