use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;

use xyplot::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use xyplot::core::{Axis, AxisPosition, AxisValue, AxisValueKind, DataPoint};

#[test]
fn data_point_from_decimal_time_is_supported() {
    let time = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid ts");
    let point = DataPoint::from_decimal_time(time, Decimal::new(12345, 2)).expect("point");

    assert!((point.x - 1_700_000_000.0).abs() <= 1e-6);
    assert!((point.y - 123.45).abs() <= 1e-9);
}

#[test]
fn unix_seconds_keep_millisecond_precision() {
    let time = Utc
        .timestamp_millis_opt(1_700_000_000_250)
        .single()
        .expect("valid ts");
    let seconds = datetime_to_unix_seconds(time);
    assert!((seconds - 1_700_000_000.25).abs() <= 1e-6);
    assert_eq!(unix_seconds_to_datetime(seconds), Some(time));
}

#[test]
fn non_finite_seconds_have_no_instant() {
    assert_eq!(unix_seconds_to_datetime(f64::NAN), None);
    assert_eq!(unix_seconds_to_datetime(f64::INFINITY), None);
    assert_eq!(unix_seconds_to_datetime(1.0e300), None);
}

#[test]
fn date_axis_formats_decimal_time_points() {
    let time = Utc
        .with_ymd_and_hms(2024, 3, 9, 14, 30, 0)
        .single()
        .expect("valid date");
    let point = DataPoint::from_decimal_time(time, Decimal::ONE).expect("point");
    let axis = Axis::new(AxisPosition::Bottom).with_value_kind(AxisValueKind::DateTime);

    let value = axis.value_of(point.x);
    assert_eq!(value, AxisValue::DateTime(time));
    assert_eq!(value.format(Some("%d/%m %H:%M")), "09/03 14:30");
    assert_eq!(value.to_string(), "2024-03-09 14:30:00");
}
