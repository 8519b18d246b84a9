pub mod area_series;
pub mod axis;
pub mod config;
pub mod data_source;
pub mod line_series;
pub mod primitives;
pub mod resample;
pub mod segment;
pub mod series;
pub mod spline;
pub mod types;

pub use area_series::{AreaSeries, SecondarySource};
pub use axis::{Axis, AxisPosition, AxisScaleKind, AxisValue, AxisValueKind, clipping_rect};
pub use config::{AreaSeriesConfig, LineSeriesConfig};
pub use data_source::{FieldMapping, ItemsSource, PointAccessor};
pub use hit_test::TrackerHitResult;
pub use line_series::LineSeries;
pub use resample::resample_points;
pub use segment::split_segments;
pub use series::{Series, refresh_axes};
pub use spline::create_spline;
pub use types::{DataPoint, DataRange, ScreenPoint, ScreenRect};
