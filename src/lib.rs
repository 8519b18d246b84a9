//! xyplot: series rendering and coordinate-transform core for 2D plots.
//!
//! Series turn typed data points into screen-space geometry through an
//! [`core::Axis`] pair and emit primitive drawing commands to a pluggable
//! [`render::RenderContext`]. Platform view hosts own the actual canvas and
//! drive the [`core::Series`] contract from their paint and input handlers.

pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use core::{AreaSeries, Axis, DataPoint, LineSeries, ScreenPoint, Series};
pub use error::{PlotError, PlotResult};
pub use render::{RecordingContext, RenderContext};
