//! foildb geometry: planar B-spline curves, fitting, and resampling.

pub mod banded;
pub mod curve;
pub mod extrema;
pub mod fit;
pub mod nurbs;
pub mod param;
pub mod sampling;

pub use curve::{BSplineCurve2, Curve2};
pub use extrema::{x_extent, Extremum, XExtent};
pub use fit::{approximate, fit_points, interpolate};
pub use param::chord_length_parameters;
