//! Curve parameterization of ordered sample points.

use foildb_core::{FoilError, Result, Tolerance};
use foildb_math::Point2;

/// Cumulative chord-length parameters of `points`, normalized to `[0, 1]`.
///
/// The first parameter is exactly 0 and the last exactly 1. Fails when two
/// consecutive points coincide within `tol.linear`, since the parameters
/// must be strictly increasing for a spline fit.
pub fn chord_length_parameters(points: &[Point2], tol: Tolerance) -> Result<Vec<f64>> {
    if points.len() < 2 {
        return Err(FoilError::Fit(format!(
            "need at least 2 points to parameterize, got {}",
            points.len()
        )));
    }

    let mut params = Vec::with_capacity(points.len());
    params.push(0.0);
    let mut total = 0.0;
    for (i, w) in points.windows(2).enumerate() {
        let step = w[0].distance(w[1]);
        if !step.is_finite() {
            return Err(FoilError::Fit(format!("non-finite segment length at point {}", i + 1)));
        }
        if tol.is_zero(step) {
            return Err(FoilError::Fit(format!(
                "points {} and {} coincide; parameters would not increase",
                i,
                i + 1
            )));
        }
        total += step;
        params.push(total);
    }

    for t in &mut params {
        *t /= total;
    }
    // Pin the end against accumulated round-off
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }

    Ok(params)
}

/// Total length of the polyline through `points`.
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
