//! Global B-spline fitting of parameterized planar points.
//!
//! Two fitting modes are offered: exact interpolation through every point,
//! and least-squares approximation with a fixed number of control points
//! whose end points are pinned to the first and last data points.
//! [`fit_points`] picks between them from a smoothing tolerance.

use foildb_core::{FoilError, Result, Tolerance};
use foildb_math::{dvec2, Point2};
use nalgebra::DMatrix;

use crate::banded::BandedMatrix;
use crate::curve::{BSplineCurve2, Curve2};
use crate::nurbs::{approximation_knots, averaged_knots, basis_functions, find_span};

fn check_inputs(points: &[Point2], params: &[f64], degree: usize) -> Result<()> {
    if points.len() != params.len() {
        return Err(FoilError::Fit(format!(
            "{} points but {} parameters",
            points.len(),
            params.len()
        )));
    }
    if degree == 0 {
        return Err(FoilError::Fit("B-spline degree must be at least 1".into()));
    }
    if points.len() <= degree {
        return Err(FoilError::Fit(format!(
            "{} points are too few for a degree {} fit",
            points.len(),
            degree
        )));
    }
    if params.windows(2).any(|w| w[1] <= w[0]) {
        return Err(FoilError::Fit("parameters must be strictly increasing".into()));
    }
    Ok(())
}

/// Interpolating B-spline through every point, one control point per point.
///
/// With averaged knots the collocation matrix has non-zeros only within
/// `degree` of the diagonal, so the system is solved in band storage.
pub fn interpolate(
    points: &[Point2],
    params: &[f64],
    degree: usize,
    tol: Tolerance,
) -> Result<BSplineCurve2> {
    check_inputs(points, params, degree)?;

    let m = points.len();
    let knots = averaged_knots(params, degree);

    let mut a = BandedMatrix::zeros(m, degree, degree);
    for (row, &t) in params.iter().enumerate() {
        let span = find_span(degree, &knots, m - 1, t);
        let basis = basis_functions(degree, &knots, span, t);
        for (j, b) in basis.into_iter().enumerate() {
            if b != 0.0 {
                a.set(row, span - degree + j, b)?;
            }
        }
    }

    let control_points = a.solve(points, tol)?;

    BSplineCurve2::try_new(degree, knots, control_points)
}

/// Least-squares B-spline with `n_ctrl` control points.
///
/// The first and last control points equal the first and last data points,
/// so the curve still passes through both ends of the sequence.
pub fn approximate(
    points: &[Point2],
    params: &[f64],
    degree: usize,
    n_ctrl: usize,
    tol: Tolerance,
) -> Result<BSplineCurve2> {
    check_inputs(points, params, degree)?;

    let m = points.len();
    if n_ctrl <= degree || n_ctrl > m {
        return Err(FoilError::Fit(format!(
            "cannot approximate {} points with {} control points of degree {}",
            m, n_ctrl, degree
        )));
    }

    let knots = approximation_knots(params, n_ctrl, degree);
    let n = n_ctrl - 1;
    let first = points[0];
    let last = points[m - 1];

    let mut control_points = vec![Point2::ZERO; n_ctrl];
    control_points[0] = first;
    control_points[n] = last;

    if n_ctrl > 2 {
        let mut a = DMatrix::<f64>::zeros(m - 2, n_ctrl - 2);
        let mut rhs = DMatrix::<f64>::zeros(m - 2, 2);

        for k in 1..m - 1 {
            let t = params[k];
            let span = find_span(degree, &knots, n, t);
            let basis = basis_functions(degree, &knots, span, t);

            // Move the pinned end contributions to the right-hand side
            let mut r = points[k];
            for (j, &b) in basis.iter().enumerate() {
                let i = span - degree + j;
                if i == 0 {
                    r -= b * first;
                } else if i == n {
                    r -= b * last;
                } else {
                    a[(k - 1, i - 1)] = b;
                }
            }
            rhs[(k - 1, 0)] = r.x;
            rhs[(k - 1, 1)] = r.y;
        }

        let solution = a
            .svd(true, true)
            .solve(&rhs, tol.numeric)
            .map_err(|e| FoilError::Fit(format!("least-squares solve failed: {e}")))?;

        for (i, cp) in control_points.iter_mut().enumerate().take(n).skip(1) {
            *cp = dvec2(solution[(i - 1, 0)], solution[(i - 1, 1)]);
        }
    }

    BSplineCurve2::try_new(degree, knots, control_points)
}

/// Sum of squared distances between the curve at `params` and `points`.
pub fn squared_residual(curve: &BSplineCurve2, points: &[Point2], params: &[f64]) -> f64 {
    points
        .iter()
        .zip(params)
        .map(|(&q, &t)| curve.point_at(t).distance_squared(q))
        .sum()
}

/// Fit a B-spline through `points` at `params`.
///
/// With `smoothing == 0` the curve interpolates every point. Otherwise the
/// number of knot spans is doubled, starting from a single span, until the
/// sum of squared residuals drops to `smoothing` or below; the search ends
/// at interpolation, whose residual is zero.
pub fn fit_points(
    points: &[Point2],
    params: &[f64],
    degree: usize,
    smoothing: f64,
    tol: Tolerance,
) -> Result<BSplineCurve2> {
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(FoilError::Fit(format!("invalid smoothing tolerance {}", smoothing)));
    }
    if smoothing == 0.0 {
        return interpolate(points, params, degree, tol);
    }

    check_inputs(points, params, degree)?;
    let m = points.len();
    let mut n_ctrl = degree + 1;

    while n_ctrl < m {
        let curve = approximate(points, params, degree, n_ctrl, tol)?;
        if squared_residual(&curve, points, params) <= smoothing {
            return Ok(curve);
        }
        n_ctrl = (2 * n_ctrl - degree).min(m);
    }

    interpolate(points, params, degree, tol)
}
