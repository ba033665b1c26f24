//! De Boor evaluation of planar B-spline curves.

use foildb_math::{Point2, Vector2};

use super::knot::{basis_function_derivs, basis_functions, find_span};

/// Evaluate a B-spline curve point at parameter `t` using the De Boor algorithm.
pub fn curve_point(degree: usize, knots: &[f64], control_points: &[Point2], t: f64) -> Point2 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = Point2::ZERO;
    for (i, b) in basis.iter().enumerate() {
        point += *b * control_points[span - degree + i];
    }

    point
}

/// Evaluate the curve and its derivatives up to order `n_derivs` at `t`.
///
/// Element `k` of the result is the `k`-th derivative; element 0 is the point.
pub fn curve_derivs(
    degree: usize,
    knots: &[f64],
    control_points: &[Point2],
    t: f64,
    n_derivs: usize,
) -> Vec<Vector2> {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let ders = basis_function_derivs(degree, knots, span, t, n_derivs);

    ders.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold(Vector2::ZERO, |acc, (j, &b)| {
                    acc + b * control_points[span - degree + j]
                })
        })
        .collect()
}

/// Evaluate the tangent (first derivative) of a B-spline curve at parameter `t`.
pub fn curve_tangent(
    degree: usize,
    knots: &[f64],
    control_points: &[Point2],
    t: f64,
) -> Vector2 {
    curve_derivs(degree, knots, control_points, t, 1)[1]
}
