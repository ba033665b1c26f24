//! Parameter distributions for resampling a curve.
//!
//! Every function returns parameters in non-decreasing order; the first and
//! last values are the ends of the requested range exactly.

use std::f64::consts::PI;

use crate::curve::Curve2;

/// Resolution of the grid used to integrate curvature along a curve.
pub const CURVATURE_GRID: usize = 1000;

/// `n` equally spaced parameters over `[0, 1]`.
pub fn uniform_parameters(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// `n` cosine-spaced parameters over `[0, 1]`, clustered at both ends.
pub fn cosine_parameters(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            let mut params: Vec<f64> = (0..n)
                .map(|i| 0.5 * (1.0 - (PI * i as f64 / last).cos()))
                .collect();
            params[0] = 0.0;
            params[n - 1] = 1.0;
            params
        }
    }
}

/// Cosine spacing applied separately on `[0, split]` and `[split, 1]`.
///
/// The first range receives `ceil(n / 2)` parameters including both of its
/// ends; the second receives the rest and omits `split`, so the split
/// parameter appears exactly once. Requires `n >= 2`.
pub fn split_cosine_parameters(n: usize, split: f64) -> Vec<f64> {
    let split = split.clamp(0.0, 1.0);
    let head = n.div_ceil(2);
    let tail = n - head;

    let mut params: Vec<f64> = cosine_parameters(head)
        .into_iter()
        .map(|u| u * split)
        .collect();
    params.extend(
        cosine_parameters(tail + 1)
            .into_iter()
            .skip(1)
            .map(|u| split + u * (1.0 - split)),
    );
    if tail > 0 {
        params[n - 1] = 1.0;
    }
    params
}

/// `n` parameters equally spaced in the cumulative integral of
/// `curvature + smoother` over the curve domain.
///
/// Larger `smoother` values make the spacing more uniform. A straight curve
/// with `smoother == 0` falls back to uniform spacing over the domain.
pub fn curvature_parameters(curve: &dyn Curve2, n: usize, smoother: f64) -> Vec<f64> {
    let (t_min, t_max) = curve.domain();
    let span = t_max - t_min;
    let grid: Vec<f64> = uniform_parameters(CURVATURE_GRID)
        .into_iter()
        .map(|u| t_min + u * span)
        .collect();
    let density: Vec<f64> = grid
        .iter()
        .map(|&t| curve.curvature_at(t) + smoother)
        .collect();

    // Cumulative trapezoid rule
    let mut cumulative = Vec::with_capacity(grid.len());
    cumulative.push(0.0);
    for i in 1..grid.len() {
        let step = 0.5 * (density[i] + density[i - 1]) * (grid[i] - grid[i - 1]);
        cumulative.push(cumulative[i - 1] + step);
    }

    let total = cumulative[cumulative.len() - 1];
    if !total.is_finite() || total <= 0.0 {
        return uniform_parameters(n)
            .into_iter()
            .map(|u| t_min + u * span)
            .collect();
    }

    let mut params: Vec<f64> = uniform_parameters(n)
        .into_iter()
        .map(|u| invert_cumulative(&grid, &cumulative, u * total))
        .collect();
    if let Some(first) = params.first_mut() {
        *first = t_min;
    }
    if let Some(last) = params.last_mut() {
        *last = t_max;
    }
    params
}

/// Linear interpolation of the grid parameter where `cumulative` reaches `target`.
fn invert_cumulative(grid: &[f64], cumulative: &[f64], target: f64) -> f64 {
    let idx = cumulative.partition_point(|&c| c < target);
    if idx == 0 {
        return grid[0];
    }
    if idx >= grid.len() {
        return grid[grid.len() - 1];
    }
    let (c0, c1) = (cumulative[idx - 1], cumulative[idx]);
    let (t0, t1) = (grid[idx - 1], grid[idx]);
    if c1 <= c0 {
        return t1;
    }
    t0 + (target - c0) / (c1 - c0) * (t1 - t0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::BSplineCurve2;
    use approx::assert_abs_diff_eq;
    use foildb_math::dvec2;

    #[test]
    fn test_uniform_parameters() {
        assert_eq!(uniform_parameters(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(uniform_parameters(1), vec![0.0]);
        assert!(uniform_parameters(0).is_empty());
    }

    #[test]
    fn test_cosine_parameters_cluster_at_ends() {
        let t = cosine_parameters(21);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[20], 1.0);
        assert_abs_diff_eq!(t[10], 0.5, epsilon = 1e-12);
        assert!(t.windows(2).all(|w| w[1] > w[0]));

        let first_step = t[1] - t[0];
        let middle_step = t[11] - t[10];
        assert!(first_step < middle_step / 10.0);
        // Symmetric about the midpoint
        for i in 0..21 {
            assert!((t[i] + t[20 - i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cosine_parameters_four_points() {
        let t = cosine_parameters(4);
        assert_eq!(t.len(), 4);
        assert_abs_diff_eq!(t[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(t[2], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_split_cosine_parameters() {
        let t = split_cosine_parameters(10, 0.4);
        assert_eq!(t.len(), 10);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[9], 1.0);
        assert_abs_diff_eq!(t[4], 0.4, epsilon = 1e-12);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(t.iter().filter(|&&u| (u - 0.4).abs() < 1e-12).count(), 1);

        // Odd counts give the extra point to the first range
        let t = split_cosine_parameters(7, 0.5);
        assert_eq!(t.len(), 7);
        assert_abs_diff_eq!(t[3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_curvature_parameters_dense_where_curved() {
        // Polyline-like quadratic with a sharp bend in the middle
        let curve = BSplineCurve2::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![dvec2(0.0, 0.0), dvec2(0.5, 2.0), dvec2(1.0, 0.0)],
        );
        let t = curvature_parameters(&curve, 41, 0.1);
        assert_eq!(t.len(), 41);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[40], 1.0);
        assert!(t.windows(2).all(|w| w[1] >= w[0]));

        let middle_step = t[21] - t[20];
        let end_step = t[1] - t[0];
        assert!(middle_step < end_step, "{} vs {}", middle_step, end_step);
    }

    #[test]
    fn test_curvature_parameters_straight_line_is_uniform() {
        let line = BSplineCurve2::new(1, vec![0.0, 0.0, 1.0, 1.0], vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0)]);
        let t = curvature_parameters(&line, 5, 0.0);
        for (a, b) in t.iter().zip(uniform_parameters(5)) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }
}
