//! Knot vector utilities for B-spline evaluation and fitting.

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`,
/// with special handling for the upper boundary.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    // Special case: t at upper boundary
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    // Binary search
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Compute the non-vanishing basis functions at parameter `t`.
///
/// Returns a vector of `degree + 1` basis function values N_{span-degree,degree}(t)
/// through N_{span,degree}(t).
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `span` - The knot span index (from `find_span`)
/// * `t` - Parameter value
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}

/// Compute the non-vanishing basis functions and their derivatives up to
/// order `n_derivs` at parameter `t`.
///
/// Returns `ders` where `ders[k][j]` is the `k`-th derivative of
/// N_{span-degree+j,degree}(t). Rows above `degree` are identically zero.
#[allow(clippy::needless_range_loop)]
pub fn basis_function_derivs(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
    n_derivs: usize,
) -> Vec<Vec<f64>> {
    let p = degree;

    // Triangular table: basis values in the upper triangle, knot differences below
    let mut ndu = vec![vec![0.0; p + 1]; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    ndu[0][0] = 1.0;

    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            ndu[j][r] = right[r + 1] + left[j - r];
            let temp = ndu[r][j - 1] / ndu[j][r];

            ndu[r][j] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[j][j] = saved;
    }

    let mut ders = vec![vec![0.0; p + 1]; n_derivs + 1];
    for j in 0..=p {
        ders[0][j] = ndu[j][p];
    }

    let max_order = n_derivs.min(p);
    let mut a = vec![vec![0.0; p + 1]; 2];

    for r in 0..=p {
        let mut s1 = 0usize;
        let mut s2 = 1usize;
        a[0][0] = 1.0;

        for k in 1..=max_order {
            let mut d = 0.0;
            let rk = r as isize - k as isize;
            let pk = p - k;

            if rk >= 0 {
                a[s2][0] = a[s1][0] / ndu[pk + 1][rk as usize];
                d = a[s2][0] * ndu[rk as usize][pk];
            }

            let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
            let j2 = if r <= pk + 1 { k - 1 } else { p - r };

            for j in j1..=j2 {
                let idx = (rk + j as isize) as usize;
                a[s2][j] = (a[s1][j] - a[s1][j - 1]) / ndu[pk + 1][idx];
                d += a[s2][j] * ndu[idx][pk];
            }

            if r <= pk {
                a[s2][k] = -a[s1][k - 1] / ndu[pk + 1][r];
                d += a[s2][k] * ndu[r][pk];
            }

            ders[k][r] = d;
            std::mem::swap(&mut s1, &mut s2);
        }
    }

    // Multiply through by p! / (p - k)!
    let mut factor = p as f64;
    for k in 1..=max_order {
        for val in &mut ders[k] {
            *val *= factor;
        }
        factor *= (p - k) as f64;
    }

    ders
}

/// Clamped knot vector for global interpolation through `params` (averaging
/// technique). Produces `params.len() + degree + 1` knots.
///
/// `params` must be non-decreasing over `[0, 1]` with `params.len() > degree`.
pub fn averaged_knots(params: &[f64], degree: usize) -> Vec<f64> {
    let m = params.len();
    let mut knots = Vec::with_capacity(m + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));

    for j in 1..m - degree {
        let sum: f64 = params[j..j + degree].iter().sum();
        knots.push(sum / degree as f64);
    }

    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Clamped knot vector for a least-squares fit with `n_ctrl` control points.
///
/// Interior knots are placed so that every knot span contains at least one
/// parameter value, which keeps the normal equations well posed.
/// Requires `degree < n_ctrl <= params.len()`.
pub fn approximation_knots(params: &[f64], n_ctrl: usize, degree: usize) -> Vec<f64> {
    let m = params.len();
    let mut knots = Vec::with_capacity(n_ctrl + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));

    let d = m as f64 / (n_ctrl - degree) as f64;
    for j in 1..n_ctrl - degree {
        let jd = j as f64 * d;
        let i = (jd.floor() as usize).clamp(1, m - 1);
        let alpha = jd - i as f64;
        knots.push((1.0 - alpha) * params[i - 1] + alpha * params[i]);
    }

    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Whether `knots` is non-decreasing and clamped (end knots repeated
/// `degree + 1` times).
pub fn is_clamped(degree: usize, knots: &[f64]) -> bool {
    if knots.len() < 2 * (degree + 1) {
        return false;
    }
    if knots.windows(2).any(|w| w[1] < w[0]) {
        return false;
    }
    let first = knots[0];
    let last = knots[knots.len() - 1];
    knots[..=degree].iter().all(|&k| k == first)
        && knots[knots.len() - degree - 1..].iter().all(|&k| k == last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_uniform() {
        // Degree 2, 5 control points, uniform knot vector
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let n = 4; // 5 control points - 1
        let degree = 2;

        assert_eq!(find_span(degree, &knots, n, 0.0), 2);
        assert_eq!(find_span(degree, &knots, n, 0.5), 2);
        assert_eq!(find_span(degree, &knots, n, 1.0), 3);
        assert_eq!(find_span(degree, &knots, n, 1.5), 3);
        assert_eq!(find_span(degree, &knots, n, 2.5), 4);
        assert_eq!(find_span(degree, &knots, n, 3.0), 4);
    }

    #[test]
    fn test_basis_functions_partition_of_unity() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.55, 1.0, 1.0, 1.0, 1.0];
        let degree = 3;
        let n = 5;

        for i in 0..=40 {
            let t = i as f64 / 40.0;
            let span = find_span(degree, &knots, n, t);
            let basis = basis_functions(degree, &knots, span, t);
            let sum: f64 = basis.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "Partition of unity failed at t={}: sum={}",
                t,
                sum
            );
            assert!(basis.iter().all(|&b| b >= -1e-15));
        }
    }

    #[test]
    fn test_basis_derivs_match_bernstein() {
        // Cubic Bezier: basis functions are the Bernstein polynomials
        let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let degree = 3;

        for &t in &[0.0, 0.2, 0.5, 0.9, 1.0] {
            let span = find_span(degree, &knots, 3, t);
            let ders = basis_function_derivs(degree, &knots, span, t, 2);
            let s = 1.0 - t;

            let values = [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t];
            let first = [
                -3.0 * s * s,
                3.0 * s * s - 6.0 * t * s,
                6.0 * t * s - 3.0 * t * t,
                3.0 * t * t,
            ];
            let second = [6.0 * s, 18.0 * t - 12.0, 6.0 - 18.0 * t, 6.0 * t];

            for j in 0..=degree {
                assert!((ders[0][j] - values[j]).abs() < 1e-12, "N t={} j={}", t, j);
                assert!((ders[1][j] - first[j]).abs() < 1e-12, "N' t={} j={}", t, j);
                assert!((ders[2][j] - second[j]).abs() < 1e-12, "N'' t={} j={}", t, j);
            }
        }
    }

    #[test]
    fn test_basis_derivs_sum_to_zero() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.55, 1.0, 1.0, 1.0, 1.0];
        let degree = 3;

        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let span = find_span(degree, &knots, 5, t);
            let ders = basis_function_derivs(degree, &knots, span, t, 4);
            assert_eq!(ders.len(), 5);
            for k in 1..=3 {
                let sum: f64 = ders[k].iter().sum();
                assert!(sum.abs() < 1e-9, "order {} at t={}: {}", k, t, sum);
            }
            // Beyond the degree every derivative vanishes
            assert!(ders[4].iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_averaged_knots() {
        let params = [0.0, 0.25, 0.5, 0.75, 1.0];
        let knots = averaged_knots(&params, 3);
        assert_eq!(knots, vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
        assert!(is_clamped(3, &knots));
    }

    #[test]
    fn test_approximation_knots() {
        let params: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let knots = approximation_knots(&params, 5, 3);
        assert_eq!(knots.len(), 5 + 3 + 1);
        assert!((knots[4] - 0.45).abs() < 1e-12);
        assert!(is_clamped(3, &knots));
    }

    #[test]
    fn test_is_clamped_rejects_decreasing() {
        assert!(!is_clamped(1, &[0.0, 0.0, 0.6, 0.4, 1.0, 1.0]));
        assert!(!is_clamped(2, &[0.0, 0.0, 1.0, 1.0]));
    }
}
