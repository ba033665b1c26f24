//! Extreme x coordinates along a curve.

use crate::curve::Curve2;
use crate::sampling::uniform_parameters;

/// Samples used to bracket each extremum before refinement.
pub const SCAN_GRID: usize = 1000;

const REFINE_ITERATIONS: usize = 80;
const INV_GOLDEN: f64 = 0.618_033_988_749_894_9;

/// Parameter at which an extreme value is reached, and the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub t: f64,
    pub value: f64,
}

/// Smallest and largest x of a curve over its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XExtent {
    pub min: Extremum,
    pub max: Extremum,
}

impl XExtent {
    pub fn width(&self) -> f64 {
        self.max.value - self.min.value
    }
}

/// Minimum and maximum x of `curve`.
///
/// A uniform scan brackets each extremum between the neighbours of the best
/// grid sample, then golden-section search refines it. The curve ends are
/// grid samples, so an extremum at an end is found exactly.
pub fn x_extent(curve: &dyn Curve2) -> XExtent {
    let (t_min, t_max) = curve.domain();
    let grid: Vec<f64> = uniform_parameters(SCAN_GRID)
        .into_iter()
        .map(|u| t_min + u * (t_max - t_min))
        .collect();
    let xs: Vec<f64> = grid.iter().map(|&t| curve.point_at(t).x).collect();

    XExtent {
        min: refine(curve, &grid, &xs, 1.0),
        max: refine(curve, &grid, &xs, -1.0),
    }
}

/// Minimize `sign * x` around the best grid sample.
fn refine(curve: &dyn Curve2, grid: &[f64], xs: &[f64], sign: f64) -> Extremum {
    let best = (1..xs.len()).fold(0, |b, i| if sign * xs[i] < sign * xs[b] { i } else { b });
    let f = |t: f64| sign * curve.point_at(t).x;

    let mut lo = grid[best.saturating_sub(1)];
    let mut hi = grid[(best + 1).min(grid.len() - 1)];
    let mut a = hi - INV_GOLDEN * (hi - lo);
    let mut b = lo + INV_GOLDEN * (hi - lo);
    let (mut fa, mut fb) = (f(a), f(b));

    for _ in 0..REFINE_ITERATIONS {
        if fa < fb {
            hi = b;
            b = a;
            fb = fa;
            a = hi - INV_GOLDEN * (hi - lo);
            fa = f(a);
        } else {
            lo = a;
            a = b;
            fa = fb;
            b = lo + INV_GOLDEN * (hi - lo);
            fb = f(b);
        }
    }

    let (t, v) = if fa < fb { (a, fa) } else { (b, fb) };
    if v < sign * xs[best] {
        Extremum { t, value: sign * v }
    } else {
        Extremum {
            t: grid[best],
            value: xs[best],
        }
    }
}
