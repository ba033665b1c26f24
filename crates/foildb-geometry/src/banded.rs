//! Banded linear systems.
//!
//! B-spline collocation matrices have at most `degree + 1` non-zeros per
//! row, clustered around the diagonal. Storing only the band keeps the
//! interpolation solve linear in the number of points.

use foildb_core::{FoilError, Result, Tolerance};
use foildb_math::Point2;

/// Square matrix stored by diagonals.
///
/// Row `i` keeps columns `i - lower ..= i + lower + upper`; the extra
/// `lower` super-diagonals hold the fill-in produced by row pivoting.
#[derive(Debug, Clone)]
pub struct BandedMatrix {
    n: usize,
    lower: usize,
    upper: usize,
    width: usize,
    data: Vec<f64>,
}

impl BandedMatrix {
    /// Zero `n` x `n` matrix with `lower` sub- and `upper` super-diagonals.
    pub fn zeros(n: usize, lower: usize, upper: usize) -> Self {
        let width = 2 * lower + upper + 1;
        Self {
            n,
            lower,
            upper,
            width,
            data: vec![0.0; n * width],
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(col + self.lower >= row && col <= row + self.lower + self.upper);
        row * self.width + col + self.lower - row
    }

    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(row, col)]
    }

    /// Set entry `(row, col)`, which must lie inside the declared band.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.n || col >= self.n || col + self.lower < row || col > row + self.upper {
            return Err(FoilError::Fit(format!(
                "entry ({}, {}) lies outside the band of a {}x{} matrix with bandwidths {}/{}",
                row, col, self.n, self.n, self.lower, self.upper
            )));
        }
        let i = self.index(row, col);
        self.data[i] = value;
        Ok(())
    }

    /// Solve `A x = rhs` for planar right-hand sides by Gaussian elimination
    /// with partial pivoting inside the band.
    pub fn solve(mut self, rhs: &[Point2], tol: Tolerance) -> Result<Vec<Point2>> {
        let n = self.n;
        if rhs.len() != n {
            return Err(FoilError::Fit(format!(
                "right-hand side has {} rows, matrix has {}",
                rhs.len(),
                n
            )));
        }
        let kl = self.lower;
        let ku = self.lower + self.upper;
        let mut b = rhs.to_vec();

        for k in 0..n {
            let last_row = (k + kl).min(n - 1);
            let last_col = (k + ku).min(n - 1);

            let pivot_row = (k + 1..=last_row).fold(k, |best, i| {
                if self.at(i, k).abs() > self.at(best, k).abs() {
                    i
                } else {
                    best
                }
            });
            let pivot = self.at(pivot_row, k);
            if !pivot.is_finite() || tol.is_negligible(pivot) {
                return Err(FoilError::Fit(format!("matrix is singular at column {}", k)));
            }

            if pivot_row != k {
                for j in k..=last_col {
                    let (a, c) = (self.index(k, j), self.index(pivot_row, j));
                    self.data.swap(a, c);
                }
                b.swap(k, pivot_row);
            }

            for i in k + 1..=last_row {
                let factor = self.at(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..=last_col {
                    let update = factor * self.at(k, j);
                    let idx = self.index(i, j);
                    self.data[idx] -= update;
                }
                let bk = b[k];
                b[i] -= factor * bk;
            }
        }

        let mut x = vec![Point2::ZERO; n];
        for k in (0..n).rev() {
            let last_col = (k + ku).min(n - 1);
            let mut acc = b[k];
            for j in k + 1..=last_col {
                acc -= self.at(k, j) * x[j];
            }
            x[k] = acc / self.at(k, k);
        }
        Ok(x)
    }
}
