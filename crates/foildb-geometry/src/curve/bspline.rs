//! B-spline curve in the plane.

use foildb_core::traits::Validate;
use foildb_core::{FoilError, Result};
use foildb_math::{is_finite_point, Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::Curve2;
use crate::nurbs::{deboor, is_clamped};

/// A clamped B-spline curve defined by degree, knot vector, and control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BSplineCurve2 {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point2>,
}

impl BSplineCurve2 {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point2>) -> Self {
        debug_assert!(
            knots.len() == control_points.len() + degree + 1,
            "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
            knots.len(),
            control_points.len(),
            degree
        );
        Self {
            degree,
            knots,
            control_points,
        }
    }

    /// Construct and validate, reporting a fit error for inconsistent data.
    pub fn try_new(degree: usize, knots: Vec<f64>, control_points: Vec<Point2>) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// All derivatives up to `n_derivs` at `t`; element 0 is the point.
    pub fn derivatives_at(&self, t: f64, n_derivs: usize) -> Vec<Vector2> {
        deboor::curve_derivs(self.degree, &self.knots, &self.control_points, t, n_derivs)
    }

    /// Evaluate the curve at every parameter in `params`.
    pub fn points_at(&self, params: &[f64]) -> Vec<Point2> {
        params.iter().map(|&t| self.point_at(t)).collect()
    }
}

impl Validate for BSplineCurve2 {
    fn validate(&self) -> Result<()> {
        if self.degree == 0 {
            return Err(FoilError::Fit("B-spline degree must be at least 1".into()));
        }
        if self.control_points.len() <= self.degree {
            return Err(FoilError::Fit(format!(
                "{} control points cannot carry a degree {} B-spline",
                self.control_points.len(),
                self.degree
            )));
        }
        if self.knots.len() != self.control_points.len() + self.degree + 1 {
            return Err(FoilError::Fit(format!(
                "expected {} knots, got {}",
                self.control_points.len() + self.degree + 1,
                self.knots.len()
            )));
        }
        if self.knots.iter().any(|k| !k.is_finite()) || !is_clamped(self.degree, &self.knots) {
            return Err(FoilError::Fit("knot vector is not clamped and non-decreasing".into()));
        }
        if let Some(i) = self.control_points.iter().position(|&p| !is_finite_point(p)) {
            return Err(FoilError::Fit(format!("control point {} is not finite", i)));
        }
        Ok(())
    }
}

impl Curve2 for BSplineCurve2 {
    fn point_at(&self, t: f64) -> Point2 {
        deboor::curve_point(self.degree, &self.knots, &self.control_points, t)
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        deboor::curve_tangent(self.degree, &self.knots, &self.control_points, t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector2 {
        self.derivatives_at(t, 2)[2]
    }

    fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }
}
