//! Planar parametric curves.

mod bspline;

use foildb_math::{Point2, Vector2};

pub use bspline::BSplineCurve2;

/// Trait for parametric curves in the plane.
pub trait Curve2: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Evaluate the tangent vector (first derivative) at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector2;

    /// Evaluate the second derivative at parameter `t`.
    fn second_derivative_at(&self, t: f64) -> Vector2;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Unsigned curvature at `t`. Zero where the tangent vanishes.
    fn curvature_at(&self, t: f64) -> f64 {
        let d1 = self.tangent_at(t);
        let d2 = self.second_derivative_at(t);
        let speed = d1.length();
        if speed < 1e-15 {
            return 0.0;
        }
        d1.perp_dot(d2).abs() / (speed * speed * speed)
    }
}
