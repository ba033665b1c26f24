pub use glam::{dvec2, DVec2};

pub type Point2 = DVec2;
pub type Vector2 = DVec2;

/// Whether both coordinates of `p` are finite.
pub fn is_finite_point(p: Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
