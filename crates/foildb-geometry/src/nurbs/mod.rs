//! B-spline core algorithms: knot vector utilities and De Boor evaluation.

pub mod deboor;
pub mod knot;

pub use deboor::*;
pub use knot::{
    approximation_knots, averaged_knots, basis_function_derivs, basis_functions, find_span,
    is_clamped,
};
