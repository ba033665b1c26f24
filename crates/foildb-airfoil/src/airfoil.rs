//! Raw and canonical airfoil point sequences.

use foildb_core::traits::Validate;
use foildb_core::{FoilError, Result, Tolerance};
use foildb_math::{is_finite_point, Point2};
use serde::Serialize;

/// Points of an airfoil in file order, as read from the archive.
///
/// Holds at least 3 finite points with no two consecutive points coincident
/// within the default [`Tolerance`]. A looser configured tolerance is applied
/// later, when the curve is fitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawAirfoil {
    name: String,
    points: Vec<Point2>,
}

impl RawAirfoil {
    pub const MIN_POINTS: usize = 3;

    pub fn new(name: impl Into<String>, points: Vec<Point2>) -> Result<Self> {
        let airfoil = Self {
            name: name.into(),
            points,
        };
        airfoil.validate()?;
        Ok(airfoil)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Validate for RawAirfoil {
    fn validate(&self) -> Result<()> {
        if self.points.len() < Self::MIN_POINTS {
            return Err(FoilError::Parse(format!(
                "airfoil '{}' has {} points, need at least {}",
                self.name,
                self.points.len(),
                Self::MIN_POINTS
            )));
        }
        if let Some(i) = self.points.iter().position(|&p| !is_finite_point(p)) {
            return Err(FoilError::Parse(format!(
                "airfoil '{}' has a non-finite point at index {}",
                self.name, i
            )));
        }
        let tol = Tolerance::default();
        if let Some(i) = self
            .points
            .windows(2)
            .position(|w| tol.is_zero(w[0].distance(w[1])))
        {
            return Err(FoilError::Parse(format!(
                "airfoil '{}' repeats point {} at index {}",
                self.name,
                i,
                i + 1
            )));
        }
        Ok(())
    }
}

/// Canonical airfoil: a fixed number of chord-normalized points running
/// trailing edge, upper surface, leading edge, lower surface, trailing edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformAirfoil {
    name: String,
    points: Vec<Point2>,
}

impl UniformAirfoil {
    pub(crate) fn new(name: impl Into<String>, points: Vec<Point2>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point with minimum x.
    pub fn leading_edge(&self) -> Option<Point2> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }

    /// First and last points; both lie at the trailing edge.
    pub fn trailing_edge(&self) -> Option<(Point2, Point2)> {
        Some((*self.points.first()?, *self.points.last()?))
    }

    /// Reuse this canonical point set as raw input, e.g. to refit it.
    pub fn to_raw(&self) -> Result<RawAirfoil> {
        RawAirfoil::new(self.name.clone(), self.points.clone())
    }
}
