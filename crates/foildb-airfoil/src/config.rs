//! Uniformization configuration.

use foildb_core::{FoilError, Result, Tolerance};
use serde::{Deserialize, Serialize};

/// Law used to distribute sample parameters along the fitted curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum Spacing {
    /// Equal parameter steps.
    Uniform,
    /// Cosine clustering toward both ends of the curve (the trailing edge).
    Cosine,
    /// Cosine clustering on each surface separately, splitting at the
    /// leading edge of the fitted curve so both edges are refined and the
    /// leading edge itself is sampled.
    #[default]
    SurfaceCosine,
    /// Equal steps in the integral of `curvature + smoother`.
    Curvature { smoother: f64 },
}

impl Spacing {
    /// Smoother used by the archive's historical curvature-based exports.
    pub const DEFAULT_SMOOTHER: f64 = 50.0;

    pub fn curvature() -> Self {
        Self::Curvature {
            smoother: Self::DEFAULT_SMOOTHER,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Curvature { smoother } if !smoother.is_finite() || smoother < 0.0 => {
                Err(FoilError::Config(format!(
                    "curvature smoother must be finite and non-negative, got {}",
                    smoother
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Validated options for [`crate::uniformize::uniformize`].
///
/// Every constructor checks the fields, so a value of this type is always
/// usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UniformizeSettings", into = "UniformizeSettings")]
pub struct UniformizeConfig {
    /// Total output points. Odd counts are accepted; with
    /// [`Spacing::SurfaceCosine`] the upper surface gets the extra point.
    n_points: usize,
    degree: usize,
    smoothing: f64,
    spacing: Spacing,
    tolerance: Tolerance,
}

impl UniformizeConfig {
    pub const DEFAULT_N_POINTS: usize = 192;
    pub const DEFAULT_DEGREE: usize = 3;
    pub const DEFAULT_SMOOTHING: f64 = 0.0;
    pub const MAX_DEGREE: usize = 5;

    pub fn new(n_points: usize, degree: usize, smoothing: f64, spacing: Spacing) -> Result<Self> {
        let config = Self {
            n_points,
            degree,
            smoothing,
            spacing,
            tolerance: Tolerance::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_DEGREE).contains(&self.degree) {
            return Err(FoilError::Config(format!(
                "degree must be between 1 and {}, got {}",
                Self::MAX_DEGREE,
                self.degree
            )));
        }
        if self.n_points < self.degree + 1 {
            return Err(FoilError::Config(format!(
                "n_points must be at least degree + 1 = {}, got {}",
                self.degree + 1,
                self.n_points
            )));
        }
        if !self.smoothing.is_finite() || self.smoothing < 0.0 {
            return Err(FoilError::Config(format!(
                "smoothing must be finite and non-negative, got {}",
                self.smoothing
            )));
        }
        if !(self.tolerance.linear > 0.0 && self.tolerance.linear.is_finite()) {
            return Err(FoilError::Config(format!(
                "linear tolerance must be positive, got {}",
                self.tolerance.linear
            )));
        }
        self.spacing.validate()
    }

    pub fn with_n_points(mut self, n_points: usize) -> Result<Self> {
        self.n_points = n_points;
        self.validate()?;
        Ok(self)
    }

    pub fn with_degree(mut self, degree: usize) -> Result<Self> {
        self.degree = degree;
        self.validate()?;
        Ok(self)
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Result<Self> {
        self.smoothing = smoothing;
        self.validate()?;
        Ok(self)
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Result<Self> {
        self.spacing = spacing;
        self.validate()?;
        Ok(self)
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Result<Self> {
        self.tolerance = tolerance;
        self.validate()?;
        Ok(self)
    }

    /// Parse a TOML document; absent keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FoilError::Config(e.message().to_string()))
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

impl Default for UniformizeConfig {
    fn default() -> Self {
        Self {
            n_points: Self::DEFAULT_N_POINTS,
            degree: Self::DEFAULT_DEGREE,
            smoothing: Self::DEFAULT_SMOOTHING,
            spacing: Spacing::default(),
            tolerance: Tolerance::default(),
        }
    }
}

/// Unvalidated, serializable form of [`UniformizeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniformizeSettings {
    pub n_points: usize,
    pub degree: usize,
    pub smoothing: f64,
    pub spacing: Spacing,
    pub tolerance: Tolerance,
}

impl Default for UniformizeSettings {
    fn default() -> Self {
        UniformizeConfig::default().into()
    }
}

impl TryFrom<UniformizeSettings> for UniformizeConfig {
    type Error = FoilError;

    fn try_from(s: UniformizeSettings) -> Result<Self> {
        let config = Self {
            n_points: s.n_points,
            degree: s.degree,
            smoothing: s.smoothing,
            spacing: s.spacing,
            tolerance: s.tolerance,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<UniformizeConfig> for UniformizeSettings {
    fn from(c: UniformizeConfig) -> Self {
        Self {
            n_points: c.n_points,
            degree: c.degree,
            smoothing: c.smoothing,
            spacing: c.spacing,
            tolerance: c.tolerance,
        }
    }
}
