/// Tolerances used when comparing raw coordinates and fitted geometry.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Distance below which two points are considered coincident (chord units)
    pub linear: f64,
    /// Smallest pivot/weight treated as non-zero in numeric routines
    pub numeric: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;
    pub const DEFAULT_NUMERIC: f64 = 1e-12;

    /// Check if a length is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() <= self.linear
    }

    /// Check if a pivot or denominator is numerically zero
    pub fn is_negligible(self, v: f64) -> bool {
        v.abs() <= self.numeric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            numeric: Self::DEFAULT_NUMERIC,
        }
    }
}
