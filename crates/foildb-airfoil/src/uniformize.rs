//! Uniformization: fit a B-spline through raw coordinates and resample it
//! to a fixed, chord-normalized point set.

use foildb_core::{FoilError, Result, Tolerance};
use foildb_geometry::param::polyline_length;
use foildb_geometry::sampling::{
    cosine_parameters, curvature_parameters, split_cosine_parameters, uniform_parameters,
};
use foildb_geometry::{chord_length_parameters, fit_points, x_extent, BSplineCurve2, XExtent};
use foildb_math::{dvec2, is_finite_point, Point2};
use tracing::debug;

use crate::airfoil::{RawAirfoil, UniformAirfoil};
use crate::config::{Spacing, UniformizeConfig};
use crate::loader::collapse_consecutive_duplicates;

/// Applies one configuration to any number of airfoils.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniformizer {
    config: UniformizeConfig,
}

impl Uniformizer {
    pub fn new(config: UniformizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UniformizeConfig {
        &self.config
    }

    pub fn fit(&self, raw: &RawAirfoil) -> Result<BSplineCurve2> {
        fit_curve(raw, &self.config)
    }

    pub fn run(&self, raw: &RawAirfoil) -> Result<UniformAirfoil> {
        uniformize(raw, &self.config)
    }
}

/// Fit a clamped B-spline over `[0, 1]` through the raw points using
/// chord-length parameters.
///
/// Points closer to their predecessor than the configured linear tolerance
/// are dropped first; the loader only collapses at the default tolerance.
pub fn fit_curve(raw: &RawAirfoil, config: &UniformizeConfig) -> Result<BSplineCurve2> {
    let tol = config.tolerance();
    let points = collapse_consecutive_duplicates(raw.points().to_vec(), tol);
    if points.len() < raw.len() {
        debug!(
            name = raw.name(),
            dropped = raw.len() - points.len(),
            "Collapsed points within the configured tolerance"
        );
    }
    let params = chord_length_parameters(&points, tol)?;

    // A short sequence cannot carry the configured degree
    let degree = config.degree().min(points.len() - 1);
    if degree < config.degree() {
        debug!(
            name = raw.name(),
            points = points.len(),
            degree,
            "Lowering spline degree for short input"
        );
    }

    fit_points(&points, &params, degree, config.smoothing(), tol)
}

fn sample_parameters(
    raw: &RawAirfoil,
    curve: &BSplineCurve2,
    extent: &XExtent,
    config: &UniformizeConfig,
) -> Vec<f64> {
    let n = config.n_points();
    match config.spacing() {
        Spacing::Uniform => uniform_parameters(n),
        Spacing::Cosine => cosine_parameters(n),
        Spacing::SurfaceCosine => {
            let split = extent.min.t;
            if split > 0.0 && split < 1.0 {
                split_cosine_parameters(n, split)
            } else {
                debug!(name = raw.name(), "Leading edge at a curve end, using plain cosine spacing");
                cosine_parameters(n)
            }
        }
        Spacing::Curvature { smoother } => curvature_parameters(curve, n, smoother),
    }
}

/// Shift x so the leading edge sits at 0 and scale both axes by the chord.
fn normalize_chord(points: &[Point2], x_le: f64, chord: f64, tol: Tolerance) -> Result<Vec<Point2>> {
    if !chord.is_finite() || !x_le.is_finite() || tol.is_zero(chord) {
        return Err(FoilError::Fit(format!(
            "degenerate chord {:e}: curve does not extend along x",
            chord
        )));
    }
    if let Some(i) = points.iter().position(|&p| !is_finite_point(p)) {
        return Err(FoilError::Fit(format!("sample {} evaluated to a non-finite point", i)));
    }

    Ok(points
        .iter()
        .map(|p| dvec2(((p.x - x_le) / chord).clamp(0.0, 1.0), p.y / chord))
        .collect())
}

/// Produce the canonical point set of `raw`.
///
/// The result has exactly `config.n_points()` points in the input's
/// traversal order. The leading edge and chord come from the fitted curve,
/// not from the samples, so the scaling does not depend on `n_points`.
/// Nothing is returned unless every point is finite.
pub fn uniformize(raw: &RawAirfoil, config: &UniformizeConfig) -> Result<UniformAirfoil> {
    let curve = fit_curve(raw, config)?;
    let extent = x_extent(&curve);
    let params = sample_parameters(raw, &curve, &extent, config);
    let samples = curve.points_at(&params);
    let points = normalize_chord(&samples, extent.min.value, extent.width(), config.tolerance())?;

    debug!(
        name = raw.name(),
        raw_points = raw.len(),
        control_points = curve.control_points.len(),
        length = polyline_length(raw.points()),
        chord = extent.width(),
        "Uniformized airfoil"
    );
    Ok(UniformAirfoil::new(raw.name(), points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use foildb_geometry::Curve2;

    fn scenario() -> RawAirfoil {
        RawAirfoil::new(
            "scenario",
            vec![
                dvec2(1.0, 0.0),
                dvec2(0.5, 0.05),
                dvec2(0.0, 0.0),
                dvec2(0.5, -0.03),
                dvec2(1.0, 0.0),
            ],
        )
        .unwrap()
    }

    fn assert_y_within_input_range(points: &[Point2], margin: f64) {
        for p in points {
            assert!(p.y.is_finite());
            assert!(
                (-0.03 - margin..=0.05 + margin).contains(&p.y),
                "y outside the input range: {}",
                p.y
            );
        }
    }

    #[test]
    fn test_scenario_four_points() {
        let config = UniformizeConfig::default().with_n_points(4).unwrap();
        let foil = uniformize(&scenario(), &config).unwrap();
        let pts = foil.points();

        assert_eq!(pts.len(), 4);
        assert_abs_diff_eq!(pts[0].x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[3].x, 1.0, epsilon = 1e-9);

        // The leading edge is an interior sample near the curve midpoint
        let (argmin, min) = pts
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.x))
            .fold((0, f64::INFINITY), |acc, (i, x)| if x < acc.1 { (i, x) } else { acc });
        assert_abs_diff_eq!(min, 0.0, epsilon = 1e-9);
        assert_eq!(argmin, 1);

        assert_y_within_input_range(pts, 0.01);
    }

    #[test]
    fn test_chord_does_not_depend_on_sample_placement() {
        // Plain cosine spacing puts no sample near the leading edge at n = 4
        let config = UniformizeConfig::new(4, 3, 0.0, Spacing::Cosine).unwrap();
        let foil = uniformize(&scenario(), &config).unwrap();
        let pts = foil.points();

        assert_abs_diff_eq!(pts[0].x, 1.0, epsilon = 1e-9);
        assert!(pts[1].x > 0.3 && pts[2].x > 0.3, "{:?}", pts);
        assert_y_within_input_range(pts, 0.01);
    }

    #[test]
    fn test_fit_curve_interpolates_raw_points() {
        let raw = scenario();
        let config = UniformizeConfig::default();
        let curve = fit_curve(&raw, &config).unwrap();
        let params = chord_length_parameters(raw.points(), config.tolerance()).unwrap();
        for (q, &t) in raw.points().iter().zip(&params) {
            assert!(curve.point_at(t).distance(*q) < 1e-9);
        }
    }

    #[test]
    fn test_configured_tolerance_collapses_near_duplicates() {
        let raw = RawAirfoil::new(
            "near-duplicate",
            vec![
                dvec2(1.0, 0.0),
                dvec2(0.5, 0.05),
                dvec2(0.5 + 5e-7, 0.05),
                dvec2(0.0, 0.0),
                dvec2(0.5, -0.03),
                dvec2(1.0, 0.0),
            ],
        )
        .unwrap();

        let strict = fit_curve(&raw, &UniformizeConfig::default()).unwrap();
        assert_eq!(strict.control_points.len(), 6);

        let loose = UniformizeConfig::default()
            .with_tolerance(Tolerance {
                linear: 1e-6,
                ..Tolerance::default()
            })
            .unwrap();
        assert_eq!(fit_curve(&raw, &loose).unwrap().control_points.len(), 5);
        assert_eq!(uniformize(&raw, &loose).unwrap().len(), loose.n_points());
    }

    #[test]
    fn test_short_input_lowers_degree() {
        let raw = RawAirfoil::new(
            "three",
            vec![dvec2(1.0, 0.0), dvec2(0.0, 0.05), dvec2(1.0, -0.01)],
        )
        .unwrap();
        let curve = fit_curve(&raw, &UniformizeConfig::default()).unwrap();
        assert_eq!(curve.degree, 2);

        let foil = uniformize(&raw, &UniformizeConfig::default()).unwrap();
        assert_eq!(foil.len(), UniformizeConfig::DEFAULT_N_POINTS);
    }

    #[test]
    fn test_vertical_input_is_fit_error() {
        let raw = RawAirfoil::new(
            "vertical",
            vec![dvec2(0.0, 0.0), dvec2(0.0, 0.1), dvec2(0.0, 0.2), dvec2(0.0, 0.3)],
        )
        .unwrap();
        let err = uniformize(&raw, &UniformizeConfig::default()).unwrap_err();
        assert!(err.is_fit(), "{}", err);
    }

    #[test]
    fn test_normalize_chord() {
        let pts = [dvec2(2.0, 0.0), dvec2(1.0, 0.5), dvec2(3.0, -0.5)];
        let out = normalize_chord(&pts, 1.0, 2.0, Tolerance::default()).unwrap();
        assert_eq!(out, vec![dvec2(0.5, 0.0), dvec2(0.0, 0.25), dvec2(1.0, -0.25)]);
    }

    #[test]
    fn test_normalize_rejects_nan_and_zero_chord() {
        let pts = [dvec2(2.0, 0.0), dvec2(f64::NAN, 0.5)];
        assert!(normalize_chord(&pts, 0.0, 2.0, Tolerance::default()).unwrap_err().is_fit());
        let pts = [dvec2(2.0, 0.0), dvec2(2.0, 0.5)];
        assert!(normalize_chord(&pts, 2.0, 0.0, Tolerance::default()).unwrap_err().is_fit());
    }

    #[test]
    fn test_uniformizer_reuses_config() {
        let config = UniformizeConfig::new(10, 3, 0.0, Spacing::Uniform).unwrap();
        let uniformizer = Uniformizer::new(config);
        assert_eq!(uniformizer.config().n_points(), 10);
        assert_eq!(uniformizer.run(&scenario()).unwrap().len(), 10);
        assert_eq!(uniformizer.fit(&scenario()).unwrap().degree, 3);
    }
}
