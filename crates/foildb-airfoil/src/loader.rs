//! Coordinate loader for Selig-format airfoil files.
//!
//! A file holds an optional free-form name on its first line followed by one
//! `x y` pair per line, traversing trailing edge, upper surface, leading
//! edge, lower surface and back to the trailing edge.

use std::fs;
use std::path::Path;

use foildb_core::{FoilError, Result, Tolerance};
use foildb_math::{dvec2, Point2};
use tracing::debug;

use crate::airfoil::RawAirfoil;

/// Classification of a single text line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineRecord {
    Blank,
    Point(Point2),
    /// Not a coordinate pair; carries the reason.
    Malformed(String),
}

/// Classify one line as blank, a coordinate pair, or malformed.
pub fn classify_line(line: &str) -> LineRecord {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => LineRecord::Blank,
        [x, y] => match (parse_coordinate(x), parse_coordinate(y)) {
            (Ok(x), Ok(y)) => LineRecord::Point(dvec2(x, y)),
            (Err(reason), _) | (_, Err(reason)) => LineRecord::Malformed(reason),
        },
        other => LineRecord::Malformed(format!("expected 2 numbers, found {} fields", other.len())),
    }
}

fn parse_coordinate(token: &str) -> std::result::Result<f64, String> {
    let value: f64 = token
        .parse()
        .map_err(|_| format!("'{}' is not a number", token))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not finite", token))
    }
}

/// Drop each point that coincides with its predecessor within `tol`.
pub fn collapse_consecutive_duplicates(points: Vec<Point2>, tol: Tolerance) -> Vec<Point2> {
    let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        match kept.last() {
            Some(&prev) if tol.is_zero(prev.distance(p)) => {}
            _ => kept.push(p),
        }
    }
    kept
}

/// Parse the text of a coordinate file into a [`RawAirfoil`].
///
/// The first non-blank line is taken as the airfoil name when it is not a
/// coordinate pair; otherwise `name_hint` names the airfoil. Every other
/// line that is not a coordinate pair is an error, and all of them are
/// reported together. A leading byte order mark is ignored.
pub fn parse_coordinates(name_hint: &str, text: &str) -> Result<RawAirfoil> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut name = None;
    let mut points = Vec::new();
    let mut errors = Vec::new();
    let mut seen_content = false;

    for (idx, line) in text.lines().enumerate() {
        match classify_line(line) {
            LineRecord::Blank => continue,
            LineRecord::Point(p) => points.push(p),
            LineRecord::Malformed(_) if !seen_content => name = Some(line.trim().to_string()),
            LineRecord::Malformed(reason) => errors.push(format!("line {}: {}", idx + 1, reason)),
        }
        seen_content = true;
    }

    if !errors.is_empty() {
        return Err(FoilError::Parse(format!(
            "{} malformed line(s): {}",
            errors.len(),
            errors.join("; ")
        )));
    }

    let name = name.unwrap_or_else(|| name_hint.to_string());
    let parsed = points.len();
    let points = collapse_consecutive_duplicates(points, Tolerance::default());
    if points.len() < RawAirfoil::MIN_POINTS {
        return Err(FoilError::Parse(format!(
            "'{}' has {} distinct points, need at least {}",
            name,
            points.len(),
            RawAirfoil::MIN_POINTS
        )));
    }

    debug!(
        name = %name,
        points = points.len(),
        collapsed = parsed - points.len(),
        "Parsed airfoil coordinates"
    );
    RawAirfoil::new(name, points)
}

/// Read and parse a coordinate file. The file stem names airfoils without
/// a header line.
pub fn load_file(path: impl AsRef<Path>) -> Result<RawAirfoil> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| FoilError::from(e).in_file(path))?;
    let hint = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_coordinates(&hint, &text).map_err(|e| e.in_file(path))
}
