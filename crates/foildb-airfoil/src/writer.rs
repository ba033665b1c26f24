//! Two-column text export of canonical airfoils.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use foildb_core::{FoilError, Result};

use crate::airfoil::UniformAirfoil;

/// One `x y` line per point in scientific notation, without a header.
pub fn format_airfoil(airfoil: &UniformAirfoil) -> String {
    airfoil
        .points()
        .iter()
        .map(|p| format!("{:.12e} {:.12e}\n", p.x, p.y))
        .collect()
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `airfoil` to `path`.
///
/// The text goes to a temporary sibling first and is renamed into place,
/// so `path` never holds a partial file.
pub fn write_airfoil(path: impl AsRef<Path>, airfoil: &UniformAirfoil) -> Result<()> {
    let path = path.as_ref();
    let tmp = temporary_sibling(path);

    let written = fs::write(&tmp, format_airfoil(airfoil)).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(FoilError::from(e).in_file(path));
    }
    Ok(())
}
