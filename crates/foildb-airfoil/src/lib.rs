//! Airfoil coordinate database: loading raw archive files, fitting and
//! resampling them to a canonical point set, and exporting the result.

pub mod airfoil;
pub mod batch;
pub mod config;
pub mod loader;
pub mod uniformize;
pub mod writer;

pub use airfoil::{RawAirfoil, UniformAirfoil};
pub use batch::{uniformize_directory, BatchOptions, BatchReport, FileFailure};
pub use config::{Spacing, UniformizeConfig, UniformizeSettings};
pub use loader::{load_file, parse_coordinates};
pub use uniformize::{fit_curve, uniformize, Uniformizer};
pub use writer::{format_airfoil, write_airfoil};
