use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoilError {
    /// Malformed or insufficient raw coordinates.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The spline fit failed or produced non-finite values.
    #[error("Fit error: {0}")]
    Fit(String),

    /// Invalid uniformization configuration.
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Another error attributed to the file it came from.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<FoilError>,
    },
}

impl FoilError {
    /// Attach the offending file to this error.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        Self::File {
            path: path.as_ref().to_path_buf(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through any file context.
    pub fn root(&self) -> &FoilError {
        match self {
            Self::File { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.root(), Self::Parse(_))
    }

    pub fn is_fit(&self) -> bool {
        matches!(self.root(), Self::Fit(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self.root(), Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, FoilError>;
