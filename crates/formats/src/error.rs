use std::path::PathBuf;

/// Problems with the content of a GeoJSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    InvalidJson(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
    Empty,
    MissingContour { index: usize },
    InvalidContour { index: usize, value: String },
    UnexpectedGeometry {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    UnsupportedCrs(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::InvalidJson(msg) => write!(f, "JSON parse error: {msg}"),
            DataError::NotAFeatureCollection => write!(f, "expected GeoJSON FeatureCollection"),
            DataError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
            DataError::Empty => write!(f, "feature collection is empty"),
            DataError::MissingContour { index } => {
                write!(f, "feature at index {index} has no contour attribute")
            }
            DataError::InvalidContour { index, value } => {
                write!(f, "feature at index {index} has invalid contour {value}")
            }
            DataError::UnexpectedGeometry {
                index,
                expected,
                found,
            } => write!(
                f,
                "feature at index {index} has {found} geometry, expected {expected}"
            ),
            DataError::UnsupportedCrs(name) => write!(f, "unsupported CRS: {name}"),
        }
    }
}

impl std::error::Error for DataError {}

#[derive(Debug)]
pub enum LoadErrorKind {
    Io(std::io::Error),
    Data(DataError),
}

/// A data file that could not be turned into a collection.
#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self {
            path: path.into(),
            kind: LoadErrorKind::Io(err),
        }
    }

    pub fn data(path: impl Into<PathBuf>, err: DataError) -> Self {
        Self {
            path: path.into(),
            kind: LoadErrorKind::Data(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(&self.kind, LoadErrorKind::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            LoadErrorKind::Io(err) => write!(f, "failed to read {}: {err}", self.path.display()),
            LoadErrorKind::Data(err) => write!(f, "invalid data in {}: {err}", self.path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LoadErrorKind::Io(err) => Some(err),
            LoadErrorKind::Data(err) => Some(err),
        }
    }
}
