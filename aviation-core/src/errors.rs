use std::path::PathBuf;
use thiserror::Error;

/// Error type for data read-in and interpolation failures.
#[derive(Error, Debug)]
pub enum AviationError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}:{line}: {message}")]
    Table {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("unknown TIAM region code '{0}'")]
    UnknownRegion(String),
    #[error("year {year} is outside the modelled range {start}-{end}")]
    YearOutOfRange { year: i32, start: i32, end: i32 },
    #[error("no price data for year {0}")]
    MissingPrice(i32),
    #[error("interpolation axis must be ascending with at least two points, got {0:?}")]
    InvalidAxis(Vec<f64>),
    #[error("{name} index {index} is outside the grid dimension (0..{bound})")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        bound: usize,
    },
    #[error("invalid run configuration: {0}")]
    Config(String),
}

impl AviationError {
    /// Attach file/line context to a table-level parse failure.
    pub(crate) fn table(path: &std::path::Path, line: usize, message: impl Into<String>) -> Self {
        AviationError::Table {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

/// Convenience type for `Result<T, AviationError>`.
pub type AviationResult<T> = Result<T, AviationError>;
