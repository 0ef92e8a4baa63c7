//! Error types for model conversion

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// A record could not be parsed. `line` is 1-based.
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style file {}: {source}", path.display())]
    Style {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConvertError {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        ConvertError::Parse { line, kind }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// Line number of a parse failure.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// What went wrong inside a single record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid coordinate {field:?}: {source}")]
    InvalidFloat {
        field: String,
        #[source]
        source: ParseFloatError,
    },

    /// `inf` and `NaN` parse as floats but have no C++ literal form.
    #[error("coordinate {field:?} is not a finite number")]
    NonFiniteFloat { field: String },

    #[error("invalid index {field:?}: {source}")]
    InvalidIndex {
        field: String,
        #[source]
        source: ParseIntError,
    },

    /// OBJ indices are 1-based, so 0 never names a vertex.
    #[error("index 0 in face group {group:?}")]
    ZeroIndex { group: String },

    #[error("face lists no indices")]
    EmptyFace,

    #[error("index {index} does not fit in {width}")]
    IndexOutOfRange { index: u64, width: &'static str },

    #[error("face declares {declared} indices but lists {found}")]
    IndexCountMismatch { declared: usize, found: usize },
}
