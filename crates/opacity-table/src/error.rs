//! Error types for opacity table construction.

use std::path::{Path, PathBuf};

use opacity_common::ChemistryError;
use thiserror::Error;
use xsec_parser::ParseError;

use crate::types::OpacityFormat;

/// Errors that abort construction of a molecule's opacity table.
///
/// All of them are static data problems; none is worth retrying.
#[derive(Error, Debug)]
pub enum OpacityError {
    /// Discovery found no folder for the requested molecule.
    #[error("no {format} dataset found for molecule '{molecule}'")]
    DatasetNotFound {
        molecule: String,
        format: OpacityFormat,
    },

    /// The molecule folder holds no file matching the sample pattern.
    #[error("no usable sample files in {}", .0.display())]
    NoSamples(PathBuf),

    /// A file's length or shape disagrees with the expected axis sizes.
    #[error("format mismatch in {}: {reason}", .path.display())]
    FormatMismatch { path: PathBuf, reason: String },

    /// A record-framed stream whose word count does not fit the framing.
    #[error("corrupt record stream in {}: {reason}", .path.display())]
    CorruptRecordStream { path: PathBuf, reason: String },

    /// Some (pressure, temperature) cells were never populated.
    #[error("incomplete grid for '{molecule}': {missing} of {expected} (pressure, temperature) cells have no sample")]
    IncompleteGrid {
        molecule: String,
        missing: usize,
        expected: usize,
    },

    /// Filesystem error.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Molecular weight lookup failed.
    #[error(transparent)]
    Chemistry(#[from] ChemistryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl OpacityError {
    /// Create a DatasetNotFound error.
    pub fn dataset_not_found(molecule: impl Into<String>, format: OpacityFormat) -> Self {
        Self::DatasetNotFound {
            molecule: molecule.into(),
            format,
        }
    }

    /// Create a FormatMismatch error.
    pub fn format_mismatch(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FormatMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Lift a decoder error into the taxonomy, attaching the file it came from.
    pub fn from_parse(path: &Path, err: ParseError) -> Self {
        match err {
            ParseError::CorruptRecordStream(reason) => Self::CorruptRecordStream {
                path: path.to_path_buf(),
                reason,
            },
            ParseError::FormatMismatch(reason) => Self::format_mismatch(path, reason),
            other => Self::format_mismatch(path, other.to_string()),
        }
    }
}

/// Result type for opacity table operations.
pub type Result<T> = std::result::Result<T, OpacityError>;
