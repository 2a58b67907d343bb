use std::path::PathBuf;

use thiserror::Error;

use crate::line::ParseLineError;

/// Errors that can occur while reading or ranking a BOM
#[derive(Debug, Error)]
pub enum BomError {
    #[error("failed to open BOM file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading BOM: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("top-N count {requested} exceeds the {available} unique parts in the BOM")]
    Validation { requested: usize, available: usize },

    #[error("no BOM file has been read yet")]
    NotPopulated,
}

/// Malformed BOM content
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("BOM is empty, expected a top-N count on the first line")]
    MissingCount,

    #[error("invalid top-N count {value:?} on the first line")]
    InvalidCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("error parsing BOM line {line_number}")]
    Line {
        line_number: usize,
        #[source]
        source: ParseLineError,
    },
}

/// Coarse classification of a [`BomError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Validation,
    NotPopulated,
}

impl BomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BomError::Open { .. } | BomError::Io(_) => ErrorKind::Io,
            BomError::Format(_) => ErrorKind::Format,
            BomError::Validation { .. } => ErrorKind::Validation,
            BomError::NotPopulated => ErrorKind::NotPopulated,
        }
    }
}
