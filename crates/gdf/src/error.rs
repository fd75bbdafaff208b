//! Error types for GDF decoding and encoding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::schema::Section;
use crate::model::DeclaredType;

/// Error categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: the source or destination could not be read or written
    File,
    /// E002: malformed header, row, or value
    Format,
    /// E003: edge rows disagree on directedness
    AmbiguousTopology,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::File => "E001",
            ErrorCode::Format => "E002",
            ErrorCode::AmbiguousTopology => "E003",
        }
    }
}

/// The text could not be interpreted as GDF.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("missing section marker {marker:?}")]
    MissingSection { marker: &'static str },

    #[error("{section} header: column {position} has an empty name")]
    EmptyColumnName { section: Section, position: usize },

    #[error("{section} header: column {name:?} is declared twice")]
    DuplicateColumn { section: Section, name: String },

    #[error("nodedef header has no \"name\" column")]
    MissingIdentifierColumn,

    #[error("edgedef header needs source and target columns, found {found} column(s)")]
    MissingEndpointColumns { found: usize },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{section} row {row} (line {line}): quoted value is never closed")]
    UnterminatedQuote {
        section: Section,
        row: usize,
        line: usize,
    },

    #[error("{section} row {row} (line {line}): stray {quote:?} in cell {cell}")]
    UnexpectedQuote {
        section: Section,
        row: usize,
        line: usize,
        cell: usize,
        quote: char,
    },

    #[error("{section} row {row} (line {line}): cell {cell} is quoted with {found:?} but the file is read with {expected:?}")]
    MismatchedQuote {
        section: Section,
        row: usize,
        line: usize,
        cell: usize,
        expected: char,
        found: char,
    },

    #[error("{section} row {row} (line {line}): expected at most {expected} fields, found {found}")]
    TooManyFields {
        section: Section,
        row: usize,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("rows could not be parsed with ' quoting ({single}) nor with \" quoting ({double})")]
    Unquotable {
        single: Box<FormatError>,
        double: Box<FormatError>,
    },

    #[error("{section} row {row} (line {line}): column {column:?} expects {expected}, found {value:?}")]
    Coercion {
        section: Section,
        row: usize,
        line: usize,
        column: String,
        expected: DeclaredType,
        value: String,
    },

    #[error("{section} row {row} (line {line}): identifier column {column:?} is empty")]
    MissingIdentifier {
        section: Section,
        row: usize,
        line: usize,
        column: String,
    },

    #[error("input is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidUtf8 { offset: usize },

    #[error("zstd decompression failed: {0}")]
    DecompressionFailed(String),
}

/// Error returned by every decode and encode operation.
#[derive(Debug, Error)]
pub enum GdfError {
    #[error("[E001] cannot access {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[E001] i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("[E002] {0}")]
    Format(#[from] FormatError),

    #[error("[E003] edge row {row} has directed={found} but earlier rows have directed={expected}; mixed directed and undirected edges are not supported")]
    AmbiguousTopology {
        row: usize,
        expected: bool,
        found: bool,
    },
}

impl GdfError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GdfError::File { .. } | GdfError::Io(_) => ErrorCode::File,
            GdfError::Format(_) => ErrorCode::Format,
            GdfError::AmbiguousTopology { .. } => ErrorCode::AmbiguousTopology,
        }
    }

    /// Returns the format error, if this is one.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            GdfError::Format(e) => Some(e),
            _ => None,
        }
    }
}
