//! Error types for TOON decoding and value construction.
//!
//! Decoding surfaces the first error encountered and abandons parsing;
//! partial values are never returned. Each variant carries the position
//! metadata available at the failure site (1-based line numbers, 1-based
//! columns where known).
//!
//! Encoding a well-formed [`Value`](crate::Value) cannot fail, so there is no
//! encode-side error; an internal invariant violation in the encoder is a
//! programmer error and panics.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, Error};
//!
//! match decode("[5]: 1,2,3") {
//!     Err(Error::CountMismatch { expected, actual, .. }) => {
//!         assert_eq!((expected, actual), (5, 3));
//!     }
//!     other => panic!("expected a count mismatch, got {other:?}"),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// All failure modes of TOON decoding, plus the carrier used by the serde
/// value-construction bridge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Decode input contained no non-blank line.
    #[error("input contains no non-blank line")]
    EmptyInput,

    /// Generic unrecoverable parse failure.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// Semantic violation, such as a tabular row whose cell count differs
    /// from the header's field count.
    #[error("validation error at line {line}: {message}")]
    Validation { message: String, line: usize },

    /// Unexpected indentation inside a tabular or list body.
    #[error("structure error at line {line}: {message}")]
    Structure { message: String, line: usize },

    /// Unknown escape sequence in a quoted string. Only `\\`, `\"`, `\n`,
    /// `\r`, and `\t` are recognized.
    #[error("invalid escape sequence '\\{sequence}' at line {line}, column {column}")]
    InvalidEscape {
        sequence: char,
        line: usize,
        column: usize,
    },

    /// A quoted string was not closed before the end of its line.
    #[error("unterminated quoted string at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// A strict-mode count check failed: the length declared in an array
    /// header does not match the number of parsed values, rows, or items.
    #[error("{context} at line {line} declares {expected} element(s) but contains {actual}")]
    CountMismatch {
        expected: usize,
        actual: usize,
        context: &'static str,
        line: usize,
    },

    /// A strict-mode indentation check failed.
    #[error("indentation error at line {line}: {message}")]
    Indentation { message: String, line: usize },

    /// A key was not followed by a colon.
    #[error("missing ':' after key at line {line}")]
    MissingColon { line: usize },

    /// Malformed array header.
    #[error("invalid array header at line {line}: {message}")]
    InvalidHeader { message: String, line: usize },

    /// Delimited values are not separated by the delimiter the enclosing
    /// header declared.
    #[error("line {line} is not separated by the declared {expected} delimiter")]
    DelimiterMismatch { expected: &'static str, line: usize },

    /// Error raised through the serde bridge while building a
    /// [`Value`](crate::Value) from a `Serialize` type.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn validation(message: impl Into<String>, line: usize) -> Self {
        Error::Validation {
            message: message.into(),
            line,
        }
    }

    pub(crate) fn structure(message: impl Into<String>, line: usize) -> Self {
        Error::Structure {
            message: message.into(),
            line,
        }
    }

    pub(crate) fn indentation(message: impl Into<String>, line: usize) -> Self {
        Error::Indentation {
            message: message.into(),
            line,
        }
    }

    pub(crate) fn invalid_header(message: impl Into<String>, line: usize) -> Self {
        Error::InvalidHeader {
            message: message.into(),
            line,
        }
    }

    /// The line number the error refers to, when one is known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. }
            | Error::Validation { line, .. }
            | Error::Structure { line, .. }
            | Error::InvalidEscape { line, .. }
            | Error::UnterminatedString { line, .. }
            | Error::CountMismatch { line, .. }
            | Error::Indentation { line, .. }
            | Error::MissingColon { line }
            | Error::InvalidHeader { line, .. }
            | Error::DelimiterMismatch { line, .. } => Some(*line),
            Error::EmptyInput | Error::Message(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

/// Alias for `std::result::Result` with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
