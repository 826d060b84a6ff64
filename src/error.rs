// src/error.rs
use std::fmt;

/// Caller-side failures of a status query.
///
/// Unreachable servers are not errors: probes report them as offline records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// A required parameter (`game` or `ip`) was missing or empty.
    InvalidArgument(&'static str),
    UnsupportedGame(String),
    /// `returnType` named a field the resolved record does not carry.
    FieldUnavailable(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "Missing required parameter: {}", what),
            Self::UnsupportedGame(game) => write!(f, "Unsupported game: {}", game),
            Self::FieldUnavailable(field) => {
                write!(f, "Requested field {} is not available", field)
            }
        }
    }
}

impl std::error::Error for StatusError {}
