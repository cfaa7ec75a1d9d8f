// filepath: src/error.rs
use std::fmt;

/// Errors raised by sandbox operations.
///
/// None of these are fatal: the sandbox keeps accepting triggers after any of
/// them is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// Flat vertex list with an odd length or fewer than three vertices.
    MalformedPath { len: usize },
    /// No routine registered under this id.
    UnknownRoutine(String),
    InvalidConfig(String),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::MalformedPath { len } => write!(
                f,
                "malformed path: {} values, need an even count of at least 6",
                len
            ),
            DrawError::UnknownRoutine(id) => write!(f, "unknown routine: {}", id),
            DrawError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for DrawError {}
