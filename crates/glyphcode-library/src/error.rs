//! Error types for glyphcode-library
//!
//! Corrupted framing is a recoverable condition here: every variant
//! carries enough context to point at the offending shelf or record.

use thiserror::Error;

/// glyphcode-library error type
#[derive(Error, Debug)]
pub enum LibraryError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong magic bytes at the head of a section
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    /// Structurally implausible data
    #[error("corrupted library data: {0}")]
    Corrupted(String),

    /// A loaded chaincode failed validation
    #[error("invalid chaincode in {context}: {source}")]
    InvalidChaincode {
        context: String,
        source: glyphcode_core::CoreError,
    },

    /// Saving a shelf that has no prototype bitmap attached
    #[error("shelf {0} has no prototype bitmap to save")]
    MissingPrototype(usize),
}

/// Result type alias for glyphcode-library operations
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
