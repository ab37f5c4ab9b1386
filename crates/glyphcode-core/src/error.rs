//! Error types for glyphcode-core
//!
//! Recognition-side negative outcomes (a pattern failing to match, a rope
//! orientation mismatch) are *not* errors and are expressed as `Option` /
//! `bool` results; this type covers genuine misuse of the core API and
//! invalid data reaching it.

use thiserror::Error;

/// glyphcode-core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid bitmap dimensions
    #[error("invalid bitmap dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Pixel buffer length does not match the declared dimensions
    #[error("pixel buffer has {len} bytes, expected {expected}")]
    BufferSizeMismatch { len: usize, expected: usize },

    /// A chaincode failed its structural invariants
    #[error("inconsistent chaincode: {0}")]
    InconsistentChaincode(String),

    /// Invalid scale coefficient
    #[error("invalid scale coefficient: {0}")]
    InvalidScale(f64),
}

/// Result type alias for glyphcode-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
