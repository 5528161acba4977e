//! Unified error hierarchy for bithash.
//!
//! Mirrors the conventions used throughout the crate: one
//! `thiserror`-derived enum, no silent recovery, dimension mismatches and
//! out-of-range indexing treated as caller programming errors.

use thiserror::Error;

/// Convenience alias for crate-internal results.
pub type Result<T> = std::result::Result<T, Error>;

/// The unified bithash error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid indexer configuration (`B` out of `[1, 32]`, or `D < 1`).
    #[error("invalid config: {0}")]
    Config(String),

    /// A vector's length did not match the indexer's configured dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension supplied.
        actual: usize,
    },

    /// A `BitKey` operation indexed a bit position `>= size`.
    #[error("bit index {index} out of range for key of size {size}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The key's bit width.
        size: usize,
    },

    /// `BitKey::parse` encountered a character other than `'0'`, `'1'`, or `' '`.
    #[error("invalid character in bitkey string: {0:?}")]
    ParseError(char),

    /// A serialized distance tag was not recognized.
    #[error("unknown distance tag: {0:?}")]
    UnknownDistance(String),

    /// Encoding the indexer to its opaque blob form failed.
    #[error("encode failed: {0}")]
    Encode(postcard::Error),

    /// Decoding the indexer from its opaque blob form failed.
    #[error("decode failed: {0}")]
    Decode(postcard::Error),
}
