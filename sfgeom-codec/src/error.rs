//! Error type used by the crate.

use sfgeom_types::error::GeometryError;
use sfgeom_types::GeometryKind;
use thiserror::Error;

/// Error of reading or writing a geometry in any of the supported formats.
///
/// Offsets are byte offsets into the binary input, or byte offsets of the offending token in the
/// text input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended in the middle of a value.
    #[error("unexpected end of input at offset {offset}, {needed} more bytes needed")]
    Truncated {
        /// Offset of the incomplete value.
        offset: usize,
        /// Number of bytes missing.
        needed: usize,
    },
    /// Byte order marker other than 0 or 1.
    #[error("invalid byte order marker {value} at offset {offset}")]
    InvalidByteOrder {
        /// Offset of the marker.
        offset: usize,
        /// Marker value.
        value: u8,
    },
    /// Type code or keyword that does not denote a concrete geometry kind.
    #[error("invalid geometry type at offset {offset}: {source}")]
    Kind {
        /// Offset of the type code or keyword.
        offset: usize,
        /// Underlying error.
        source: GeometryError,
    },
    /// Element count below zero.
    #[error("negative element count {count} at offset {offset}")]
    NegativeCount {
        /// Offset of the count.
        offset: usize,
        /// Value read.
        count: i32,
    },
    /// Geometry is not of the kind required by the caller or by its container.
    #[error("unexpected geometry type at offset {offset}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Offset of the type code or keyword.
        offset: usize,
        /// Required kind.
        expected: GeometryKind,
        /// Kind found.
        actual: GeometryKind,
    },
    /// Text input violating the grammar.
    #[error("malformed input at offset {offset}: expected {expected}, found `{found}`")]
    MalformedToken {
        /// Offset of the token.
        offset: usize,
        /// Description of what was expected.
        expected: String,
        /// Token found, empty at the end of input.
        found: String,
    },
    /// Geometries are nested deeper than the reader allows.
    #[error("geometry nesting exceeds the limit of {0} levels")]
    DepthLimitExceeded(usize),
    /// Number of elements cannot be represented as a 32-bit count.
    #[error("element count {0} does not fit into the binary format")]
    CountOverflow(usize),
    /// The whole geometry was rejected by the reader's filter.
    #[error("geometry was discarded by the filter")]
    Discarded,
}
