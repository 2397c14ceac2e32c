//! Error type used by the crate.

use thiserror::Error;

use crate::kind::GeometryKind;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Kind ordinal outside of the known range.
    #[error("unsupported geometry type ordinal {ordinal}")]
    UnsupportedKind {
        /// Offending ordinal.
        ordinal: u32,
    },
    /// Abstract kind used where a concrete geometry is required.
    #[error("geometry type {0} is abstract and cannot be instantiated")]
    AbstractKind(GeometryKind),
    /// Type code with a dimensionality digit other than 0-3.
    #[error("invalid geometry type code {0}")]
    InvalidTypeCode(u32),
    /// A geometry is not of the kind the caller required.
    #[error("unexpected geometry type: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Required kind.
        expected: GeometryKind,
        /// Kind actually found.
        actual: GeometryKind,
    },
    /// Collection kind override that is not a collection of arbitrary geometries.
    #[error("{0} cannot be asserted as a collection type")]
    InvalidAssertedKind(GeometryKind),
}
