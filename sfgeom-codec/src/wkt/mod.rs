//! Well-Known Text format.
//!
//! The reader accepts the keywords in any case, the dimensionality suffix either glued to the
//! keyword or as a separate word, bare coordinate lists in place of elements whose kind is implied
//! by their container, and the non-finite numbers `NaN`, `inf` and `-inf`. The writer produces a
//! single canonical spelling (see [`Wkt`]) that the reader turns back into an equal tree.

use sfgeom_types::{Geometry, GeometryKind};

use crate::error::CodecError;

mod reader;
mod tokenizer;
mod writer;

pub use reader::WktReader;
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use writer::Wkt;

/// Decodes a geometry.
pub fn decode(text: &str) -> Result<Geometry, CodecError> {
    WktReader::default().read(text)?.ok_or(CodecError::Discarded)
}

/// Decodes a geometry that must be an instance of `expected`.
pub fn decode_typed(text: &str, expected: GeometryKind) -> Result<Geometry, CodecError> {
    WktReader::default()
        .read_typed(text, expected)?
        .ok_or(CodecError::Discarded)
}

/// Encodes a geometry.
pub fn encode(geometry: &Geometry) -> String {
    Wkt(geometry).to_string()
}
