//! Well-Known Binary format.
//!
//! Every geometry node starts with a byte order marker and a 4-byte type code (see
//! [`sfgeom_types::type_code`]) followed by a kind specific payload. The marker applies to the node
//! it starts, so sub-geometries can use a different byte order than their container.
//!
//! Type codes with the `0x80000000` bit set are the legacy 2.5D encoding: the bit stands for Z
//! ordinates and the rest of the code is a plain kind ordinal. Such codes are accepted by the
//! reader but never written.

use serde::{Deserialize, Serialize};
use sfgeom_types::{Geometry, GeometryKind};

use crate::error::CodecError;

mod cursor;
mod reader;
mod writer;

pub use cursor::{ByteCursor, OrderGuard};
pub use reader::WkbReader;
pub use writer::WkbWriter;

/// Flag of the legacy 2.5D type codes.
pub const LEGACY_Z_FLAG: u32 = 0x8000_0000;

/// Byte order of multi-byte values.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most significant byte first (XDR, network order).
    #[default]
    BigEndian,
    /// Least significant byte first (NDR).
    LittleEndian,
}

impl ByteOrder {
    /// Value of the byte order marker.
    pub fn marker(self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Byte order denoted by a marker value.
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0 => Some(ByteOrder::BigEndian),
            1 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

/// Decodes a geometry. Bytes after the end of the geometry are ignored.
pub fn decode(bytes: &[u8]) -> Result<Geometry, CodecError> {
    WkbReader::default()
        .read(bytes)?
        .ok_or(CodecError::Discarded)
}

/// Decodes a geometry that must be an instance of `expected`.
pub fn decode_typed(bytes: &[u8], expected: GeometryKind) -> Result<Geometry, CodecError> {
    WkbReader::default()
        .read_typed(bytes, expected)?
        .ok_or(CodecError::Discarded)
}

/// Encodes a geometry in big endian byte order.
pub fn encode(geometry: &Geometry) -> Result<Vec<u8>, CodecError> {
    WkbWriter::default().encode(geometry)
}

/// Encodes a geometry in the given byte order.
pub fn encode_with_order(geometry: &Geometry, order: ByteOrder) -> Result<Vec<u8>, CodecError> {
    WkbWriter::new(order).encode(geometry)
}
