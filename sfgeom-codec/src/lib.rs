//! Readers and writers of the Well-Known Binary ([`wkb`]) and Well-Known Text ([`wkt`])
//! representations of Simple Features geometries.
//!
//! Both formats decode into the geometry tree of the `sfgeom-types` crate. The simplest entry
//! points are the `decode`, `decode_typed` and `encode` functions of each module:
//!
//! ```
//! use sfgeom_codec::{wkb, wkt};
//! use sfgeom_types::{GeometryKind, GeometryNode};
//!
//! let geometry = wkt::decode("POINT Z (10 10 5)").unwrap();
//! assert_eq!(geometry.kind(), GeometryKind::Point);
//! assert!(geometry.has_z());
//!
//! let bytes = wkb::encode(&geometry).unwrap();
//! assert_eq!(wkb::decode(&bytes).unwrap(), geometry);
//! assert_eq!(wkt::encode(&geometry), "POINT Z (10 10 5)");
//! ```
//!
//! Readers are configured with a [filter](sfgeom_types::filter::GeometryFilter) that prunes the
//! tree while it is decoded, and with a nesting limit protecting against stack exhaustion on
//! hostile input.

pub mod error;
pub mod wkb;
pub mod wkt;

pub use error::CodecError;

/// Nesting level limit used by the readers unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 128;
