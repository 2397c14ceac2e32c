//! Geometry model of the OGC Simple Features specification.
//!
//! The crate provides the tree of geometry nodes ([`Geometry`] and the node types it is built of),
//! the closed set of [geometry kinds](GeometryKind) with their subtype hierarchy, and the numeric
//! [type codes](type_code) used by the binary format. Every node carries optional Z (elevation) and
//! M (linear reference) ordinates, fixed at construction.
//!
//! Reading and writing the Well-Known Binary and Well-Known Text formats is done by the
//! `sfgeom-codec` crate. The [`filter`] module defines the hook through which a decoder prunes
//! unwanted points and sub-geometries.
//!
//! The [`cartesian`] module contains planar algorithms consuming a finished tree:
//! [envelopes](Envelope), centroids and a simplicity test for polygon boundaries.

mod collection;
mod curve;
mod dimensions;
mod envelope;
mod geometry;
mod geometry_collection;
mod kind;
mod line_string;
mod point;
mod polygon;
mod polyhedral_surface;

pub mod cartesian;
pub mod error;
pub mod filter;
pub mod type_code;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use collection::{
    Collection, GeometryElement, MultiElement, MultiLineString, MultiPoint, MultiPolygon,
};
pub use curve::{CompoundCurve, Curve, CurvePolygon};
pub use dimensions::Dimensions;
pub use envelope::Envelope;
pub use geometry::{Geometry, GeometryNode};
pub use geometry_collection::{Capabilities, GeometryCollection};
pub use kind::GeometryKind;
pub use line_string::LineString;
pub use point::Point;
pub use polygon::Polygon;
pub use polyhedral_surface::PolyhedralSurface;
