//! Geometry kinds and their place in the Simple Features type hierarchy.
//!
//! Three of the kinds ([`GeometryKind::Geometry`], [`GeometryKind::Curve`] and
//! [`GeometryKind::Surface`]) are abstract. They are never instantiated and only serve as
//! constraints on the elements a container accepts.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Closed enumeration of the Simple Features geometry kinds. The discriminant of every variant is
/// its ordinal, which is also the base of the numeric type code (see [`crate::type_code`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum GeometryKind {
    /// Abstract root of the hierarchy.
    Geometry = 0,
    /// Single position.
    Point = 1,
    /// Sequence of positions joined by straight segments.
    LineString = 2,
    /// Exterior ring with zero or more holes, all linear.
    Polygon = 3,
    /// Set of points.
    MultiPoint = 4,
    /// Set of line strings.
    MultiLineString = 5,
    /// Set of polygons.
    MultiPolygon = 6,
    /// Heterogeneous set of geometries.
    GeometryCollection = 7,
    /// Sequence of circular arcs, three positions per arc with shared endpoints.
    CircularString = 8,
    /// Chain of line strings and circular strings.
    CompoundCurve = 9,
    /// Surface bounded by arbitrary curves.
    CurvePolygon = 10,
    /// Set of curves.
    MultiCurve = 11,
    /// Set of surfaces.
    MultiSurface = 12,
    /// Abstract one-dimensional geometry.
    Curve = 13,
    /// Abstract two-dimensional geometry.
    Surface = 14,
    /// Set of polygonal faces sharing edges.
    PolyhedralSurface = 15,
    /// Triangulated irregular network.
    Tin = 16,
    /// Polygon with a single three-vertex ring.
    Triangle = 17,
}

impl GeometryKind {
    /// All kinds in ordinal order.
    pub const ALL: [GeometryKind; 18] = [
        GeometryKind::Geometry,
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
        GeometryKind::CircularString,
        GeometryKind::CompoundCurve,
        GeometryKind::CurvePolygon,
        GeometryKind::MultiCurve,
        GeometryKind::MultiSurface,
        GeometryKind::Curve,
        GeometryKind::Surface,
        GeometryKind::PolyhedralSurface,
        GeometryKind::Tin,
        GeometryKind::Triangle,
    ];

    /// Fixed ordinal of the kind (0-17).
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Looks up a kind by its ordinal.
    pub fn from_ordinal(ordinal: u32) -> Result<Self, GeometryError> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(GeometryError::UnsupportedKind { ordinal })
    }

    /// Returns true for the kinds that can never be instantiated.
    pub fn is_abstract(self) -> bool {
        matches!(
            self,
            GeometryKind::Geometry | GeometryKind::Curve | GeometryKind::Surface
        )
    }

    /// Returns `Err` for abstract kinds and `Ok(self)` otherwise.
    pub fn concrete(self) -> Result<Self, GeometryError> {
        if self.is_abstract() {
            Err(GeometryError::AbstractKind(self))
        } else {
            Ok(self)
        }
    }

    /// Direct supertype of the kind, `None` for [`GeometryKind::Geometry`].
    pub fn parent(self) -> Option<GeometryKind> {
        use GeometryKind::*;
        Some(match self {
            Geometry => return None,
            Point | GeometryCollection | Curve | Surface => Geometry,
            LineString | CompoundCurve => Curve,
            CircularString => LineString,
            CurvePolygon | PolyhedralSurface => Surface,
            Polygon => CurvePolygon,
            Triangle => Polygon,
            Tin => PolyhedralSurface,
            MultiPoint | MultiCurve | MultiSurface => GeometryCollection,
            MultiLineString => MultiCurve,
            MultiPolygon => MultiSurface,
        })
    }

    /// Returns true if a geometry of this kind can be used where `ancestor` is expected, i.e. the
    /// kinds are equal or `ancestor` is one of the supertypes of `self`.
    pub fn is_a(self, ancestor: GeometryKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }

        false
    }

    /// Returns true for line-like kinds.
    pub fn is_curve(self) -> bool {
        self.is_a(GeometryKind::Curve)
    }

    /// Returns true for area-like kinds.
    pub fn is_surface(self) -> bool {
        self.is_a(GeometryKind::Surface)
    }

    /// Returns true for the collection kinds.
    pub fn is_collection(self) -> bool {
        self.is_a(GeometryKind::GeometryCollection)
    }

    /// Upper-case keyword used for the kind in the text format.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Geometry => "GEOMETRY",
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
            GeometryKind::CircularString => "CIRCULARSTRING",
            GeometryKind::CompoundCurve => "COMPOUNDCURVE",
            GeometryKind::CurvePolygon => "CURVEPOLYGON",
            GeometryKind::MultiCurve => "MULTICURVE",
            GeometryKind::MultiSurface => "MULTISURFACE",
            GeometryKind::Curve => "CURVE",
            GeometryKind::Surface => "SURFACE",
            GeometryKind::PolyhedralSurface => "POLYHEDRALSURFACE",
            GeometryKind::Tin => "TIN",
            GeometryKind::Triangle => "TRIANGLE",
        }
    }

    /// Case-insensitive lookup by keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_match_position() {
        for (index, kind) in GeometryKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), index as u32);
            assert_eq!(GeometryKind::from_ordinal(index as u32).unwrap(), *kind);
        }

        assert!(GeometryKind::from_ordinal(18).is_err());
    }

    #[test]
    fn hierarchy() {
        assert!(GeometryKind::CircularString.is_a(GeometryKind::LineString));
        assert!(GeometryKind::CircularString.is_curve());
        assert!(GeometryKind::Triangle.is_a(GeometryKind::CurvePolygon));
        assert!(GeometryKind::Tin.is_surface());
        assert!(GeometryKind::MultiLineString.is_a(GeometryKind::MultiCurve));
        assert!(GeometryKind::MultiPolygon.is_a(GeometryKind::GeometryCollection));

        assert!(!GeometryKind::LineString.is_a(GeometryKind::CircularString));
        assert!(!GeometryKind::MultiCurve.is_curve());
        assert!(!GeometryKind::Point.is_collection());

        for kind in GeometryKind::ALL {
            assert!(kind.is_a(GeometryKind::Geometry));
        }
    }

    #[test]
    fn names() {
        assert_eq!(
            GeometryKind::from_name("multiPolygon"),
            Some(GeometryKind::MultiPolygon)
        );
        assert_eq!(GeometryKind::from_name("tin"), Some(GeometryKind::Tin));
        assert_eq!(GeometryKind::from_name("POINTZ"), None);
        assert_eq!(GeometryKind::CompoundCurve.to_string(), "COMPOUNDCURVE");
    }
}
