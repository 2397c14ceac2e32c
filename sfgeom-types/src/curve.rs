//! Curve geometries that are not plain point sequences: compound curves and polygons bounded by
//! arbitrary curves.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::geometry::{Geometry, GeometryNode};
use crate::kind::GeometryKind;
use crate::line_string::LineString;
use crate::polygon::Polygon;

/// Chain of line strings and circular strings, the end of each segment being the start of the next
/// one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundCurve {
    has_z: bool,
    has_m: bool,
    segments: Vec<LineString>,
}

impl CompoundCurve {
    /// Creates a curve with no segments.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            segments: vec![],
        }
    }

    /// Creates a curve with the given dimensionality and segments.
    pub fn with_segments(has_z: bool, has_m: bool, segments: Vec<LineString>) -> Self {
        Self {
            has_z,
            has_m,
            segments,
        }
    }

    /// Creates a curve taking the dimensionality that all `segments` share.
    pub fn from_segments(segments: Vec<LineString>) -> Self {
        let dimensions = Dimensions::common(segments.iter().map(GeometryNode::dimensions));
        Self::with_segments(dimensions.has_z(), dimensions.has_m(), segments)
    }

    /// Segments in order.
    pub fn segments(&self) -> &[LineString] {
        &self.segments
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: LineString) {
        self.segments.push(segment);
    }

    /// Consumes the curve and returns its segments.
    pub fn into_segments(self) -> Vec<LineString> {
        self.segments
    }
}

impl GeometryNode for CompoundCurve {
    fn kind(&self) -> GeometryKind {
        GeometryKind::CompoundCurve
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Any geometry of the `Curve` family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// Line string or circular string.
    LineString(LineString),
    /// Compound curve.
    CompoundCurve(CompoundCurve),
}

impl Curve {
    /// Converts a geometry into a curve, returning the geometry back if it is not one.
    pub fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        match geometry {
            Geometry::LineString(v) => Ok(Self::LineString(v)),
            Geometry::CompoundCurve(v) => Ok(Self::CompoundCurve(v)),
            other => Err(other),
        }
    }
}

impl GeometryNode for Curve {
    fn kind(&self) -> GeometryKind {
        match self {
            Curve::LineString(v) => v.kind(),
            Curve::CompoundCurve(v) => v.kind(),
        }
    }

    fn has_z(&self) -> bool {
        match self {
            Curve::LineString(v) => v.has_z(),
            Curve::CompoundCurve(v) => v.has_z(),
        }
    }

    fn has_m(&self) -> bool {
        match self {
            Curve::LineString(v) => v.has_m(),
            Curve::CompoundCurve(v) => v.has_m(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Curve::LineString(v) => v.is_empty(),
            Curve::CompoundCurve(v) => v.is_empty(),
        }
    }
}

impl From<LineString> for Curve {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<CompoundCurve> for Curve {
    fn from(value: CompoundCurve) -> Self {
        Self::CompoundCurve(value)
    }
}

impl From<Curve> for Geometry {
    fn from(value: Curve) -> Self {
        match value {
            Curve::LineString(v) => Geometry::LineString(v),
            Curve::CompoundCurve(v) => Geometry::CompoundCurve(v),
        }
    }
}

/// Surface bounded by an exterior curve ring and zero or more interior curve rings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePolygon {
    has_z: bool,
    has_m: bool,
    rings: Vec<Curve>,
}

impl CurvePolygon {
    /// Creates a curve polygon with no rings.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            rings: vec![],
        }
    }

    /// Creates a curve polygon with the given dimensionality and rings.
    pub fn with_rings(has_z: bool, has_m: bool, rings: Vec<Curve>) -> Self {
        Self {
            has_z,
            has_m,
            rings,
        }
    }

    /// Creates a curve polygon taking the dimensionality that all `rings` share.
    pub fn from_rings(rings: Vec<Curve>) -> Self {
        let dimensions = Dimensions::common(rings.iter().map(GeometryNode::dimensions));
        Self::with_rings(dimensions.has_z(), dimensions.has_m(), rings)
    }

    /// All rings starting with the exterior one.
    pub fn rings(&self) -> &[Curve] {
        &self.rings
    }

    /// Appends a ring.
    pub fn push(&mut self, ring: Curve) {
        self.rings.push(ring);
    }

    /// Consumes the polygon and returns its rings.
    pub fn into_rings(self) -> Vec<Curve> {
        self.rings
    }
}

impl GeometryNode for CurvePolygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::CurvePolygon
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

impl From<Polygon> for CurvePolygon {
    fn from(value: Polygon) -> Self {
        let (has_z, has_m) = (value.has_z(), value.has_m());
        Self::with_rings(
            has_z,
            has_m,
            value.into_rings().into_iter().map(Curve::LineString).collect(),
        )
    }
}
