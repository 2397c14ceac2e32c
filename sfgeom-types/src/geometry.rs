use serde::{Deserialize, Serialize};

use crate::collection::{MultiLineString, MultiPoint, MultiPolygon};
use crate::curve::{CompoundCurve, Curve, CurvePolygon};
use crate::dimensions::Dimensions;
use crate::geometry_collection::GeometryCollection;
use crate::kind::GeometryKind;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::polyhedral_surface::PolyhedralSurface;

/// Common queries of every geometry node.
pub trait GeometryNode {
    /// Kind the node reports.
    fn kind(&self) -> GeometryKind;

    /// Whether the node carries Z ordinates.
    fn has_z(&self) -> bool;

    /// Whether the node carries M ordinates.
    fn has_m(&self) -> bool;

    /// Combined dimensionality flags.
    fn dimensions(&self) -> Dimensions {
        Dimensions::from_flags(self.has_z(), self.has_m())
    }

    /// Whether the node has no positions.
    fn is_empty(&self) -> bool;
}

impl GeometryNode for Point {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn has_z(&self) -> bool {
        Point::has_z(self)
    }

    fn has_m(&self) -> bool {
        Point::has_m(self)
    }

    fn is_empty(&self) -> bool {
        Point::is_empty(self)
    }
}

/// Any concrete geometry.
///
/// Some variants cover several kinds: [`Geometry::LineString`] is also used for circular strings,
/// [`Geometry::Polygon`] for triangles, [`Geometry::PolyhedralSurface`] for TINs and
/// [`Geometry::GeometryCollection`] for multi curves and multi surfaces. Use [`GeometryNode::kind`]
/// to get the exact kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Point.
    Point(Point),
    /// Line string or circular string.
    LineString(LineString),
    /// Polygon or triangle.
    Polygon(Polygon),
    /// Multi point.
    MultiPoint(MultiPoint),
    /// Multi line string.
    MultiLineString(MultiLineString),
    /// Multi polygon.
    MultiPolygon(MultiPolygon),
    /// Geometry collection, multi curve or multi surface.
    GeometryCollection(GeometryCollection),
    /// Compound curve.
    CompoundCurve(CompoundCurve),
    /// Curve polygon.
    CurvePolygon(CurvePolygon),
    /// Polyhedral surface or TIN.
    PolyhedralSurface(PolyhedralSurface),
}

macro_rules! dispatch {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            Geometry::Point($v) => $body,
            Geometry::LineString($v) => $body,
            Geometry::Polygon($v) => $body,
            Geometry::MultiPoint($v) => $body,
            Geometry::MultiLineString($v) => $body,
            Geometry::MultiPolygon($v) => $body,
            Geometry::GeometryCollection($v) => $body,
            Geometry::CompoundCurve($v) => $body,
            Geometry::CurvePolygon($v) => $body,
            Geometry::PolyhedralSurface($v) => $body,
        }
    };
}

impl GeometryNode for Geometry {
    fn kind(&self) -> GeometryKind {
        dispatch!(self, v => v.kind())
    }

    fn has_z(&self) -> bool {
        dispatch!(self, v => v.has_z())
    }

    fn has_m(&self) -> bool {
        dispatch!(self, v => v.has_m())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, v => GeometryNode::is_empty(v))
    }
}

impl Geometry {
    /// Iterates over all positions of the geometry, depth first in storage order.
    pub fn points(&self) -> Box<dyn Iterator<Item = &'_ Point> + '_> {
        match self {
            Geometry::Point(v) => Box::new(std::iter::once(v)),
            Geometry::LineString(v) => Box::new(v.points().iter()),
            Geometry::Polygon(v) => Box::new(polygon_points(v)),
            Geometry::MultiPoint(v) => Box::new(v.iter()),
            Geometry::MultiLineString(v) => Box::new(v.iter().flat_map(|l| l.points())),
            Geometry::MultiPolygon(v) => Box::new(v.iter().flat_map(polygon_points)),
            Geometry::GeometryCollection(v) => {
                Box::new(v.geometries().iter().flat_map(Geometry::points))
            }
            Geometry::CompoundCurve(v) => Box::new(v.segments().iter().flat_map(|l| l.points())),
            Geometry::CurvePolygon(v) => Box::new(v.rings().iter().flat_map(curve_points)),
            Geometry::PolyhedralSurface(v) => Box::new(v.faces().iter().flat_map(polygon_points)),
        }
    }

    /// Total number of positions.
    pub fn num_points(&self) -> usize {
        self.points().count()
    }

    /// Topological dimension: 0 for point kinds, 1 for curves, 2 for surfaces. A collection has the
    /// highest dimension of its elements (0 when empty).
    pub fn dimension(&self) -> u8 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_)
            | Geometry::MultiLineString(_)
            | Geometry::CompoundCurve(_) => 1,
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::CurvePolygon(_)
            | Geometry::PolyhedralSurface(_) => 2,
            Geometry::GeometryCollection(v) => v
                .geometries()
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(0),
        }
    }
}

fn polygon_points(polygon: &Polygon) -> impl Iterator<Item = &'_ Point> {
    polygon.rings().iter().flat_map(|r| r.points())
}

fn curve_points(curve: &Curve) -> Box<dyn Iterator<Item = &'_ Point> + '_> {
    match curve {
        Curve::LineString(v) => Box::new(v.points().iter()),
        Curve::CompoundCurve(v) => Box::new(v.segments().iter().flat_map(|l| l.points())),
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}

impl From<CompoundCurve> for Geometry {
    fn from(value: CompoundCurve) -> Self {
        Self::CompoundCurve(value)
    }
}

impl From<CurvePolygon> for Geometry {
    fn from(value: CurvePolygon) -> Self {
        Self::CurvePolygon(value)
    }
}

impl From<PolyhedralSurface> for Geometry {
    fn from(value: PolyhedralSurface) -> Self {
        Self::PolyhedralSurface(value)
    }
}
