//! Homogeneous collections: `MultiPoint`, `MultiLineString` and `MultiPolygon`.
//!
//! All of them are represented by the generic [`Collection`] type, parameterized by the element
//! type. Elements must be instances of the element kind ([`GeometryElement::KIND`]), e.g. a multi
//! line string may hold circular strings, since a circular string is a line string.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::dimensions::Dimensions;
use crate::geometry::{Geometry, GeometryNode};
use crate::kind::GeometryKind;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

/// A geometry type that can be stored as an element of a typed container.
pub trait GeometryElement: GeometryNode + Into<Geometry> + Sized {
    /// Kind every element must be an instance of.
    const KIND: GeometryKind;

    /// Converts a geometry into the element type, returning the geometry back if it is of a
    /// different kind.
    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry>;
}

impl GeometryElement for Point {
    const KIND: GeometryKind = GeometryKind::Point;

    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        match geometry {
            Geometry::Point(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl GeometryElement for LineString {
    const KIND: GeometryKind = GeometryKind::LineString;

    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        match geometry {
            Geometry::LineString(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl GeometryElement for Polygon {
    const KIND: GeometryKind = GeometryKind::Polygon;

    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        match geometry {
            Geometry::Polygon(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl GeometryElement for Curve {
    const KIND: GeometryKind = GeometryKind::Curve;

    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        Curve::try_from_geometry(geometry)
    }
}

impl GeometryElement for Geometry {
    const KIND: GeometryKind = GeometryKind::Geometry;

    fn try_from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        Ok(geometry)
    }
}

/// Element types that have a dedicated multi-geometry kind.
pub trait MultiElement: GeometryElement {
    /// Kind of the collection of such elements.
    const COLLECTION_KIND: GeometryKind;
}

impl MultiElement for Point {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPoint;
}

impl MultiElement for LineString {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiLineString;
}

impl MultiElement for Polygon {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPolygon;
}

/// Ordered set of geometries of the same element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<E> {
    has_z: bool,
    has_m: bool,
    elements: Vec<E>,
}

/// A set of points.
pub type MultiPoint = Collection<Point>;
/// A set of line strings.
pub type MultiLineString = Collection<LineString>;
/// A set of polygons.
pub type MultiPolygon = Collection<Polygon>;

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl<E> Collection<E> {
    /// Creates an empty collection.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            elements: vec![],
        }
    }

    /// Creates a collection with the given dimensionality and elements.
    pub fn with_elements(has_z: bool, has_m: bool, elements: Vec<E>) -> Self {
        Self {
            has_z,
            has_m,
            elements,
        }
    }

    /// Elements of the collection.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Appends an element.
    pub fn push(&mut self, element: E) {
        self.elements.push(element);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &'_ E> {
        self.elements.iter()
    }

    /// Consumes the collection returning its elements.
    pub fn into_elements(self) -> Vec<E> {
        self.elements
    }
}

impl<E: GeometryNode> Collection<E> {
    /// Creates a collection taking the dimensionality that all `elements` share.
    pub fn from_elements(elements: Vec<E>) -> Self {
        let dimensions = Dimensions::common(elements.iter().map(GeometryNode::dimensions));
        Self::with_elements(dimensions.has_z(), dimensions.has_m(), elements)
    }
}

impl<E: MultiElement> GeometryNode for Collection<E> {
    fn kind(&self) -> GeometryKind {
        E::COLLECTION_KIND
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<E: GeometryNode> From<Vec<E>> for Collection<E> {
    fn from(value: Vec<E>) -> Self {
        Self::from_elements(value)
    }
}

impl<E: GeometryNode> FromIterator<E> for Collection<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_kinds() {
        let points: MultiPoint = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(points.kind(), GeometryKind::MultiPoint);
        assert_eq!(points.len(), 2);

        let lines = MultiLineString::new(true, false);
        assert_eq!(lines.kind(), GeometryKind::MultiLineString);
        assert!(lines.is_empty());
        assert!(lines.has_z());

        assert_eq!(MultiPolygon::default().kind(), GeometryKind::MultiPolygon);
    }

    #[test]
    fn element_conversion() {
        let geometry = Geometry::Point(Point::new(1.0, 2.0));
        assert!(LineString::try_from_geometry(geometry.clone()).is_err());
        assert_eq!(
            Point::try_from_geometry(geometry).unwrap(),
            Point::new(1.0, 2.0)
        );

        let circular = LineString::new_circular(false, false);
        assert!(circular.kind().is_a(LineString::KIND));
    }
}
