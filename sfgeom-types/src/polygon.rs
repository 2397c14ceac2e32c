use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::geometry::GeometryNode;
use crate::kind::GeometryKind;
use crate::line_string::LineString;

/// Polygon geometry. Polygon consists of an exterior ring followed by zero or more interior rings
/// (holes).
///
/// The same type represents `Triangle`, a polygon restricted to a single ring of three distinct
/// vertices. Ring closure and triangle shape are not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    has_z: bool,
    has_m: bool,
    triangle: bool,
    rings: Vec<LineString>,
}

impl Polygon {
    /// Creates a polygon with no rings.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            triangle: false,
            rings: vec![],
        }
    }

    /// Creates a triangle with no rings.
    pub fn new_triangle(has_z: bool, has_m: bool) -> Self {
        Self {
            triangle: true,
            ..Self::new(has_z, has_m)
        }
    }

    /// Creates a polygon with the given dimensionality and rings.
    pub fn with_rings(has_z: bool, has_m: bool, rings: Vec<LineString>) -> Self {
        Self {
            has_z,
            has_m,
            triangle: false,
            rings,
        }
    }

    /// Creates a polygon taking the dimensionality that all `rings` share.
    pub fn from_rings(rings: Vec<LineString>) -> Self {
        let dimensions = Dimensions::common(rings.iter().map(GeometryNode::dimensions));
        Self::with_rings(dimensions.has_z(), dimensions.has_m(), rings)
    }

    /// Converts the polygon into a triangle with the same rings.
    pub fn into_triangle(self) -> Self {
        Self {
            triangle: true,
            ..self
        }
    }

    /// True for triangles.
    pub fn is_triangle(&self) -> bool {
        self.triangle
    }

    /// All rings starting with the exterior one.
    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    /// Exterior ring, `None` for an empty polygon.
    pub fn exterior(&self) -> Option<&LineString> {
        self.rings.first()
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// Appends a ring. The first ring pushed becomes the exterior.
    pub fn push(&mut self, ring: LineString) {
        self.rings.push(ring);
    }

    /// Consumes the polygon returning its rings.
    pub fn into_rings(self) -> Vec<LineString> {
        self.rings
    }
}

impl GeometryNode for Polygon {
    fn kind(&self) -> GeometryKind {
        if self.triangle {
            GeometryKind::Triangle
        } else {
            GeometryKind::Polygon
        }
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

impl From<LineString> for Polygon {
    fn from(value: LineString) -> Self {
        Self::from_rings(vec![value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn ring(offset: f64) -> LineString {
        LineString::from_points(vec![
            Point::new(offset, offset),
            Point::new(offset + 1.0, offset),
            Point::new(offset, offset + 1.0),
            Point::new(offset, offset),
        ])
    }

    #[test]
    fn exterior_and_interiors() {
        let mut polygon = Polygon::new(false, false);
        assert!(polygon.is_empty());
        assert!(polygon.exterior().is_none());
        assert!(polygon.interiors().is_empty());

        polygon.push(ring(0.0));
        polygon.push(ring(0.1));
        assert_eq!(polygon.exterior(), Some(&ring(0.0)));
        assert_eq!(polygon.interiors(), &[ring(0.1)]);
    }

    #[test]
    fn triangle_kind() {
        let triangle = Polygon::from(ring(0.0)).into_triangle();
        assert!(triangle.is_triangle());
        assert_eq!(triangle.kind(), GeometryKind::Triangle);
        assert!(triangle.kind().is_a(GeometryKind::Polygon));
    }
}
