use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::geometry::GeometryNode;
use crate::kind::GeometryKind;
use crate::polygon::Polygon;

/// Contiguous set of polygonal faces sharing common boundary segments.
///
/// The same type represents `TIN` (triangulated irregular network), a polyhedral surface made of
/// triangles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyhedralSurface {
    has_z: bool,
    has_m: bool,
    tin: bool,
    faces: Vec<Polygon>,
}

impl PolyhedralSurface {
    /// Creates a surface with no faces.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            tin: false,
            faces: vec![],
        }
    }

    /// Creates a TIN with no faces.
    pub fn new_tin(has_z: bool, has_m: bool) -> Self {
        Self {
            tin: true,
            ..Self::new(has_z, has_m)
        }
    }

    /// Creates a surface with the given dimensionality and faces.
    pub fn with_faces(has_z: bool, has_m: bool, faces: Vec<Polygon>) -> Self {
        Self {
            has_z,
            has_m,
            tin: false,
            faces,
        }
    }

    /// Creates a surface taking the dimensionality that all `faces` share.
    pub fn from_faces(faces: Vec<Polygon>) -> Self {
        let dimensions = Dimensions::common(faces.iter().map(GeometryNode::dimensions));
        Self::with_faces(dimensions.has_z(), dimensions.has_m(), faces)
    }

    /// Converts the surface into a TIN with the same faces.
    pub fn into_tin(self) -> Self {
        Self { tin: true, ..self }
    }

    /// True for TINs.
    pub fn is_tin(&self) -> bool {
        self.tin
    }

    /// Faces of the surface.
    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// Appends a face.
    pub fn push(&mut self, face: Polygon) {
        self.faces.push(face);
    }

    /// Consumes the surface and returns its faces.
    pub fn into_faces(self) -> Vec<Polygon> {
        self.faces
    }
}

impl GeometryNode for PolyhedralSurface {
    fn kind(&self) -> GeometryKind {
        if self.tin {
            GeometryKind::Tin
        } else {
            GeometryKind::PolyhedralSurface
        }
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_string::LineString;
    use crate::point::Point;

    #[test]
    fn tin_of_triangles() {
        let triangle = Polygon::from(LineString::from_points(vec![
            Point::new_z(0.0, 0.0, 0.0),
            Point::new_z(1.0, 0.0, 0.0),
            Point::new_z(0.0, 1.0, 0.0),
            Point::new_z(0.0, 0.0, 0.0),
        ]))
        .into_triangle();

        let tin = PolyhedralSurface::from_faces(vec![triangle.clone(), triangle]).into_tin();
        assert_eq!(tin.kind(), GeometryKind::Tin);
        assert!(tin.kind().is_a(GeometryKind::PolyhedralSurface));
        assert!(tin.has_z());
        assert_eq!(tin.faces().len(), 2);
    }
}
