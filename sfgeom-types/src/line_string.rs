//! Sequence of points.
//!
//! The same type represents both `LineString` and `CircularString` kinds. A circular string is a
//! line string whose positions are interpreted as arcs (start, any point on the arc, end, with
//! shared endpoints between arcs), which makes it usable anywhere a line string is accepted.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::geometry::GeometryNode;
use crate::kind::GeometryKind;
use crate::point::Point;

/// Line string or circular string. See module level documentation for details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    has_z: bool,
    has_m: bool,
    circular: bool,
    points: Vec<Point>,
}

impl LineString {
    /// Creates an empty line string.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            circular: false,
            points: vec![],
        }
    }

    /// Creates an empty circular string.
    pub fn new_circular(has_z: bool, has_m: bool) -> Self {
        Self {
            circular: true,
            ..Self::new(has_z, has_m)
        }
    }

    /// Creates a line string with the given dimensionality and points.
    pub fn with_points(has_z: bool, has_m: bool, points: Vec<Point>) -> Self {
        Self {
            has_z,
            has_m,
            circular: false,
            points,
        }
    }

    /// Creates a line string taking the dimensionality that all `points` share.
    pub fn from_points(points: Vec<Point>) -> Self {
        let dimensions = Dimensions::common(points.iter().map(Point::dimensions));
        Self::with_points(dimensions.has_z(), dimensions.has_m(), points)
    }

    /// Converts the line string into a circular string with the same points.
    pub fn into_circular(self) -> Self {
        Self {
            circular: true,
            ..self
        }
    }

    /// True for circular strings.
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Points of the line.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the first and the last points are equal. Empty lines are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.x() == last.x() && first.y() == last.y(),
            _ => false,
        }
    }

    /// Consumes the line returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl GeometryNode for LineString {
    fn kind(&self) -> GeometryKind {
        if self.circular {
            GeometryKind::CircularString
        } else {
            GeometryKind::LineString
        }
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point>> for LineString {
    fn from(value: Vec<Point>) -> Self {
        Self::from_points(value)
    }
}

impl FromIterator<Point> for LineString {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_interpolation() {
        let line = LineString::from_points(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(line.kind(), GeometryKind::LineString);
        assert_eq!(line.into_circular().kind(), GeometryKind::CircularString);
    }

    #[test]
    fn dimensions_from_points() {
        let line: LineString = [Point::new_z(0.0, 0.0, 1.0), Point::new_z(1.0, 1.0, 2.0)]
            .into_iter()
            .collect();
        assert!(line.has_z());
        assert!(!line.has_m());

        let mixed =
            LineString::from_points(vec![Point::new_z(0.0, 0.0, 1.0), Point::new(1.0, 1.0)]);
        assert!(!mixed.has_z());
        assert_eq!(mixed.points()[0].z(), Some(1.0));
    }

    #[test]
    fn closed() {
        let mut line = LineString::new(false, false);
        assert!(!line.is_closed());
        line.push(Point::new(0.0, 0.0));
        line.push(Point::new(1.0, 0.0));
        assert!(!line.is_closed());
        line.push(Point::new(0.0, 0.0));
        assert!(line.is_closed());
        assert_eq!(line.len(), 3);
    }
}
