use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, GeometryNode};
use crate::point::Point;

/// Bounding box of a geometry. `z` and `m` ranges are present if the geometry carries these
/// ordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Minimum X.
    pub x_min: f64,
    /// Minimum Y.
    pub y_min: f64,
    /// Maximum X.
    pub x_max: f64,
    /// Maximum Y.
    pub y_max: f64,
    /// Minimum and maximum Z.
    pub z_range: Option<(f64, f64)>,
    /// Minimum and maximum M.
    pub m_range: Option<(f64, f64)>,
}

impl Envelope {
    /// Envelope of a single point.
    pub fn from_point(p: &Point) -> Self {
        Self {
            x_min: p.x(),
            y_min: p.y(),
            x_max: p.x(),
            y_max: p.y(),
            z_range: p.z().map(|z| (z, z)),
            m_range: p.m().map(|m| (m, m)),
        }
    }

    /// Envelope of all non-empty points of the geometry. Returns `None` if there are none.
    ///
    /// The `z` (`m`) range is computed only if the geometry has Z (M), from the points that carry
    /// the ordinate.
    pub fn of(geometry: &Geometry) -> Option<Self> {
        let mut points = geometry.points().filter(|p| !p.is_empty());
        let first = points.next()?;
        let mut envelope = Self::from_point(first);
        for p in points {
            envelope = envelope.merge(Self::from_point(p));
        }

        if !geometry.has_z() {
            envelope.z_range = None;
        }
        if !geometry.has_m() {
            envelope.m_range = None;
        }

        Some(envelope)
    }

    /// Smallest envelope containing both `self` and `other`. A `z` or `m` range is kept if either
    /// side has it.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
            z_range: merge_range(self.z_range, other.z_range),
            m_range: merge_range(self.m_range, other.m_range),
        }
    }

    /// Returns true if the point lies inside or on the border of the envelope in the XY plane.
    pub fn contains(&self, point: &Point) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

fn merge_range(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.max(b.1))),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_collection::GeometryCollection;
    use crate::line_string::LineString;
    use approx::assert_abs_diff_eq;

    #[test]
    fn envelope_of_line() {
        let line = LineString::from_points(vec![
            Point::new_z(1.0, 5.0, -1.0),
            Point::new_z(-2.0, 3.0, 4.0),
            Point::new_z(0.5, 7.5, 0.0),
        ]);
        let envelope = Envelope::of(&line.into()).unwrap();
        assert_abs_diff_eq!(envelope.x_min, -2.0);
        assert_abs_diff_eq!(envelope.x_max, 1.0);
        assert_abs_diff_eq!(envelope.y_min, 3.0);
        assert_abs_diff_eq!(envelope.y_max, 7.5);
        assert_eq!(envelope.z_range, Some((-1.0, 4.0)));
        assert_eq!(envelope.m_range, None);
        assert_abs_diff_eq!(envelope.width(), 3.0);
        assert!(envelope.contains(&Point::new(0.0, 4.0)));
        assert!(!envelope.contains(&Point::new(0.0, 8.0)));
    }

    #[test]
    fn z_range_only_for_z_geometries() {
        let collection = GeometryCollection::from_geometries(vec![
            Point::new_z(0.0, 0.0, 10.0).into(),
            Point::new(1.0, 1.0).into(),
        ]);
        let envelope = Envelope::of(&collection.into()).unwrap();
        assert_eq!(envelope.z_range, None);
    }

    #[test]
    fn empty_geometries_have_no_envelope() {
        assert_eq!(Envelope::of(&LineString::new(false, false).into()), None);
        assert_eq!(Envelope::of(&Point::empty(false, false).into()), None);
    }
}
