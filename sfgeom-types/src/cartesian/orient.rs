use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points in the XY plane. Triplets with non-finite
    /// coordinates are reported as collinear.
    pub fn triplet(p: &Point, q: &Point, r: &Point) -> Self {
        let pq = Vector2::new(q.x() - p.x(), q.y() - p.y());
        let qr = Vector2::new(r.x() - q.x(), r.y() - q.y());
        match -pq.perp(&qr) {
            v if v > 0.0 => Self::Clockwise,
            v if v < 0.0 => Self::Counterclockwise,
            _ => Self::Collinear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplet_orientation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert_eq!(
            Orientation::triplet(&a, &b, &Point::new(1.0, 1.0)),
            Orientation::Counterclockwise
        );
        assert_eq!(
            Orientation::triplet(&a, &b, &Point::new(1.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            Orientation::triplet(&a, &b, &Point::new(5.0, 0.0)),
            Orientation::Collinear
        );
        assert_eq!(
            Orientation::triplet(&a, &b, &Point::new(f64::NAN, 0.0)),
            Orientation::Collinear
        );
    }
}
