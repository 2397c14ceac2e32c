use crate::cartesian::orient::Orientation;
use crate::point::Point;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Point, pub &'a Point);

impl<'a> Segment<'a> {
    /// Euclidean length of the segment in the XY plane.
    pub fn length(&self) -> f64 {
        (self.1.x() - self.0.x()).hypot(self.1.y() - self.0.y())
    }

    /// Middle point of the segment.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.0.x() + self.1.x()) / 2.0,
            (self.0.y() + self.1.y()) / 2.0,
        )
    }

    /// Returns true, if the segment has at least one common point with the `other` segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
            q.x() <= p.x().max(r.x())
                && q.x() >= p.x().min(r.x())
                && q.y() <= p.y().max(r.y())
                && q.y() >= p.y().min(r.y())
        }

        let o1 = Orientation::triplet(self.0, other.0, self.1);
        let o2 = Orientation::triplet(self.0, other.1, self.1);
        let o3 = Orientation::triplet(other.0, self.0, other.1);
        let o4 = Orientation::triplet(other.0, self.1, other.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(self.0, other.0, self.1))
            || (o2 == Orientation::Collinear && on_segment(self.0, other.1, self.1))
            || (o3 == Orientation::Collinear && on_segment(other.0, self.0, other.1))
            || (o4 == Orientation::Collinear && on_segment(other.0, self.1, other.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn intersects() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 2.0);
        let c = Point::new(0.0, 2.0);
        let d = Point::new(2.0, 0.0);
        assert!(Segment(&a, &b).intersects(&Segment(&c, &d)));

        let e = Point::new(3.0, 3.0);
        let f = Point::new(4.0, 4.0);
        assert!(!Segment(&a, &b).intersects(&Segment(&e, &f)));
        assert!(Segment(&a, &e).intersects(&Segment(&b, &f)));

        let g = Point::new(1.0, 5.0);
        let h = Point::new(1.0, 3.0);
        assert!(!Segment(&a, &b).intersects(&Segment(&g, &h)));
    }

    #[test]
    fn touching_at_endpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(1.0, 1.0);
        assert!(Segment(&a, &b).intersects(&Segment(&b, &c)));
    }

    #[test]
    fn length_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_abs_diff_eq!(Segment(&a, &b).length(), 5.0);
        assert_eq!(Segment(&a, &b).midpoint(), Point::new(1.5, 2.0));
    }
}
