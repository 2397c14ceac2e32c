//! Centroids of geometries of different topological dimensions.
//!
//! Every calculator considers only the parts of the geometry of its own dimension:
//! [`point_centroid`] averages all positions, [`curve_centroid`] weights segment midpoints by
//! segment length (polygon rings count as curves), [`surface_centroid`] weights ring centroids by
//! ring area. Circular strings are treated as chains of straight segments through their control
//! points.

use nalgebra::Vector2;

use crate::curve::Curve;
use crate::geometry::Geometry;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

use super::segment::Segment;

/// Average of all non-empty positions of the geometry.
pub fn point_centroid(geometry: &Geometry) -> Option<Point> {
    let mut sum: Vector2<f64> = Vector2::zeros();
    let mut count = 0usize;
    for p in geometry.points().filter(|p| !p.is_empty()) {
        sum += Vector2::new(p.x(), p.y());
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let c = sum / count as f64;
    Some(Point::new(c.x, c.y))
}

/// Length-weighted centroid of all linear parts of the geometry. Returns `None` if their total
/// length is zero.
pub fn curve_centroid(geometry: &Geometry) -> Option<Point> {
    let mut sum: Vector2<f64> = Vector2::zeros();
    let mut total_length: f64 = 0.0;
    for_each_path(geometry, &mut |path| {
        for pair in path.windows(2) {
            let segment = Segment(&pair[0], &pair[1]);
            let length = segment.length();
            let mid = segment.midpoint();
            sum += Vector2::new(mid.x(), mid.y()) * length;
            total_length += length;
        }
    });

    if total_length == 0.0 || !total_length.is_finite() {
        return None;
    }

    let c = sum / total_length;
    Some(Point::new(c.x, c.y))
}

/// Area-weighted centroid of all polygonal parts of the geometry. Holes subtract from the area of
/// their polygon. Returns `None` if the total area is zero.
pub fn surface_centroid(geometry: &Geometry) -> Option<Point> {
    let mut sum: Vector2<f64> = Vector2::zeros();
    let mut total_area: f64 = 0.0;
    for_each_surface(geometry, &mut |rings| {
        for (index, ring) in rings.iter().enumerate() {
            let Some((area, centroid)) = ring_area_centroid(ring) else {
                continue;
            };
            let weight = if index == 0 { area } else { -area };
            sum += centroid * weight;
            total_area += weight;
        }
    });

    if total_area == 0.0 || !total_area.is_finite() {
        return None;
    }

    let c = sum / total_area;
    Some(Point::new(c.x, c.y))
}

impl Geometry {
    /// Centroid computed for the topological dimension of the geometry. If the parts of that
    /// dimension have zero weight (e.g. a polygon degenerated into a line), the next lower
    /// dimension is used.
    pub fn centroid(&self) -> Option<Point> {
        match self.dimension() {
            2 => surface_centroid(self)
                .or_else(|| curve_centroid(self))
                .or_else(|| point_centroid(self)),
            1 => curve_centroid(self).or_else(|| point_centroid(self)),
            _ => point_centroid(self),
        }
    }
}

/// Absolute area and centroid of a ring, auto-closed.
fn ring_area_centroid(ring: &[Point]) -> Option<(f64, Vector2<f64>)> {
    let base = ring.first()?;
    let base = Vector2::new(base.x(), base.y());

    let mut doubled_area: f64 = 0.0;
    let mut sum: Vector2<f64> = Vector2::zeros();
    for (i, p) in ring.iter().enumerate() {
        let next = &ring[(i + 1) % ring.len()];
        let a = Vector2::new(p.x(), p.y()) - base;
        let b = Vector2::new(next.x(), next.y()) - base;
        let cross = a.perp(&b);
        doubled_area += cross;
        sum += (a + b) * cross;
    }

    if doubled_area == 0.0 {
        return None;
    }

    let centroid = sum / (3.0 * doubled_area) + base;
    Some(((doubled_area / 2.0).abs(), centroid))
}

fn for_each_path(geometry: &Geometry, f: &mut impl FnMut(&[Point])) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(v) => f(v.points()),
        Geometry::Polygon(v) => v.rings().iter().for_each(|r| f(r.points())),
        Geometry::MultiLineString(v) => v.iter().for_each(|l| f(l.points())),
        Geometry::MultiPolygon(v) => v
            .iter()
            .flat_map(Polygon::rings)
            .for_each(|r| f(r.points())),
        Geometry::GeometryCollection(v) => {
            v.geometries().iter().for_each(|g| for_each_path(g, &mut *f))
        }
        Geometry::CompoundCurve(v) => v.segments().iter().for_each(|s| f(s.points())),
        Geometry::CurvePolygon(v) => v.rings().iter().for_each(|r| match r {
            Curve::LineString(l) => f(l.points()),
            Curve::CompoundCurve(c) => c.segments().iter().for_each(|s| f(s.points())),
        }),
        Geometry::PolyhedralSurface(v) => v
            .faces()
            .iter()
            .flat_map(Polygon::rings)
            .for_each(|r| f(r.points())),
    }
}

fn for_each_surface(geometry: &Geometry, f: &mut impl FnMut(&[Vec<Point>])) {
    let line_rings = |rings: &[LineString]| -> Vec<Vec<Point>> {
        rings.iter().map(|r| r.points().to_vec()).collect()
    };

    match geometry {
        Geometry::Polygon(v) => f(&line_rings(v.rings())),
        Geometry::MultiPolygon(v) => v.iter().for_each(|p| f(&line_rings(p.rings()))),
        Geometry::PolyhedralSurface(v) => v.faces().iter().for_each(|p| f(&line_rings(p.rings()))),
        Geometry::CurvePolygon(v) => {
            let rings: Vec<Vec<Point>> = v
                .rings()
                .iter()
                .map(|r| match r {
                    Curve::LineString(l) => l.points().to_vec(),
                    Curve::CompoundCurve(c) => c
                        .segments()
                        .iter()
                        .flat_map(|s| s.points().iter().copied())
                        .collect(),
                })
                .collect();
            f(&rings);
        }
        Geometry::GeometryCollection(v) => v
            .geometries()
            .iter()
            .for_each(|g| for_each_surface(g, &mut *f)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_collection::GeometryCollection;
    use approx::assert_abs_diff_eq;

    fn ring(points: &[(f64, f64)]) -> LineString {
        points.iter().map(|&p| Point::from(p)).collect()
    }

    fn square(min: f64, max: f64) -> LineString {
        ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)])
    }

    #[test]
    fn centroid_of_points() {
        let collection = GeometryCollection::from_geometries(vec![
            Point::new(0.0, 0.0).into(),
            Point::new(2.0, 4.0).into(),
            Point::empty(false, false).into(),
        ]);
        let c = point_centroid(&collection.into()).unwrap();
        assert_abs_diff_eq!(c.x(), 1.0);
        assert_abs_diff_eq!(c.y(), 2.0);
    }

    #[test]
    fn centroid_of_line() {
        let line = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0)]);
        let c = Geometry::from(line).centroid().unwrap();
        assert_abs_diff_eq!(c.x(), 4.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_of_polygon_with_hole() {
        let polygon = Polygon::from_rings(vec![square(0.0, 4.0), square(0.0, 2.0)]);
        let c = Geometry::from(polygon).centroid().unwrap();
        // 16 * (2, 2) - 4 * (1, 1) over 12
        assert_abs_diff_eq!(c.x(), 28.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y(), 28.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn ring_orientation_does_not_matter() {
        let clockwise = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        let c = surface_centroid(&Polygon::from(clockwise).into()).unwrap();
        assert_abs_diff_eq!(c.x(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_polygon_falls_back_to_curve() {
        let flat = ring(&[(0.0, 0.0), (4.0, 0.0), (0.0, 0.0)]);
        let geometry = Geometry::from(Polygon::from(flat));
        assert_eq!(surface_centroid(&geometry), None);
        let c = geometry.centroid().unwrap();
        assert_abs_diff_eq!(c.x(), 2.0);
        assert_abs_diff_eq!(c.y(), 0.0);
    }

    #[test]
    fn empty_geometry_has_no_centroid() {
        assert_eq!(Geometry::from(Polygon::new(false, false)).centroid(), None);
    }
}
