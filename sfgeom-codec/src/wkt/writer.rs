use std::fmt::{Display, Formatter, Result};

use sfgeom_types::{
    Curve, Dimensions, Geometry, GeometryKind, GeometryNode, LineString, Point, Polygon,
};

use super::reader::implicit_element;

/// Text representation of a geometry, produced by its [`Display`] implementation.
///
/// Keywords are upper case and followed by the dimensionality suffix separated by a space
/// (`POINT ZM (1 2 3 4)`). Elements of collections are separated by `", "`. Elements whose kind is
/// implied by their container are written without a keyword, e.g. the rings of a curve polygon that
/// are plain line strings, as long as they share the container's dimensionality.
///
/// ```
/// use sfgeom_codec::wkt::Wkt;
/// use sfgeom_types::{Geometry, LineString, Point};
///
/// let line = LineString::from_points(vec![Point::new(0.0, 0.0), Point::new(1.5, -2.0)]);
/// assert_eq!(Wkt(&Geometry::from(line)).to_string(), "LINESTRING (0 0, 1.5 -2)");
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Wkt<'a>(pub &'a Geometry);

impl Display for Wkt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_node(f, self.0, true, Dimensions::Xy)
    }
}

/// Node that can write its parenthesized content.
trait Body: GeometryNode {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result;
}

impl Body for Point {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result {
        f.write_str("(")?;
        write_coordinates(f, self, dimensions)?;
        f.write_str(")")
    }
}

impl Body for LineString {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result {
        write_points(f, self, dimensions)
    }
}

impl Body for Polygon {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result {
        f.write_str("(")?;
        for (index, ring) in self.rings().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write_points(f, ring, dimensions)?;
        }
        f.write_str(")")
    }
}

impl Body for Curve {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result {
        match self {
            Curve::LineString(line) => line.write_body(f, dimensions),
            Curve::CompoundCurve(curve) => {
                write_elements(f, curve.kind(), curve.segments(), dimensions)
            }
        }
    }
}

impl Body for Geometry {
    fn write_body(&self, f: &mut Formatter<'_>, dimensions: Dimensions) -> Result {
        let kind = self.kind();
        match self {
            Geometry::Point(v) => v.write_body(f, dimensions),
            Geometry::LineString(v) => v.write_body(f, dimensions),
            Geometry::Polygon(v) => v.write_body(f, dimensions),
            Geometry::MultiPoint(v) => write_elements(f, kind, v.elements(), dimensions),
            Geometry::MultiLineString(v) => write_elements(f, kind, v.elements(), dimensions),
            Geometry::MultiPolygon(v) => write_elements(f, kind, v.elements(), dimensions),
            Geometry::GeometryCollection(v) => write_elements(f, kind, v.geometries(), dimensions),
            Geometry::CompoundCurve(v) => write_elements(f, kind, v.segments(), dimensions),
            Geometry::CurvePolygon(v) => write_elements(f, kind, v.rings(), dimensions),
            Geometry::PolyhedralSurface(v) => write_elements(f, kind, v.faces(), dimensions),
        }
    }
}

/// Writes a node. A node without a keyword takes the dimensionality of its container, which is what
/// a reader applies to its coordinates.
fn write_node(
    f: &mut Formatter<'_>,
    node: &impl Body,
    keyword: bool,
    inherited: Dimensions,
) -> Result {
    let dimensions = if keyword {
        let dimensions = node.dimensions();
        f.write_str(node.kind().name())?;
        if dimensions != Dimensions::Xy {
            write!(f, " {}", dimensions.suffix())?;
        }
        f.write_str(" ")?;
        dimensions
    } else {
        inherited
    };

    if node.is_empty() {
        return f.write_str("EMPTY");
    }

    node.write_body(f, dimensions)
}

fn write_elements(
    f: &mut Formatter<'_>,
    container: GeometryKind,
    elements: &[impl Body],
    dimensions: Dimensions,
) -> Result {
    let implicit = implicit_element(container).filter(|_| !is_heterogeneous(container));

    f.write_str("(")?;
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }

        let keyword = implicit != Some(element.kind()) || element.dimensions() != dimensions;
        write_node(f, element, keyword, dimensions)?;
    }
    f.write_str(")")
}

/// Elements of these collections are always written with a keyword, even where a reader would
/// accept them without one.
fn is_heterogeneous(container: GeometryKind) -> bool {
    matches!(
        container,
        GeometryKind::GeometryCollection | GeometryKind::MultiCurve | GeometryKind::MultiSurface
    )
}

fn write_points(f: &mut Formatter<'_>, line: &LineString, dimensions: Dimensions) -> Result {
    if line.is_empty() {
        return f.write_str("EMPTY");
    }

    f.write_str("(")?;
    for (index, point) in line.points().iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write_coordinates(f, point, dimensions)?;
    }
    f.write_str(")")
}

/// Writes the ordinates of a point. With an explicit dimensionality exactly the declared ordinates
/// are written, NaN standing for a missing one. Otherwise the point's own ordinates are written, M
/// only together with Z since a reader takes a third number for Z.
fn write_coordinates(f: &mut Formatter<'_>, point: &Point, dimensions: Dimensions) -> Result {
    write!(f, "{} {}", point.x(), point.y())?;

    let (z, m) = if dimensions == Dimensions::Xy {
        let z = point.z();
        (z, z.and(point.m()))
    } else {
        (
            dimensions.has_z().then(|| point.z().unwrap_or(f64::NAN)),
            dimensions.has_m().then(|| point.m().unwrap_or(f64::NAN)),
        )
    };

    if let Some(z) = z {
        write!(f, " {z}")?;
    }
    if let Some(m) = m {
        write!(f, " {m}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfgeom_types::{
        CompoundCurve, CurvePolygon, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon,
        PolyhedralSurface,
    };

    fn wkt(geometry: impl Into<Geometry>) -> String {
        Wkt(&geometry.into()).to_string()
    }

    fn square(size: f64) -> LineString {
        LineString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, 0.0),
        ])
    }

    #[test]
    fn points() {
        insta::assert_snapshot!(wkt(Point::new_z(10.0, 10.0, 5.0)), @"POINT Z (10 10 5)");
        insta::assert_snapshot!(wkt(Point::new_zm(1.0, 2.5, -3.0, 4.0)), @"POINT ZM (1 2.5 -3 4)");
        insta::assert_snapshot!(wkt(Point::new_m(1.0, 2.0, 3.0)), @"POINT M (1 2 3)");
        insta::assert_snapshot!(wkt(Point::empty(true, false)), @"POINT Z EMPTY");
        insta::assert_snapshot!(wkt(Point::new(1.0, f64::NAN)), @"POINT (1 NaN)");
    }

    #[test]
    fn polygons() {
        let polygon = Polygon::from_rings(vec![square(4.0), square(1.0)]);
        insta::assert_snapshot!(
            wkt(polygon.clone()),
            @"POLYGON ((0 0, 4 0, 4 4, 0 0), (0 0, 1 0, 1 1, 0 0))"
        );
        insta::assert_snapshot!(
            wkt(MultiPolygon::from_elements(vec![polygon, Polygon::new(false, false)])),
            @"MULTIPOLYGON (((0 0, 4 0, 4 4, 0 0), (0 0, 1 0, 1 1, 0 0)), EMPTY)"
        );
        let triangle = Polygon::from(square(1.0)).into_triangle();
        insta::assert_snapshot!(
            wkt(PolyhedralSurface::from_faces(vec![triangle]).into_tin()),
            @"TIN (((0 0, 1 0, 1 1, 0 0)))"
        );
    }

    #[test]
    fn multi_points() {
        let points = MultiPoint::from_elements(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        insta::assert_snapshot!(wkt(points), @"MULTIPOINT ((1 2), (3 4))");

        let measured =
            MultiPoint::from_elements(vec![Point::new_m(1.0, 2.0, 3.0), Point::new(4.0, 5.0)]);
        insta::assert_snapshot!(wkt(measured), @"MULTIPOINT (POINT M (1 2 3), (4 5))");
    }

    #[test]
    fn elements_keep_their_own_dimensions() {
        let lines = MultiLineString::from_elements(vec![
            LineString::with_points(
                false,
                true,
                vec![Point::new_m(0.0, 0.0, 1.0), Point::new_m(1.0, 1.0, 2.0)],
            ),
            LineString::from_points(vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]),
        ]);
        insta::assert_snapshot!(
            wkt(lines),
            @"MULTILINESTRING (LINESTRING M (0 0 1, 1 1 2), (2 2, 3 3))"
        );

        let polygons = MultiPolygon::with_elements(true, false, vec![Polygon::new(false, false)]);
        insta::assert_snapshot!(wkt(polygons), @"MULTIPOLYGON Z (POLYGON EMPTY)");
    }

    #[test]
    fn curves() {
        let arc = LineString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ])
        .into_circular();
        let compound = CompoundCurve::from_segments(vec![
            arc.clone(),
            LineString::from_points(vec![Point::new(2.0, 0.0), Point::new(0.0, 0.0)]),
        ]);
        insta::assert_snapshot!(
            wkt(compound.clone()),
            @"COMPOUNDCURVE (CIRCULARSTRING (0 0, 1 1, 2 0), (2 0, 0 0))"
        );

        let polygon =
            CurvePolygon::from_rings(vec![Curve::from(compound), Curve::from(square(1.0))]);
        insta::assert_snapshot!(
            wkt(polygon),
            @"CURVEPOLYGON (COMPOUNDCURVE (CIRCULARSTRING (0 0, 1 1, 2 0), (2 0, 0 0)), (0 0, 1 0, 1 1, 0 0))"
        );
    }

    #[test]
    fn collections_keyword_their_elements() {
        let collection = GeometryCollection::from_geometries(vec![
            square(1.0).into(),
            LineString::new(false, false).into(),
        ]);
        insta::assert_snapshot!(
            wkt(collection.clone()),
            @"GEOMETRYCOLLECTION (LINESTRING (0 0, 1 0, 1 1, 0 0), LINESTRING EMPTY)"
        );
        insta::assert_snapshot!(
            wkt(collection.extended()),
            @"MULTICURVE (LINESTRING (0 0, 1 0, 1 1, 0 0), LINESTRING EMPTY)"
        );
    }

    #[test]
    fn ordinates_follow_declared_dimensions() {
        let line = LineString::with_points(
            false,
            true,
            vec![Point::new_z(1.0, 2.0, 3.0), Point::new_m(4.0, 5.0, 6.0)],
        );
        insta::assert_snapshot!(wkt(line), @"LINESTRING M (1 2 NaN, 4 5 6)");

        let mixed =
            LineString::from_points(vec![Point::new(0.0, 0.0), Point::new_z(1.0, 1.0, 1.0)]);
        insta::assert_snapshot!(wkt(mixed), @"LINESTRING (0 0, 1 1 1)");
    }
}
