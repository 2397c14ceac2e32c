//! Conversions between the geometry tree and [`geo_types`](::geo_types) geometries.
//!
//! `geo_types` has no Z or M ordinates and no curves, so conversion into it drops Z and M and fails
//! for circular strings, compound curves and curve polygons. Polyhedral surfaces and TINs become
//! multi polygons.

use ::geo_types::{coord, Coord};

use crate::collection::{MultiLineString, MultiPoint, MultiPolygon};
use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryNode};
use crate::geometry_collection::GeometryCollection;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

fn point_from_coord(c: Coord<f64>) -> Point {
    Point::new(c.x, c.y)
}

fn coord_from_point(p: &Point) -> Coord<f64> {
    coord!(x: p.x(), y: p.y())
}

impl From<::geo_types::LineString<f64>> for LineString {
    fn from(value: ::geo_types::LineString<f64>) -> Self {
        LineString::with_points(false, false, value.0.into_iter().map(point_from_coord).collect())
    }
}

impl From<::geo_types::Polygon<f64>> for Polygon {
    fn from(value: ::geo_types::Polygon<f64>) -> Self {
        let (exterior, interiors) = value.into_inner();
        let rings = std::iter::once(exterior)
            .chain(interiors)
            .map(LineString::from)
            .collect();
        Polygon::with_rings(false, false, rings)
    }
}

impl From<::geo_types::Geometry<f64>> for Geometry {
    fn from(value: ::geo_types::Geometry<f64>) -> Self {
        use ::geo_types::Geometry as G;
        match value {
            G::Point(p) => Point::new(p.x(), p.y()).into(),
            G::Line(l) => LineString::with_points(
                false,
                false,
                vec![point_from_coord(l.start), point_from_coord(l.end)],
            )
            .into(),
            G::LineString(l) => LineString::from(l).into(),
            G::Polygon(p) => Polygon::from(p).into(),
            G::MultiPoint(mp) => MultiPoint::with_elements(
                false,
                false,
                mp.0.into_iter().map(|p| Point::new(p.x(), p.y())).collect(),
            )
            .into(),
            G::MultiLineString(ml) => MultiLineString::with_elements(
                false,
                false,
                ml.0.into_iter().map(LineString::from).collect(),
            )
            .into(),
            G::MultiPolygon(mp) => MultiPolygon::with_elements(
                false,
                false,
                mp.0.into_iter().map(Polygon::from).collect(),
            )
            .into(),
            G::GeometryCollection(gc) => GeometryCollection::with_geometries(
                false,
                false,
                gc.0.into_iter().map(Geometry::from).collect(),
            )
            .into(),
            G::Rect(r) => Polygon::from(r.to_polygon()).into(),
            G::Triangle(t) => Polygon::from(t.to_polygon()).into_triangle().into(),
        }
    }
}

fn to_line_string(line: &LineString) -> Result<::geo_types::LineString<f64>, GeometryError> {
    if line.is_circular() {
        return Err(GeometryError::UnsupportedKind {
            ordinal: line.kind().ordinal(),
        });
    }

    Ok(::geo_types::LineString(
        line.points().iter().map(coord_from_point).collect(),
    ))
}

fn to_polygon(polygon: &Polygon) -> Result<::geo_types::Polygon<f64>, GeometryError> {
    let mut rings = polygon.rings().iter();
    let exterior = match rings.next() {
        Some(ring) => to_line_string(ring)?,
        None => ::geo_types::LineString(vec![]),
    };
    let interiors = rings.map(to_line_string).collect::<Result<_, _>>()?;

    Ok(::geo_types::Polygon::new(exterior, interiors))
}

impl TryFrom<Geometry> for ::geo_types::Geometry<f64> {
    type Error = GeometryError;

    fn try_from(value: Geometry) -> Result<Self, Self::Error> {
        use ::geo_types::Geometry as G;
        Ok(match value {
            Geometry::Point(p) => G::Point(::geo_types::Point(coord_from_point(&p))),
            Geometry::LineString(l) => G::LineString(to_line_string(&l)?),
            Geometry::Polygon(p) => G::Polygon(to_polygon(&p)?),
            Geometry::MultiPoint(mp) => G::MultiPoint(::geo_types::MultiPoint(
                mp.iter()
                    .map(|p| ::geo_types::Point(coord_from_point(p)))
                    .collect(),
            )),
            Geometry::MultiLineString(ml) => G::MultiLineString(::geo_types::MultiLineString(
                ml.iter().map(to_line_string).collect::<Result<_, _>>()?,
            )),
            Geometry::MultiPolygon(mp) => G::MultiPolygon(::geo_types::MultiPolygon(
                mp.iter().map(to_polygon).collect::<Result<_, _>>()?,
            )),
            Geometry::PolyhedralSurface(ps) => G::MultiPolygon(::geo_types::MultiPolygon(
                ps.faces().iter().map(to_polygon).collect::<Result<_, _>>()?,
            )),
            Geometry::GeometryCollection(gc) => {
                G::GeometryCollection(::geo_types::GeometryCollection(
                    gc.into_geometries()
                        .into_iter()
                        .map(::geo_types::Geometry::try_from)
                        .collect::<Result<_, _>>()?,
                ))
            }
            Geometry::CompoundCurve(c) => {
                return Err(GeometryError::UnsupportedKind {
                    ordinal: c.kind().ordinal(),
                })
            }
            Geometry::CurvePolygon(c) => {
                return Err(GeometryError::UnsupportedKind {
                    ordinal: c.kind().ordinal(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CompoundCurve;
    use crate::kind::GeometryKind;
    use ::geo_types::{line_string, polygon};
    use assert_matches::assert_matches;

    #[test]
    fn from_geo_types() {
        let polygon = ::geo_types::polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ];
        let geometry = Geometry::from(::geo_types::Geometry::Polygon(polygon));
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(geometry.num_points(), 4);
        assert!(!geometry.has_z());

        let triangle = ::geo_types::Triangle::new(
            coord!(x: 0.0, y: 0.0),
            coord!(x: 1.0, y: 0.0),
            coord!(x: 0.0, y: 1.0),
        );
        let geometry = Geometry::from(::geo_types::Geometry::Triangle(triangle));
        assert_eq!(geometry.kind(), GeometryKind::Triangle);
    }

    #[test]
    fn into_geo_types() {
        let line =
            LineString::from_points(vec![Point::new_z(0.0, 1.0, 5.0), Point::new_z(2.0, 3.0, 5.0)]);
        let collection =
            GeometryCollection::from_geometries(vec![line.into(), Point::new(7.0, 8.0).into()]);

        let converted = ::geo_types::Geometry::try_from(Geometry::from(collection)).unwrap();
        let ::geo_types::Geometry::GeometryCollection(gc) = converted else {
            panic!("collection expected");
        };
        assert_eq!(gc.0.len(), 2);
        assert_eq!(
            gc.0[0],
            ::geo_types::Geometry::LineString(
                ::geo_types::line_string![(x: 0.0, y: 1.0), (x: 2.0, y: 3.0)]
            )
        );
    }

    #[test]
    fn curves_are_not_converted() {
        let circular = LineString::new_circular(false, false);
        assert_matches!(
            ::geo_types::Geometry::try_from(Geometry::from(circular)),
            Err(GeometryError::UnsupportedKind { ordinal: 8 })
        );
        assert_matches!(
            ::geo_types::Geometry::try_from(Geometry::from(CompoundCurve::default())),
            Err(GeometryError::UnsupportedKind { ordinal: 9 })
        );
    }
}
