use log::debug;
use sfgeom_types::error::GeometryError;
use sfgeom_types::filter::GeometryFilter;
use sfgeom_types::{
    CompoundCurve, Curve, CurvePolygon, Dimensions, Geometry, GeometryCollection, GeometryElement,
    GeometryKind, GeometryNode, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, PolyhedralSurface,
};

use super::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::CodecError;
use crate::DEFAULT_MAX_DEPTH;

const DIMENSION_SUFFIXES: [&str; 3] = ["ZM", "Z", "M"];

/// Reader of the text format.
///
/// Keywords are case-insensitive, and the dimensionality can be given either as a separate word
/// (`POINT Z (1 2 3)`) or glued to the keyword (`POINTZ (1 2 3)`). Without an explicit
/// dimensionality the number of ordinates of every point decides whether it has Z and M, and a
/// container gets the dimensionality all its children share.
///
/// Inside collections the keyword of an element can be omitted where the element kind is implied by
/// the container, e.g. `MULTILINESTRING ((0 0, 1 1))` or `CURVEPOLYGON ((0 0, 1 0, 0 1, 0 0))`.
pub struct WktReader<'a> {
    filter: Option<&'a dyn GeometryFilter>,
    max_depth: usize,
}

impl Default for WktReader<'_> {
    fn default() -> Self {
        Self {
            filter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a> WktReader<'a> {
    /// Sets the filter applied to every decoded point and sub-geometry.
    pub fn with_filter(self, filter: &'a dyn GeometryFilter) -> Self {
        Self {
            filter: Some(filter),
            ..self
        }
    }

    /// Sets the maximum nesting level of geometries. A top level geometry is at level 0.
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// Reads a geometry. The text must contain exactly one geometry. Returns `None` if the geometry
    /// was discarded by the filter.
    pub fn read(&self, text: &str) -> Result<Option<Geometry>, CodecError> {
        self.read_typed(text, GeometryKind::Geometry)
    }

    /// Reads a geometry that must be an instance of `expected`.
    pub fn read_typed(
        &self,
        text: &str,
        expected: GeometryKind,
    ) -> Result<Option<Geometry>, CodecError> {
        let mut tokens = Tokenizer::new(text);
        let geometry = self.read_geometry(&mut tokens, None, expected, 0)?;
        if let Some(token) = tokens.next_token()? {
            return Err(malformed(&mut tokens, Some(token), "end of input"));
        }

        Ok(geometry)
    }

    fn read_geometry(
        &self,
        tokens: &mut Tokenizer<'_>,
        containing: Option<GeometryKind>,
        expected: GeometryKind,
        depth: usize,
    ) -> Result<Option<Geometry>, CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthLimitExceeded(self.max_depth));
        }

        let token = tokens.next_token()?;
        let Some((offset, keyword)) = token.and_then(|t| match t.kind {
            TokenKind::Word(word) => Some((t.offset, word)),
            _ => None,
        }) else {
            return Err(malformed(tokens, token, "geometry keyword"));
        };

        let (kind, mut dimensions) =
            parse_keyword(keyword).ok_or_else(|| CodecError::MalformedToken {
                offset,
                expected: "geometry keyword".into(),
                found: keyword.into(),
            })?;
        let kind = kind
            .concrete()
            .map_err(|source| CodecError::Kind { offset, source })?;
        if !kind.is_a(expected) {
            return Err(CodecError::TypeMismatch {
                offset,
                expected,
                actual: kind,
            });
        }

        if dimensions.is_none() {
            if let Some(suffix) = tokens.peek()?.and_then(suffix_dimensions) {
                tokens.next_token()?;
                dimensions = Some(suffix);
            }
        }

        let geometry = self.read_body(tokens, kind, dimensions, depth, offset)?;
        Ok(geometry.filter(|g| self.keep(containing, g)))
    }

    /// Reads an element whose keyword is implied by its container.
    fn read_implicit(
        &self,
        tokens: &mut Tokenizer<'_>,
        containing: GeometryKind,
        kind: GeometryKind,
        dimensions: Option<Dimensions>,
        depth: usize,
    ) -> Result<Option<Geometry>, CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthLimitExceeded(self.max_depth));
        }

        let offset = tokens.offset()?;
        let geometry = self.read_body(tokens, kind, dimensions, depth, offset)?;
        Ok(geometry.filter(|g| self.keep(Some(containing), g)))
    }

    fn read_body(
        &self,
        tokens: &mut Tokenizer<'_>,
        kind: GeometryKind,
        dimensions: Option<Dimensions>,
        depth: usize,
        offset: usize,
    ) -> Result<Option<Geometry>, CodecError> {
        use GeometryKind as K;
        Ok(match kind {
            K::Point => Some(Geometry::from(read_point(tokens, dimensions)?)),
            K::LineString | K::CircularString => self
                .read_line(tokens, kind, dimensions)?
                .map(Geometry::from),
            K::Polygon | K::Triangle => self
                .read_polygon(tokens, kind, dimensions)?
                .map(Geometry::from),
            K::MultiPoint => self.read_collection(tokens, kind, dimensions, depth, |d, e| {
                MultiPoint::with_elements(d.has_z(), d.has_m(), e)
            })?,
            K::MultiLineString => self.read_collection(tokens, kind, dimensions, depth, |d, e| {
                MultiLineString::with_elements(d.has_z(), d.has_m(), e)
            })?,
            K::MultiPolygon => self.read_collection(tokens, kind, dimensions, depth, |d, e| {
                MultiPolygon::with_elements(d.has_z(), d.has_m(), e)
            })?,
            K::PolyhedralSurface | K::Tin => {
                self.read_collection(tokens, kind, dimensions, depth, |d, e| {
                    let surface = PolyhedralSurface::with_faces(d.has_z(), d.has_m(), e);
                    if kind == K::Tin {
                        surface.into_tin()
                    } else {
                        surface
                    }
                })?
            }
            K::CompoundCurve => self.read_collection(tokens, kind, dimensions, depth, |d, e| {
                CompoundCurve::with_segments(d.has_z(), d.has_m(), e)
            })?,
            K::CurvePolygon => {
                self.read_collection(tokens, kind, dimensions, depth, |d, e: Vec<Curve>| {
                    CurvePolygon::with_rings(d.has_z(), d.has_m(), e)
                })?
            }
            K::GeometryCollection | K::MultiCurve | K::MultiSurface => {
                self.read_collection(tokens, kind, dimensions, depth, |d, e: Vec<Geometry>| {
                    GeometryCollection::with_geometries(d.has_z(), d.has_m(), e)
                })?
            }
            K::Geometry | K::Curve | K::Surface => {
                return Err(CodecError::Kind {
                    offset,
                    source: GeometryError::AbstractKind(kind),
                })
            }
        })
    }

    fn read_line(
        &self,
        tokens: &mut Tokenizer<'_>,
        kind: GeometryKind,
        dimensions: Option<Dimensions>,
    ) -> Result<Option<LineString>, CodecError> {
        let mut points = vec![];
        if open(tokens)? {
            loop {
                let point = read_coordinates(tokens, dimensions)?;
                if self.keep(Some(kind), &Geometry::Point(point)) {
                    points.push(point);
                }
                if !next_element(tokens)? {
                    break;
                }
            }

            if points.is_empty() {
                debug!("{kind} emptied by the filter");
                return Ok(None);
            }
        }

        let dimensions =
            dimensions.unwrap_or_else(|| Dimensions::common(points.iter().map(Point::dimensions)));
        let line = LineString::with_points(dimensions.has_z(), dimensions.has_m(), points);
        Ok(Some(if kind == GeometryKind::CircularString {
            line.into_circular()
        } else {
            line
        }))
    }

    fn read_polygon(
        &self,
        tokens: &mut Tokenizer<'_>,
        kind: GeometryKind,
        dimensions: Option<Dimensions>,
    ) -> Result<Option<Polygon>, CodecError> {
        let mut rings = vec![];
        if open(tokens)? {
            loop {
                let ring = self.read_line(tokens, GeometryKind::LineString, dimensions)?;
                if let Some(ring) = ring.and_then(|r| self.keep_element(kind, r)) {
                    rings.push(ring);
                }
                if !next_element(tokens)? {
                    break;
                }
            }

            if rings.is_empty() {
                debug!("{kind} emptied by the filter");
                return Ok(None);
            }
        }

        let dimensions = dimensions
            .unwrap_or_else(|| Dimensions::common(rings.iter().map(GeometryNode::dimensions)));
        let polygon = Polygon::with_rings(dimensions.has_z(), dimensions.has_m(), rings);
        Ok(Some(if kind == GeometryKind::Triangle {
            polygon.into_triangle()
        } else {
            polygon
        }))
    }

    fn read_collection<E: GeometryElement, T: Into<Geometry>>(
        &self,
        tokens: &mut Tokenizer<'_>,
        kind: GeometryKind,
        dimensions: Option<Dimensions>,
        depth: usize,
        build: impl FnOnce(Dimensions, Vec<E>) -> T,
    ) -> Result<Option<Geometry>, CodecError> {
        let mut elements: Vec<E> = vec![];
        if open(tokens)? {
            loop {
                let offset = tokens.offset()?;
                let element = self.read_element(tokens, kind, E::KIND, dimensions, depth)?;
                if let Some(geometry) = element {
                    let element =
                        E::try_from_geometry(geometry).map_err(|g| CodecError::TypeMismatch {
                            offset,
                            expected: E::KIND,
                            actual: g.kind(),
                        })?;
                    elements.push(element);
                }
                if !next_element(tokens)? {
                    break;
                }
            }

            if elements.is_empty() {
                debug!("{kind} emptied by the filter");
                return Ok(None);
            }
        }

        let dimensions = dimensions
            .unwrap_or_else(|| Dimensions::common(elements.iter().map(GeometryNode::dimensions)));
        Ok(Some(build(dimensions, elements).into()))
    }

    fn read_element(
        &self,
        tokens: &mut Tokenizer<'_>,
        containing: GeometryKind,
        expected: GeometryKind,
        dimensions: Option<Dimensions>,
        depth: usize,
    ) -> Result<Option<Geometry>, CodecError> {
        let token = tokens.peek()?;
        let keyworded = token.is_some_and(|t| {
            matches!(t.kind, TokenKind::Word(_)) && !t.is_word("EMPTY") && t.number().is_none()
        });
        if keyworded {
            return self.read_geometry(tokens, Some(containing), expected, depth + 1);
        }

        match implicit_element(containing) {
            Some(GeometryKind::Point) if token.and_then(|t| t.number()).is_some() => {
                let point = read_coordinates(tokens, dimensions)?;
                Ok(Some(Geometry::Point(point)).filter(|g| self.keep(Some(containing), g)))
            }
            Some(kind) => self.read_implicit(tokens, containing, kind, dimensions, depth + 1),
            None => {
                let token = tokens.next_token()?;
                Err(malformed(tokens, token, "geometry keyword"))
            }
        }
    }

    fn keep(&self, containing: Option<GeometryKind>, geometry: &Geometry) -> bool {
        self.filter.map_or(true, |f| f.filter(containing, geometry))
    }

    fn keep_element<E: GeometryElement>(&self, containing: GeometryKind, element: E) -> Option<E> {
        if self.filter.is_none() {
            return Some(element);
        }

        let geometry: Geometry = element.into();
        if !self.keep(Some(containing), &geometry) {
            return None;
        }

        E::try_from_geometry(geometry).ok()
    }
}

/// Kind of the elements of `container` written without a keyword.
pub(super) fn implicit_element(container: GeometryKind) -> Option<GeometryKind> {
    use GeometryKind as K;
    match container {
        K::MultiPoint => Some(K::Point),
        K::MultiLineString | K::CompoundCurve | K::CurvePolygon | K::MultiCurve => {
            Some(K::LineString)
        }
        K::MultiPolygon | K::PolyhedralSurface | K::MultiSurface => Some(K::Polygon),
        K::Tin => Some(K::Triangle),
        _ => None,
    }
}

fn parse_keyword(keyword: &str) -> Option<(GeometryKind, Option<Dimensions>)> {
    if let Some(kind) = GeometryKind::from_name(keyword) {
        return Some((kind, None));
    }

    DIMENSION_SUFFIXES.into_iter().find_map(|suffix| {
        let split = keyword.len().checked_sub(suffix.len()).filter(|&split| split > 0)?;
        if !keyword.is_char_boundary(split) || !keyword[split..].eq_ignore_ascii_case(suffix) {
            return None;
        }

        let kind = GeometryKind::from_name(&keyword[..split])?;
        Some((kind, Dimensions::from_suffix(suffix)))
    })
}

fn suffix_dimensions(token: Token<'_>) -> Option<Dimensions> {
    match token.kind {
        TokenKind::Word(word) => Dimensions::from_suffix(word),
        _ => None,
    }
}

fn malformed(tokens: &mut Tokenizer<'_>, token: Option<Token<'_>>, expected: &str) -> CodecError {
    let (offset, found) = match token {
        Some(token) => (token.offset, token.text().to_string()),
        None => (tokens.offset().unwrap_or_default(), String::new()),
    };

    CodecError::MalformedToken {
        offset,
        expected: expected.into(),
        found,
    }
}

/// Consumes the start of a node body. Returns `false` for `EMPTY` and `true` for an opening
/// parenthesis.
fn open(tokens: &mut Tokenizer<'_>) -> Result<bool, CodecError> {
    let token = tokens.next_token()?;
    match token {
        Some(t) if t.kind == TokenKind::LeftParen => Ok(true),
        Some(t) if t.is_word("EMPTY") => Ok(false),
        _ => Err(malformed(tokens, token, "`(` or EMPTY")),
    }
}

/// Consumes the token after a list element. Returns `true` if another element follows.
fn next_element(tokens: &mut Tokenizer<'_>) -> Result<bool, CodecError> {
    let token = tokens.next_token()?;
    match token.map(|t| t.kind) {
        Some(TokenKind::Comma) => Ok(true),
        Some(TokenKind::RightParen) => Ok(false),
        _ => Err(malformed(tokens, token, "`,` or `)`")),
    }
}

fn read_number(tokens: &mut Tokenizer<'_>) -> Result<f64, CodecError> {
    let token = tokens.next_token()?;
    match token.and_then(|t| t.number()) {
        Some(value) => Ok(value),
        None => Err(malformed(tokens, token, "number")),
    }
}

fn read_ordinate(tokens: &mut Tokenizer<'_>, present: bool) -> Result<Option<f64>, CodecError> {
    present.then(|| read_number(tokens)).transpose()
}

fn next_is_number(tokens: &mut Tokenizer<'_>) -> Result<bool, CodecError> {
    Ok(tokens.peek()?.and_then(|t| t.number()).is_some())
}

fn read_coordinates(
    tokens: &mut Tokenizer<'_>,
    dimensions: Option<Dimensions>,
) -> Result<Point, CodecError> {
    let x = read_number(tokens)?;
    let y = read_number(tokens)?;
    let (z, m) = match dimensions {
        Some(dimensions) => (
            read_ordinate(tokens, dimensions.has_z())?,
            read_ordinate(tokens, dimensions.has_m())?,
        ),
        None => {
            let has_z = next_is_number(tokens)?;
            let z = read_ordinate(tokens, has_z)?;
            let has_m = has_z && next_is_number(tokens)?;
            (z, read_ordinate(tokens, has_m)?)
        }
    };

    Ok(Point::from_ordinates(x, y, z, m))
}

fn read_point(
    tokens: &mut Tokenizer<'_>,
    dimensions: Option<Dimensions>,
) -> Result<Point, CodecError> {
    if !open(tokens)? {
        let dimensions = dimensions.unwrap_or_default();
        return Ok(Point::empty(dimensions.has_z(), dimensions.has_m()));
    }

    let point = read_coordinates(tokens, dimensions)?;
    let token = tokens.next_token()?;
    if token.map(|t| t.kind) != Some(TokenKind::RightParen) {
        return Err(malformed(tokens, token, "`)`"));
    }

    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn read(text: &str) -> Geometry {
        WktReader::default().read(text).unwrap().unwrap()
    }

    #[test]
    fn point_spellings() {
        let expected = Geometry::Point(Point::new_z(10.0, 10.0, 5.0));
        assert_eq!(read("POINT Z (10 10 5)"), expected);
        assert_eq!(read("pointz(10 10 5)"), expected);
        assert_eq!(read("Point (10 10 5)"), expected);
        assert_eq!(read("POINT M (1 2 3)"), Geometry::Point(Point::new_m(1.0, 2.0, 3.0)));
        assert_eq!(read("POINTZM (1 2 3 4)"), Geometry::Point(Point::new_zm(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn empty_nodes() {
        let point = read("POINT Z EMPTY");
        assert!(point.is_empty());
        assert!(point.has_z());

        let polygon = read("POLYGON EMPTY");
        assert_eq!(polygon.kind(), GeometryKind::Polygon);
        assert!(polygon.is_empty());
        assert!(!polygon.has_z() && !polygon.has_m());

        let Geometry::MultiPoint(points) = read("MULTIPOINT ((1 2), EMPTY)") else {
            panic!("multi point expected");
        };
        assert_eq!(points.len(), 2);
        assert!(points.elements()[1].is_empty());
    }

    #[test]
    fn mixed_dimensions_are_accepted() {
        let Geometry::LineString(line) = read("LINESTRING (0 0, 1 1 1, 2 2 2 2)") else {
            panic!("line string expected");
        };
        assert!(!line.has_z());
        assert_eq!(line.points()[0], Point::new(0.0, 0.0));
        assert_eq!(line.points()[1], Point::new_z(1.0, 1.0, 1.0));
        assert_eq!(line.points()[2], Point::new_zm(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn dimensions_lift_to_container() {
        let geometry = read("MULTILINESTRING ((0 0 1, 1 1 1), (2 2 2, 3 3 3))");
        assert!(geometry.has_z());
        assert!(!geometry.has_m());
    }

    #[test]
    fn implicit_elements() {
        let geometry = read("CURVEPOLYGON ((0 0, 4 0, 0 4, 0 0), CIRCULARSTRING (1 1, 2 1, 1 1))");
        let Geometry::CurvePolygon(polygon) = geometry else {
            panic!("curve polygon expected");
        };
        assert_eq!(polygon.rings()[0].kind(), GeometryKind::LineString);
        assert_eq!(polygon.rings()[1].kind(), GeometryKind::CircularString);

        let tin = read("TIN (((0 0, 1 0, 0 1, 0 0)))");
        let Geometry::PolyhedralSurface(tin) = tin else {
            panic!("tin expected");
        };
        assert!(tin.is_tin());
        assert!(tin.faces()[0].is_triangle());

        let points = read("MULTIPOINT (1 2, 3 4)");
        assert_eq!(points.num_points(), 2);
    }

    #[test]
    fn implicit_elements_of_curve_and_surface_containers() {
        let text = "COMPOUNDCURVE ((0 0, 1 1), CIRCULARSTRING (1 1, 2 2, 3 1), (3 1, 4 0))";
        let Geometry::CompoundCurve(curve) = read(text) else {
            panic!("compound curve expected");
        };
        let kinds: Vec<GeometryKind> = curve.segments().iter().map(GeometryNode::kind).collect();
        assert_eq!(
            kinds,
            [GeometryKind::LineString, GeometryKind::CircularString, GeometryKind::LineString]
        );

        let text = "MULTICURVE ((0 0, 1 1), CIRCULARSTRING (1 1, 2 2, 3 1))";
        let Geometry::GeometryCollection(curves) = read(text) else {
            panic!("collection expected");
        };
        let kinds: Vec<GeometryKind> = curves.geometries().iter().map(Geometry::kind).collect();
        assert_eq!(kinds, [GeometryKind::LineString, GeometryKind::CircularString]);
        assert_eq!(curves.extended().kind(), GeometryKind::MultiCurve);

        let text = "MULTISURFACE (((0 0, 1 0, 0 1, 0 0)), CURVEPOLYGON ((0 0, 4 0, 0 4, 0 0)))";
        let Geometry::GeometryCollection(surfaces) = read(text) else {
            panic!("collection expected");
        };
        let kinds: Vec<GeometryKind> = surfaces.geometries().iter().map(Geometry::kind).collect();
        assert_eq!(kinds, [GeometryKind::Polygon, GeometryKind::CurvePolygon]);
        assert_eq!(surfaces.extended().kind(), GeometryKind::MultiSurface);

        let text = "POLYHEDRALSURFACE Z (((0 0 0, 1 0 0, 0 1 0, 0 0 0)))";
        let Geometry::PolyhedralSurface(surface) = read(text) else {
            panic!("polyhedral surface expected");
        };
        assert!(!surface.is_tin());
        assert_eq!(surface.faces()[0].kind(), GeometryKind::Polygon);
        assert!(surface.faces()[0].has_z());
    }

    #[test]
    fn collections_require_keywords() {
        assert_matches!(
            WktReader::default().read("GEOMETRYCOLLECTION ((0 0, 1 1))"),
            Err(CodecError::MalformedToken { offset: 20, .. })
        );
    }

    #[test]
    fn non_finite_ordinates() {
        let Geometry::Point(point) = read("POINT (NaN -inf)") else {
            panic!("point expected");
        };
        assert!(point.x().is_nan());
        assert_eq!(point.y(), f64::NEG_INFINITY);

        let Geometry::Point(point) = read("POINT (1e-3 .5)") else {
            panic!("point expected");
        };
        assert_abs_diff_eq!(point.x(), 0.001);
        assert_abs_diff_eq!(point.y(), 0.5);
    }

    #[test]
    fn errors() {
        let reader = WktReader::default();
        assert_matches!(
            reader.read("CURVE (0 0, 1 1)"),
            Err(CodecError::Kind {
                offset: 0,
                source: GeometryError::AbstractKind(GeometryKind::Curve)
            })
        );
        assert_matches!(
            reader.read("POINT (1 2) POINT"),
            Err(CodecError::MalformedToken { offset: 12, expected, .. })
                if expected == "end of input"
        );
        assert_matches!(
            reader.read("POINT (1"),
            Err(CodecError::MalformedToken { offset: 8, found, .. }) if found.is_empty()
        );
        assert_matches!(
            reader.read("POINT Z (1 2)"),
            Err(CodecError::MalformedToken { offset: 12, found, .. }) if found == ")"
        );
        assert_matches!(
            reader.read("SQUARE (1 2)"),
            Err(CodecError::MalformedToken { offset: 0, found, .. }) if found == "SQUARE"
        );
        assert_matches!(
            reader.read("MULTIPOLYGON (POINT (1 2))"),
            Err(CodecError::TypeMismatch {
                offset: 14,
                expected: GeometryKind::Polygon,
                actual: GeometryKind::Point
            })
        );
        assert_matches!(
            reader.read_typed("POINT (1 2)", GeometryKind::Curve),
            Err(CodecError::TypeMismatch { offset: 0, .. })
        );
    }

    #[test]
    fn depth_limit() {
        let text = "GEOMETRYCOLLECTION (GEOMETRYCOLLECTION (GEOMETRYCOLLECTION EMPTY))";
        assert!(WktReader::default().with_max_depth(2).read(text).is_ok());
        assert_matches!(
            WktReader::default().with_max_depth(1).read(text),
            Err(CodecError::DepthLimitExceeded(1))
        );
    }

    #[test]
    fn filter_drops_emptied_containers() {
        let no_nan = |_: Option<GeometryKind>, g: &Geometry| match g {
            Geometry::Point(p) => !p.x().is_nan(),
            _ => true,
        };
        let reader = WktReader::default().with_filter(&no_nan);

        let geometry = reader
            .read("MULTIPOLYGON (((NaN 0, NaN 1)), ((0 0, 1 0, 0 1, 0 0)))")
            .unwrap()
            .unwrap();
        let Geometry::MultiPolygon(polygons) = geometry else {
            panic!("multi polygon expected");
        };
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons.elements()[0].rings()[0].len(), 4);

        assert_eq!(reader.read("LINESTRING (NaN 0, NaN 1)").unwrap(), None);
        assert_eq!(reader.read("POINT (NaN 0)").unwrap(), None);
    }
}
