use bytes::Buf;
use log::{debug, trace};
use sfgeom_types::error::GeometryError;
use sfgeom_types::filter::GeometryFilter;
use sfgeom_types::type_code;
use sfgeom_types::{
    CompoundCurve, Curve, CurvePolygon, Geometry, GeometryCollection, GeometryElement, GeometryKind,
    GeometryNode, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    PolyhedralSurface,
};

use super::cursor::ByteCursor;
use super::{ByteOrder, LEGACY_Z_FLAG};
use crate::error::CodecError;
use crate::DEFAULT_MAX_DEPTH;

/// Smallest possible encoded geometry node: byte order marker and type code.
const MIN_NODE_SIZE: usize = 5;

/// Reader of the binary format.
///
/// ```
/// use sfgeom_codec::wkb::WkbReader;
/// use sfgeom_types::filter::{FiniteFilter, FiniteFilterType};
///
/// let bytes: [u8; 21] = [
///     0, 0, 0, 0, 1, 0x3F, 0xF0, 0, 0, 0, 0, 0, 0, 0x7F, 0xF8, 0, 0, 0, 0, 0, 0,
/// ];
/// let filter = FiniteFilter::new(FiniteFilterType::Finite);
/// let reader = WkbReader::default().with_filter(&filter);
///
/// assert_eq!(reader.read(&bytes[..]).unwrap(), None);
/// ```
pub struct WkbReader<'a> {
    filter: Option<&'a dyn GeometryFilter>,
    max_depth: usize,
}

impl Default for WkbReader<'_> {
    fn default() -> Self {
        Self {
            filter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a> WkbReader<'a> {
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

    /// Reads a geometry from the start of `bytes`. Returns `None` if the geometry was discarded by
    /// the filter.
    pub fn read(&self, bytes: impl Buf) -> Result<Option<Geometry>, CodecError> {
        self.read_from(&mut ByteCursor::new(bytes))
    }

    /// Reads a geometry that must be an instance of `expected`.
    pub fn read_typed(
        &self,
        bytes: impl Buf,
        expected: GeometryKind,
    ) -> Result<Option<Geometry>, CodecError> {
        self.read_geometry(&mut ByteCursor::new(bytes), None, expected, 0)
    }

    /// Reads a geometry starting at the position of the cursor, leaving the cursor right after its
    /// end.
    pub fn read_from<B: Buf>(
        &self,
        cursor: &mut ByteCursor<B>,
    ) -> Result<Option<Geometry>, CodecError> {
        self.read_geometry(cursor, None, GeometryKind::Geometry, 0)
    }

    fn read_geometry<B: Buf>(
        &self,
        cursor: &mut ByteCursor<B>,
        containing: Option<GeometryKind>,
        expected: GeometryKind,
        depth: usize,
    ) -> Result<Option<Geometry>, CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthLimitExceeded(self.max_depth));
        }

        let marker_offset = cursor.offset();
        let marker = cursor.read_u8()?;
        let order = ByteOrder::from_marker(marker).ok_or(CodecError::InvalidByteOrder {
            offset: marker_offset,
            value: marker,
        })?;
        let mut guard = cursor.scoped_order(order);
        let cursor: &mut ByteCursor<B> = &mut guard;

        let code_offset = cursor.offset();
        let code = cursor.read_u32()?;
        let (kind, has_z, has_m) = resolve_type_code(code).map_err(|source| CodecError::Kind {
            offset: code_offset,
            source,
        })?;
        if !kind.is_a(expected) {
            return Err(CodecError::TypeMismatch {
                offset: code_offset,
                expected,
                actual: kind,
            });
        }

        use GeometryKind as K;
        let geometry: Option<Geometry> = match kind {
            K::Point => Some(Geometry::from(read_point(cursor, has_z, has_m)?)),
            K::LineString | K::CircularString => self
                .read_line(cursor, kind, has_z, has_m)?
                .map(Geometry::from),
            K::Polygon | K::Triangle => self
                .read_polygon(cursor, kind, has_z, has_m)?
                .map(Geometry::from),
            K::MultiPoint => self
                .read_elements(cursor, kind, depth)?
                .map(|e| Geometry::from(MultiPoint::with_elements(has_z, has_m, e))),
            K::MultiLineString => self
                .read_elements(cursor, kind, depth)?
                .map(|e| Geometry::from(MultiLineString::with_elements(has_z, has_m, e))),
            K::MultiPolygon => self
                .read_elements(cursor, kind, depth)?
                .map(|e| Geometry::from(MultiPolygon::with_elements(has_z, has_m, e))),
            K::PolyhedralSurface | K::Tin => {
                self.read_elements(cursor, kind, depth)?.map(|faces| {
                    let surface = PolyhedralSurface::with_faces(has_z, has_m, faces);
                    Geometry::from(if kind == K::Tin {
                        surface.into_tin()
                    } else {
                        surface
                    })
                })
            }
            K::CompoundCurve => self
                .read_elements::<LineString, _>(cursor, kind, depth)?
                .map(|e| Geometry::from(CompoundCurve::with_segments(has_z, has_m, e))),
            K::CurvePolygon => self
                .read_elements::<Curve, _>(cursor, kind, depth)?
                .map(|e| Geometry::from(CurvePolygon::with_rings(has_z, has_m, e))),
            K::GeometryCollection | K::MultiCurve | K::MultiSurface => self
                .read_elements::<Geometry, _>(cursor, kind, depth)?
                .map(|e| Geometry::from(GeometryCollection::with_geometries(has_z, has_m, e))),
            K::Geometry | K::Curve | K::Surface => {
                return Err(CodecError::Kind {
                    offset: code_offset,
                    source: GeometryError::AbstractKind(kind),
                })
            }
        };

        Ok(geometry.filter(|g| self.keep(containing, g)))
    }

    fn read_line<B: Buf>(
        &self,
        cursor: &mut ByteCursor<B>,
        kind: GeometryKind,
        has_z: bool,
        has_m: bool,
    ) -> Result<Option<LineString>, CodecError> {
        let count = read_count(cursor)?;
        let point_size = 8 * (2 + has_z as usize + has_m as usize);
        let mut points = Vec::with_capacity(count.min(cursor.remaining() / point_size));
        for _ in 0..count {
            let point = read_point(cursor, has_z, has_m)?;
            if self.keep(Some(kind), &Geometry::Point(point)) {
                points.push(point);
            }
        }

        if count > 0 && points.is_empty() {
            debug!("{kind} at offset {} emptied by the filter", cursor.offset());
            return Ok(None);
        }

        let line = LineString::with_points(has_z, has_m, points);
        Ok(Some(if kind == GeometryKind::CircularString {
            line.into_circular()
        } else {
            line
        }))
    }

    fn read_polygon<B: Buf>(
        &self,
        cursor: &mut ByteCursor<B>,
        kind: GeometryKind,
        has_z: bool,
        has_m: bool,
    ) -> Result<Option<Polygon>, CodecError> {
        let count = read_count(cursor)?;
        let mut rings = Vec::with_capacity(count.min(cursor.remaining() / 4));
        for _ in 0..count {
            let ring = self.read_line(cursor, GeometryKind::LineString, has_z, has_m)?;
            if let Some(ring) = ring.and_then(|r| self.keep_element(kind, r)) {
                rings.push(ring);
            }
        }

        if count > 0 && rings.is_empty() {
            debug!("{kind} at offset {} emptied by the filter", cursor.offset());
            return Ok(None);
        }

        let polygon = Polygon::with_rings(has_z, has_m, rings);
        Ok(Some(if kind == GeometryKind::Triangle {
            polygon.into_triangle()
        } else {
            polygon
        }))
    }

    fn read_elements<E: GeometryElement, B: Buf>(
        &self,
        cursor: &mut ByteCursor<B>,
        kind: GeometryKind,
        depth: usize,
    ) -> Result<Option<Vec<E>>, CodecError> {
        let count = read_count(cursor)?;
        let mut elements = Vec::with_capacity(count.min(cursor.remaining() / MIN_NODE_SIZE));
        for _ in 0..count {
            let offset = cursor.offset();
            let Some(geometry) = self.read_geometry(cursor, Some(kind), E::KIND, depth + 1)? else {
                continue;
            };
            let element = E::try_from_geometry(geometry).map_err(|g| CodecError::TypeMismatch {
                offset,
                expected: E::KIND,
                actual: g.kind(),
            })?;
            elements.push(element);
        }

        if count > 0 && elements.is_empty() {
            debug!("{kind} at offset {} emptied by the filter", cursor.offset());
            return Ok(None);
        }

        Ok(Some(elements))
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

fn resolve_type_code(code: u32) -> Result<(GeometryKind, bool, bool), GeometryError> {
    if code > LEGACY_Z_FLAG {
        let kind = GeometryKind::from_ordinal(code - LEGACY_Z_FLAG)?.concrete()?;
        trace!("legacy 2.5D type code {code:#x} read as {kind} Z");
        return Ok((kind, true, false));
    }

    type_code::decompose(code)
}

fn read_count<B: Buf>(cursor: &mut ByteCursor<B>) -> Result<usize, CodecError> {
    let offset = cursor.offset();
    let count = cursor.read_i32()?;
    usize::try_from(count).map_err(|_| CodecError::NegativeCount { offset, count })
}

fn read_point<B: Buf>(
    cursor: &mut ByteCursor<B>,
    has_z: bool,
    has_m: bool,
) -> Result<Point, CodecError> {
    let x = cursor.read_f64()?;
    let y = cursor.read_f64()?;
    let z = if has_z { Some(cursor.read_f64()?) } else { None };
    let m = if has_m { Some(cursor.read_f64()?) } else { None };

    Ok(Point::from_ordinates(x, y, z, m))
}
