use bytes::BufMut;
use log::debug;
use serde::{Deserialize, Serialize};
use sfgeom_types::type_code;
use sfgeom_types::{
    CompoundCurve, Curve, Dimensions, Geometry, GeometryKind, GeometryNode, LineString, Point,
    Polygon,
};

use super::ByteOrder;
use crate::error::CodecError;

/// Writer of the binary format.
///
/// Every node is written in the byte order of the writer. Type codes always use the extended
/// numbering, the legacy 2.5D codes are never produced. Ordinates of points follow the flags of the
/// node they belong to: a missing ordinate is written as NaN and an ordinate the node does not
/// declare is dropped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WkbWriter {
    order: ByteOrder,
}

impl WkbWriter {
    /// Creates a writer producing the given byte order.
    pub fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    /// Byte order of the produced output.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Encodes a geometry into a new buffer.
    pub fn encode(&self, geometry: &Geometry) -> Result<Vec<u8>, CodecError> {
        let mut buf = vec![];
        self.write(geometry, &mut buf)?;
        Ok(buf)
    }

    /// Appends the encoded geometry to `buf`.
    pub fn write(&self, geometry: &Geometry, buf: &mut impl BufMut) -> Result<(), CodecError> {
        let mut sink = Sink {
            buf,
            order: self.order,
            offset: 0,
        };
        sink.geometry(geometry)
    }
}

struct Sink<'a, B> {
    buf: &'a mut B,
    order: ByteOrder,
    offset: usize,
}

impl<B: BufMut> Sink<'_, B> {
    fn put_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_u32(value),
            ByteOrder::LittleEndian => self.buf.put_u32_le(value),
        }
        self.offset += 4;
    }

    fn put_f64(&mut self, value: f64) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_f64(value),
            ByteOrder::LittleEndian => self.buf.put_f64_le(value),
        }
        self.offset += 8;
    }

    fn count(&mut self, len: usize) -> Result<(), CodecError> {
        let count = i32::try_from(len).map_err(|_| CodecError::CountOverflow(len))?;
        match self.order {
            ByteOrder::BigEndian => self.buf.put_i32(count),
            ByteOrder::LittleEndian => self.buf.put_i32_le(count),
        }
        self.offset += 4;
        Ok(())
    }

    fn header(&mut self, kind: GeometryKind, has_z: bool, has_m: bool) -> Result<(), CodecError> {
        let offset = self.offset;
        let code = type_code::code(kind, has_z, has_m)
            .map_err(|source| CodecError::Kind { offset, source })?;

        self.buf.put_u8(self.order.marker());
        self.offset += 1;
        self.put_u32(code);
        Ok(())
    }

    fn point_ordinates(&mut self, point: &Point, has_z: bool, has_m: bool) {
        if (point.has_z() && !has_z) || (point.has_m() && !has_m) {
            debug!(
                "point at offset {} carries {:?} ordinates, the node declares {:?}",
                self.offset,
                point.dimensions(),
                Dimensions::from_flags(has_z, has_m)
            );
        }

        self.put_f64(point.x());
        self.put_f64(point.y());
        if has_z {
            self.put_f64(point.z().unwrap_or(f64::NAN));
        }
        if has_m {
            self.put_f64(point.m().unwrap_or(f64::NAN));
        }
    }

    fn points(&mut self, points: &[Point], has_z: bool, has_m: bool) -> Result<(), CodecError> {
        self.count(points.len())?;
        for point in points {
            self.point_ordinates(point, has_z, has_m);
        }
        Ok(())
    }

    fn point(&mut self, point: &Point) -> Result<(), CodecError> {
        self.header(GeometryKind::Point, point.has_z(), point.has_m())?;
        self.point_ordinates(point, point.has_z(), point.has_m());
        Ok(())
    }

    fn line_string(&mut self, line: &LineString) -> Result<(), CodecError> {
        self.header(line.kind(), line.has_z(), line.has_m())?;
        self.points(line.points(), line.has_z(), line.has_m())
    }

    fn polygon(&mut self, polygon: &Polygon) -> Result<(), CodecError> {
        self.header(polygon.kind(), polygon.has_z(), polygon.has_m())?;
        self.count(polygon.rings().len())?;
        for ring in polygon.rings() {
            self.points(ring.points(), polygon.has_z(), polygon.has_m())?;
        }
        Ok(())
    }

    fn curve(&mut self, curve: &Curve) -> Result<(), CodecError> {
        match curve {
            Curve::LineString(line) => self.line_string(line),
            Curve::CompoundCurve(compound) => self.compound_curve(compound),
        }
    }

    fn compound_curve(&mut self, curve: &CompoundCurve) -> Result<(), CodecError> {
        self.elements(curve, curve.segments(), Self::line_string)
    }

    fn elements<E>(
        &mut self,
        node: &impl GeometryNode,
        elements: &[E],
        mut write: impl FnMut(&mut Self, &E) -> Result<(), CodecError>,
    ) -> Result<(), CodecError> {
        self.header(node.kind(), node.has_z(), node.has_m())?;
        self.count(elements.len())?;
        for element in elements {
            write(self, element)?;
        }
        Ok(())
    }

    fn geometry(&mut self, geometry: &Geometry) -> Result<(), CodecError> {
        match geometry {
            Geometry::Point(p) => self.point(p),
            Geometry::LineString(l) => self.line_string(l),
            Geometry::Polygon(p) => self.polygon(p),
            Geometry::MultiPoint(v) => self.elements(v, v.elements(), Self::point),
            Geometry::MultiLineString(v) => self.elements(v, v.elements(), Self::line_string),
            Geometry::MultiPolygon(v) => self.elements(v, v.elements(), Self::polygon),
            Geometry::GeometryCollection(v) => self.elements(v, v.geometries(), Self::geometry),
            Geometry::CompoundCurve(v) => self.compound_curve(v),
            Geometry::CurvePolygon(v) => self.elements(v, v.rings(), Self::curve),
            Geometry::PolyhedralSurface(v) => self.elements(v, v.faces(), Self::polygon),
        }
    }
}
