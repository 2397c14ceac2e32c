//! Heterogeneous geometry collections and the extended collection mechanism.
//!
//! `GeometryCollection`, `MultiCurve` and `MultiSurface` all share the same structure: an ordered
//! set of arbitrary geometries. Structurally a collection is therefore always a
//! `GeometryCollection`. The kind it *reports* can be overridden by an asserted kind, which is how
//! a `MultiCurve` or `MultiSurface` keeps its identity when it is written out and read back (see
//! [`GeometryCollection::extended`]).

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, GeometryElement, MultiLineString, MultiPoint, MultiPolygon};
use crate::dimensions::Dimensions;
use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryNode};
use crate::kind::GeometryKind;

/// Narrow views a collection can be used as. Each flag is true if every element satisfies the
/// corresponding capability, so all flags are set for an empty collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// All elements are points.
    pub points: bool,
    /// All elements are line strings.
    pub line_strings: bool,
    /// All elements are polygons.
    pub polygons: bool,
    /// All elements are curves.
    pub curves: bool,
    /// All elements are surfaces.
    pub surfaces: bool,
}

impl Capabilities {
    const ALL: Self = Self {
        points: true,
        line_strings: true,
        polygons: true,
        curves: true,
        surfaces: true,
    };

    fn of(kind: GeometryKind) -> Self {
        Self {
            points: kind.is_a(GeometryKind::Point),
            line_strings: kind.is_a(GeometryKind::LineString),
            polygons: kind.is_a(GeometryKind::Polygon),
            curves: kind.is_curve(),
            surfaces: kind.is_surface(),
        }
    }

    fn and(self, other: Self) -> Self {
        Self {
            points: self.points && other.points,
            line_strings: self.line_strings && other.line_strings,
            polygons: self.polygons && other.polygons,
            curves: self.curves && other.curves,
            surfaces: self.surfaces && other.surfaces,
        }
    }

    fn allows(self, kind: GeometryKind) -> bool {
        match kind {
            GeometryKind::MultiCurve => self.curves,
            GeometryKind::MultiSurface => self.surfaces,
            _ => true,
        }
    }

    fn extended_kind(self) -> GeometryKind {
        if self.curves {
            GeometryKind::MultiCurve
        } else if self.surfaces {
            GeometryKind::MultiSurface
        } else {
            GeometryKind::GeometryCollection
        }
    }
}

/// Ordered set of arbitrary geometries, optionally reporting an asserted collection kind.
///
/// The narrow-view capabilities are kept up to date as elements are added, so queries like
/// [`GeometryCollection::is_multi_curve`] never rescan the elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    has_z: bool,
    has_m: bool,
    geometries: Vec<Geometry>,
    capabilities: Capabilities,
    asserted_kind: Option<GeometryKind>,
}

impl Default for GeometryCollection {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl GeometryCollection {
    /// Creates an empty collection.
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            geometries: vec![],
            capabilities: Capabilities::ALL,
            asserted_kind: None,
        }
    }

    /// Creates a collection with the given dimensionality and elements.
    pub fn with_geometries(has_z: bool, has_m: bool, geometries: Vec<Geometry>) -> Self {
        let capabilities = geometries
            .iter()
            .fold(Capabilities::ALL, |acc, g| acc.and(Capabilities::of(g.kind())));
        Self {
            has_z,
            has_m,
            geometries,
            capabilities,
            asserted_kind: None,
        }
    }

    /// Creates a collection taking the dimensionality that all `geometries` share.
    pub fn from_geometries(geometries: Vec<Geometry>) -> Self {
        let dimensions = Dimensions::common(geometries.iter().map(GeometryNode::dimensions));
        Self::with_geometries(dimensions.has_z(), dimensions.has_m(), geometries)
    }

    /// Turns the collection into an extended collection: the reported kind is derived from the
    /// elements once, `MultiCurve` if all of them are curves, `MultiSurface` if all of them are
    /// surfaces, `GeometryCollection` otherwise. An empty collection reports `MultiCurve`.
    pub fn extended(mut self) -> Self {
        self.asserted_kind = Some(self.capabilities.extended_kind());
        self
    }

    /// Explicitly sets the reported kind. Only `GeometryCollection`, `MultiCurve` and
    /// `MultiSurface` can be asserted, and the elements must satisfy the asserted kind.
    pub fn with_asserted_kind(mut self, kind: GeometryKind) -> Result<Self, GeometryError> {
        let expected = match kind {
            GeometryKind::GeometryCollection => GeometryKind::Geometry,
            GeometryKind::MultiCurve => GeometryKind::Curve,
            GeometryKind::MultiSurface => GeometryKind::Surface,
            other => return Err(GeometryError::InvalidAssertedKind(other)),
        };

        if let Some(offending) = self.geometries.iter().find(|g| !g.kind().is_a(expected)) {
            return Err(GeometryError::TypeMismatch {
                expected,
                actual: offending.kind(),
            });
        }

        self.asserted_kind = Some(kind);
        Ok(self)
    }

    /// Asserted kind, `None` for a plain collection.
    pub fn asserted_kind(&self) -> Option<GeometryKind> {
        self.asserted_kind
    }

    /// Drops the asserted kind.
    pub fn into_plain(mut self) -> Self {
        self.asserted_kind = None;
        self
    }

    /// Elements of the collection.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Appends an element. If the element contradicts the asserted kind, the asserted kind is
    /// derived anew from all the elements.
    pub fn push(&mut self, geometry: Geometry) {
        self.capabilities = self.capabilities.and(Capabilities::of(geometry.kind()));
        self.geometries.push(geometry);

        if let Some(kind) = self.asserted_kind {
            if !self.capabilities.allows(kind) {
                self.asserted_kind = Some(self.capabilities.extended_kind());
            }
        }
    }

    /// Consumes the collection returning its elements.
    pub fn into_geometries(self) -> Vec<Geometry> {
        self.geometries
    }

    /// Narrow-view capabilities of the collection.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// All elements are points.
    pub fn is_multi_point(&self) -> bool {
        self.capabilities.points
    }

    /// All elements are line strings (including circular strings).
    pub fn is_multi_line_string(&self) -> bool {
        self.capabilities.line_strings
    }

    /// All elements are polygons (including triangles).
    pub fn is_multi_polygon(&self) -> bool {
        self.capabilities.polygons
    }

    /// All elements are curves.
    pub fn is_multi_curve(&self) -> bool {
        self.capabilities.curves
    }

    /// All elements are surfaces.
    pub fn is_multi_surface(&self) -> bool {
        self.capabilities.surfaces
    }

    /// Converts the collection into a multi point, or returns it back if some elements are not
    /// points.
    pub fn into_multi_point(self) -> Result<MultiPoint, Self> {
        if self.is_multi_point() {
            Ok(self.narrow())
        } else {
            Err(self)
        }
    }

    /// Converts the collection into a multi line string, or returns it back if some elements are
    /// not line strings.
    pub fn into_multi_line_string(self) -> Result<MultiLineString, Self> {
        if self.is_multi_line_string() {
            Ok(self.narrow())
        } else {
            Err(self)
        }
    }

    /// Converts the collection into a multi polygon, or returns it back if some elements are not
    /// polygons.
    pub fn into_multi_polygon(self) -> Result<MultiPolygon, Self> {
        if self.is_multi_polygon() {
            Ok(self.narrow())
        } else {
            Err(self)
        }
    }

    fn narrow<E: GeometryElement>(self) -> Collection<E> {
        let elements = self
            .geometries
            .into_iter()
            .filter_map(|g| E::try_from_geometry(g).ok())
            .collect();
        Collection::with_elements(self.has_z, self.has_m, elements)
    }
}

impl GeometryNode for GeometryCollection {
    fn kind(&self) -> GeometryKind {
        self.asserted_kind.unwrap_or(GeometryKind::GeometryCollection)
    }

    fn has_z(&self) -> bool {
        self.has_z
    }

    fn has_m(&self) -> bool {
        self.has_m
    }

    fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

impl From<Vec<Geometry>> for GeometryCollection {
    fn from(value: Vec<Geometry>) -> Self {
        Self::from_geometries(value)
    }
}

impl FromIterator<Geometry> for GeometryCollection {
    fn from_iter<T: IntoIterator<Item = Geometry>>(iter: T) -> Self {
        Self::from_geometries(iter.into_iter().collect())
    }
}
