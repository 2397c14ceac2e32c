//! Pruning of decoded geometries.
//!
//! Both codecs accept a [`GeometryFilter`] that is consulted for every point and every sub-geometry
//! as soon as it is fully built. A rejected node is left out of its parent. A container that had
//! elements in the input but lost all of them is dropped as well, and a rejected top level geometry
//! makes the decode return nothing.

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::kind::GeometryKind;
use crate::point::Point;

/// Decides whether a decoded node is kept.
pub trait GeometryFilter {
    /// Returns `true` to keep `geometry`. `containing` is the kind of the node the geometry is
    /// going to be added to, `None` for the top level geometry.
    fn filter(&self, containing: Option<GeometryKind>, geometry: &Geometry) -> bool;
}

impl<F> GeometryFilter for F
where
    F: Fn(Option<GeometryKind>, &Geometry) -> bool,
{
    fn filter(&self, containing: Option<GeometryKind>, geometry: &Geometry) -> bool {
        self(containing, geometry)
    }
}

/// Values accepted by [`FiniteFilter`] in addition to finite numbers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiniteFilterType {
    /// Only finite values.
    #[default]
    Finite,
    /// Finite values and NaN.
    FiniteAndNan,
    /// Finite values and positive or negative infinity.
    FiniteAndInfinite,
}

impl FiniteFilterType {
    fn accepts(self, value: f64) -> bool {
        match self {
            FiniteFilterType::Finite => value.is_finite(),
            FiniteFilterType::FiniteAndNan => value.is_finite() || value.is_nan(),
            FiniteFilterType::FiniteAndInfinite => !value.is_nan(),
        }
    }
}

/// Filter that drops points with non-finite ordinates. Non-point geometries are always kept.
///
/// `x` and `y` are always checked. `z` and `m` are checked only when enabled and present in the
/// point.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiniteFilter {
    filter_type: FiniteFilterType,
    check_z: bool,
    check_m: bool,
}

impl FiniteFilter {
    /// Creates a filter checking `x` and `y` only.
    pub fn new(filter_type: FiniteFilterType) -> Self {
        Self {
            filter_type,
            check_z: false,
            check_m: false,
        }
    }

    /// Sets whether `z` is checked.
    pub fn with_z(self, check_z: bool) -> Self {
        Self { check_z, ..self }
    }

    /// Sets whether `m` is checked.
    pub fn with_m(self, check_m: bool) -> Self {
        Self { check_m, ..self }
    }

    /// Which non-finite values are accepted.
    pub fn filter_type(&self) -> FiniteFilterType {
        self.filter_type
    }

    /// Whether the point passes the filter.
    pub fn accepts(&self, point: &Point) -> bool {
        let accepts = |v: f64| self.filter_type.accepts(v);
        accepts(point.x())
            && accepts(point.y())
            && (!self.check_z || point.z().map_or(true, accepts))
            && (!self.check_m || point.m().map_or(true, accepts))
    }
}

impl GeometryFilter for FiniteFilter {
    fn filter(&self, _containing: Option<GeometryKind>, geometry: &Geometry) -> bool {
        match geometry {
            Geometry::Point(point) => self.accepts(point),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_string::LineString;

    #[test]
    fn finite_modes() {
        let nan = Point::new(f64::NAN, 1.0);
        let inf = Point::new(1.0, f64::NEG_INFINITY);
        let finite = Point::new(1.0, 2.0);

        let filter = FiniteFilter::default();
        assert!(filter.accepts(&finite));
        assert!(!filter.accepts(&nan));
        assert!(!filter.accepts(&inf));

        let filter = FiniteFilter::new(FiniteFilterType::FiniteAndNan);
        assert!(filter.accepts(&nan));
        assert!(!filter.accepts(&inf));

        let filter = FiniteFilter::new(FiniteFilterType::FiniteAndInfinite);
        assert!(!filter.accepts(&nan));
        assert!(filter.accepts(&inf));
    }

    #[test]
    fn z_and_m_checked_only_when_enabled() {
        let point = Point::new_zm(1.0, 2.0, f64::NAN, f64::INFINITY);
        assert!(FiniteFilter::default().accepts(&point));
        assert!(!FiniteFilter::default().with_z(true).accepts(&point));
        assert!(!FiniteFilter::default().with_m(true).accepts(&point));

        let flat = Point::new(1.0, 2.0);
        assert!(FiniteFilter::default().with_z(true).with_m(true).accepts(&flat));
    }

    #[test]
    fn non_points_are_kept() {
        let line = Geometry::LineString(LineString::from_points(vec![Point::new(f64::NAN, 0.0)]));
        assert!(FiniteFilter::default().filter(None, &line));
    }

    #[test]
    fn closures_are_filters() {
        let no_points = |_: Option<GeometryKind>, g: &Geometry| !matches!(g, Geometry::Point(_));
        assert!(!no_points.filter(Some(GeometryKind::LineString), &Point::new(0.0, 0.0).into()));
    }
}
