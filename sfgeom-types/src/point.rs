use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;

/// A single position. `z` is present iff the point has Z, `m` iff it has M, so the ordinates always
/// match the point's dimensionality.
///
/// An empty point (`POINT EMPTY`) is represented by NaN `x` and `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
}

impl Point {
    /// Creates a 2d point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Creates a point with elevation.
    pub const fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    /// Creates a point with linear reference.
    pub const fn new_m(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    /// Creates a point with elevation and linear reference.
    pub const fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Creates a point from optional ordinates.
    pub const fn from_ordinates(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Self { x, y, z, m }
    }

    /// Creates an empty point with the given dimensionality. All ordinates are NaN.
    pub fn empty(has_z: bool, has_m: bool) -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            z: has_z.then_some(f64::NAN),
            m: has_m.then_some(f64::NAN),
        }
    }

    /// X ordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y ordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Elevation, if the point has Z.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Linear reference, if the point has M.
    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Whether the point carries Z.
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Whether the point carries M.
    pub fn has_m(&self) -> bool {
        self.m.is_some()
    }

    /// Dimensionality given by the ordinates the point carries.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_flags(self.has_z(), self.has_m())
    }

    /// True for `POINT EMPTY`.
    pub fn is_empty(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new_z(x, y, z)
    }
}
