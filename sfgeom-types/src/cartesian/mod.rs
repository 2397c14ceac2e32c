//! Planar algorithms over the XY ordinates of the geometry tree.

pub mod centroid;
pub mod orient;
pub mod segment;
pub mod simple;

pub use orient::Orientation;
pub use segment::Segment;
