//! Procedural geometry.
//!
//! All generators produce geometry in scene space (Y up). Flat shapes lie
//! in the XZ plane at a given elevation and face +Y.
//!
//! - `fill` triangulates polygons with holes
//! - `edges` extracts outline segments from a triangle mesh
//! - `tube` sweeps a circular cross-section along a path
//! - `disk` builds flat circles for backdrops

mod disk;
mod edges;
mod fill;
mod tube;

use cgmath::{InnerSpace, Point3, Vector3};

pub use disk::disk_geometry;
pub use edges::edges_geometry;
pub use fill::shape_geometry;
pub use tube::tube_geometry;

pub(crate) fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len2 = v.magnitude2();
    if len2 > f32::EPSILON * f32::EPSILON {
        v / len2.sqrt()
    } else {
        Vector3::new(0.0, 0.0, 0.0)
    }
}

/// Positions of a line strip through `points`.
pub fn polyline(points: &[Point3<f32>]) -> Vec<[f32; 3]> {
    points.iter().map(|p| (*p).into()).collect()
}
