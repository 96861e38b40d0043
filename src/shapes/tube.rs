use std::f32::consts::TAU;

use cgmath::{MetricSpace, Point3, Vector3};

use crate::{
    data_structures::model::{Mesh, ModelVertex},
    shapes::normalize_or_zero,
};

/// Direction at each path point, averaged over the segments meeting there.
fn path_tangents(path: &[Point3<f32>]) -> Vec<Vector3<f32>> {
    let segments: Vec<Vector3<f32>> = path
        .windows(2)
        .map(|pair| normalize_or_zero(pair[1] - pair[0]))
        .collect();
    let last = segments.len() - 1;
    (0..path.len())
        .map(|i| normalize_or_zero(segments[i.saturating_sub(1)] + segments[i.min(last)]))
        .collect()
}

/// Unit axes spanning the cross-section plane of `tangent`.
fn cross_section_axes(tangent: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let reference = if tangent.y.abs() > 0.99 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    let side = normalize_or_zero(tangent.cross(reference));
    (side, normalize_or_zero(tangent.cross(side)))
}

/**
 * Sweeps a circular cross-section of `radius` along `path`.
 *
 * One ring of `radial_segments + 1` vertices (the seam vertex is duplicated for texture
 * wrapping) is placed at every path point, oriented perpendicular to the averaged
 * direction of the adjacent segments. `u` runs around the tube, `v` along its length.
 * Paths with fewer than two points produce an empty mesh.
 */
pub fn tube_geometry(path: &[Point3<f32>], radius: f32, radial_segments: u32) -> Mesh {
    if path.len() < 2 {
        log::warn!("tube needs at least 2 path points, got {}", path.len());
        return Mesh::default();
    }

    let seg = radial_segments.max(3);
    let step = TAU / seg as f32;
    let travelled: Vec<f32> = std::iter::once(0.0)
        .chain(path.windows(2).scan(0.0, |length, pair| {
            *length += pair[0].distance(pair[1]);
            Some(*length)
        }))
        .collect();
    let length = travelled.last().copied().unwrap_or_default().max(0.001);

    let vertices: Vec<ModelVertex> = path
        .iter()
        .zip(path_tangents(path))
        .zip(&travelled)
        .flat_map(|((&center, tangent), &along)| {
            let (side, up) = cross_section_axes(tangent);
            let v = along / length;
            (0..=seg).map(move |s| {
                let (sin, cos) = (s as f32 * step).sin_cos();
                let offset = (side * cos + up * sin) * radius;
                ModelVertex {
                    position: (center + offset).into(),
                    tex_coords: [s as f32 / seg as f32, v],
                    normal: normalize_or_zero(offset).into(),
                }
            })
        })
        .collect();

    let ring = seg + 1;
    let indices: Vec<u32> = (0..(path.len() - 1) as u32)
        .flat_map(|i| {
            (0..seg).flat_map(move |s| {
                let a = i * ring + s;
                let next = a + ring;
                [a, next, a + 1, a + 1, next, next + 1]
            })
        })
        .collect();

    Mesh::new(vertices, indices)
}
