use anyhow::{anyhow, bail};
use cgmath::Vector2;

use crate::data_structures::model::{Mesh, ModelVertex};

/// Removes repeated consecutive positions, including the closing position GeoJSON
/// repeats at the end of a ring.
fn distinct_ring(ring: &[Vector2<f32>]) -> Vec<Vector2<f32>> {
    let mut ring = ring.to_vec();
    ring.dedup();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/**
 * Triangulates a planar polygon with holes and lays it flat at `elevation`.
 *
 * Planar `(x, y)` maps to scene `(x, elevation, y)`. Every triangle is wound so that
 * its face normal points up, texture coordinates are the planar coordinates. Holes are
 * cut out of the fill: no triangle covers area inside a hole ring.
 *
 * Fails when the exterior or any hole has fewer than three distinct positions.
 */
pub fn shape_geometry(
    exterior: &[Vector2<f32>],
    holes: &[Vec<Vector2<f32>>],
    elevation: f32,
) -> anyhow::Result<Mesh> {
    let exterior = distinct_ring(exterior);
    if exterior.len() < 3 {
        bail!(
            "polygon exterior needs at least 3 distinct positions, got {}",
            exterior.len()
        );
    }

    let mut rings = vec![exterior];
    for (idx, hole) in holes.iter().enumerate() {
        let hole = distinct_ring(hole);
        if hole.len() < 3 {
            bail!(
                "polygon hole #{idx} needs at least 3 distinct positions, got {}",
                hole.len()
            );
        }
        rings.push(hole);
    }

    let mut flat = Vec::new();
    let mut hole_indices = Vec::new();
    for (idx, ring) in rings.iter().enumerate() {
        if idx > 0 {
            hole_indices.push(flat.len() / 2);
        }
        for p in ring.iter() {
            flat.push(p.x as f64);
            flat.push(p.y as f64);
        }
    }

    let triangles = earcutr::earcut(&flat, &hole_indices, 2)
        .map_err(|e| anyhow!("polygon triangulation failed: {e:?}"))?;

    let vertices: Vec<ModelVertex> = rings
        .iter()
        .flat_map(|ring| ring.iter())
        .map(|p| ModelVertex {
            position: [p.x, elevation, p.y],
            tex_coords: [p.x, p.y],
            normal: [0.0, 1.0, 0.0],
        })
        .collect();

    let mut indices = Vec::with_capacity(triangles.len());
    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let pa = vertices[a].position;
        let pb = vertices[b].position;
        let pc = vertices[c].position;
        // y component of (b - a) x (c - a)
        let up = (pb[2] - pa[2]) * (pc[0] - pa[0]) - (pb[0] - pa[0]) * (pc[2] - pa[2]);
        if up >= 0.0 {
            indices.extend([a as u32, b as u32, c as u32]);
        } else {
            indices.extend([a as u32, c as u32, b as u32]);
        }
    }

    Ok(Mesh::new(vertices, indices))
}
