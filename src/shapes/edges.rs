use std::collections::HashMap;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::data_structures::model::Mesh;

/// Positions closer than this are merged when matching shared edges.
const PRECISION: f32 = 1e-4;

type VertexKey = [i64; 3];

fn key(p: Point3<f32>) -> VertexKey {
    [
        (p.x / PRECISION).round() as i64,
        (p.y / PRECISION).round() as i64,
        (p.z / PRECISION).round() as i64,
    ]
}

struct EdgeRecord {
    from: Point3<f32>,
    to: Point3<f32>,
    normal: Vector3<f32>,
    faces: usize,
    emitted: bool,
}

/**
 * Extracts the visible outline of a triangle mesh as a line list.
 *
 * An edge is emitted when it belongs to a single triangle (a boundary, including hole
 * boundaries of a filled shape) or when the two triangles sharing it meet at an angle
 * of more than `threshold_deg`. Coplanar interior edges produced by triangulation are
 * dropped. Degenerate triangles are ignored. Output order follows first appearance in
 * the index buffer.
 */
pub fn edges_geometry(mesh: &Mesh, threshold_deg: f32) -> Vec<[f32; 3]> {
    let threshold_dot = threshold_deg.to_radians().cos();
    let mut order: Vec<(VertexKey, VertexKey)> = Vec::new();
    let mut edges: HashMap<(VertexKey, VertexKey), EdgeRecord> = HashMap::new();
    let mut segments = Vec::new();

    for tri in mesh.triangles() {
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        if normal.magnitude2() <= f32::EPSILON * f32::EPSILON {
            continue;
        }
        let normal = normal.normalize();
        let keys = tri.map(key);
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[0] == keys[2] {
            continue;
        }

        for j in 0..3 {
            let (a, b) = (j, (j + 1) % 3);
            let edge_key = if keys[a] < keys[b] {
                (keys[a], keys[b])
            } else {
                (keys[b], keys[a])
            };
            match edges.get_mut(&edge_key) {
                Some(record) => {
                    record.faces += 1;
                    if !record.emitted && record.normal.dot(normal) <= threshold_dot {
                        segments.push(record.from.into());
                        segments.push(record.to.into());
                        record.emitted = true;
                    }
                }
                None => {
                    order.push(edge_key);
                    edges.insert(
                        edge_key,
                        EdgeRecord {
                            from: tri[a],
                            to: tri[b],
                            normal,
                            faces: 1,
                            emitted: false,
                        },
                    );
                }
            }
        }
    }

    for edge_key in order {
        if let Some(record) = edges.get(&edge_key) {
            if record.faces == 1 && !record.emitted {
                segments.push(record.from.into());
                segments.push(record.to.into());
            }
        }
    }
    segments
}
