use crate::data_structures::model::{Mesh, ModelVertex};

/// A flat disk centred on the origin at `elevation`, facing up.
///
/// Texture coordinates span `0..1` across the disk's bounding square; tiling is
/// left to the material's repeat factor.
pub fn disk_geometry(radius: f32, segments: u32, elevation: f32) -> Mesh {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments as usize + 2);
    let mut indices = Vec::with_capacity(segments as usize * 3);

    vertices.push(ModelVertex {
        position: [0.0, elevation, 0.0],
        tex_coords: [0.5, 0.5],
        normal: [0.0, 1.0, 0.0],
    });
    for s in 0..=segments {
        let angle = s as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin_a, cos_a) = angle.sin_cos();
        vertices.push(ModelVertex {
            position: [radius * cos_a, elevation, radius * sin_a],
            tex_coords: [(cos_a + 1.0) / 2.0, (sin_a + 1.0) / 2.0],
            normal: [0.0, 1.0, 0.0],
        });
    }
    // rim runs from +x towards +z, so (center, next, current) faces +y
    for s in 1..=segments {
        indices.extend([0, s + 1, s]);
    }

    Mesh::new(vertices, indices)
}
